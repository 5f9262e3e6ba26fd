// Prompt templates for the generation steps

pub fn query_writer(topic: &str) -> String {
    format!(
        r#"Your goal is to write one targeted web search query for the research topic below.

TOPIC:
{topic}

OUTPUT FORMAT (respond with ONLY valid JSON):
{{
  "query": "the search query",
  "aspect": "which aspect of the topic the query covers",
  "rationale": "why this query helps"
}}"#,
        topic = topic
    )
}

const SUMMARIZER_GUIDELINES: &str = r#"Write a factual, technically precise summary of web search results. Avoid redundancy.

When EXTENDING an existing summary:
- Integrate the new information into the existing text, keeping its style and depth.
- Add only details that are not already covered.

When writing a NEW summary:
- Pull the most relevant points from each result.
- Give a concise, coherent overview of the key findings for the topic.

Output the summary text only: no preamble, no references section."#;

pub fn new_summary(topic: &str, results: &str) -> String {
    format!(
        "{guidelines}\n\nTOPIC: {topic}\n\nSEARCH RESULTS:\n{results}",
        guidelines = SUMMARIZER_GUIDELINES,
        topic = topic,
        results = results
    )
}

pub fn extend_summary(existing: &str, results: &str) -> String {
    format!(
        "{guidelines}\n\nEXISTING SUMMARY:\n{existing}\n\nNEW SEARCH RESULTS:\n{results}",
        guidelines = SUMMARIZER_GUIDELINES,
        existing = existing,
        results = results
    )
}

pub fn reflection(topic: &str, summary: &str) -> String {
    format!(
        r#"You are reviewing a research summary about "{topic}".

SUMMARY:
{summary}

Identify the most important knowledge gap in this summary and write one follow-up web search query that would fill it.
The query must be self-contained: include enough context to be searched on its own.

OUTPUT FORMAT (respond with ONLY valid JSON):
{{
  "knowledge_gap": "what is missing",
  "follow_up_query": "the follow-up search query"
}}"#,
        topic = topic,
        summary = summary
    )
}
