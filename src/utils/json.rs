// Helpers for model output that is meant to be JSON or plain text

use serde::de::DeserializeOwned;

/// Remove markdown code-fence markers (```` ```json ```` and ```` ``` ````) and trim
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse a JSON object out of a model response.
///
/// Fences are stripped first. If the remainder still is not valid JSON, the
/// outermost `{...}` span is tried, which tolerates a sentence of preamble.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(err) => match (cleaned.find('{'), cleaned.rfind('}')) {
            (Some(start), Some(end)) if start < end => serde_json::from_str(&cleaned[start..=end]),
            _ => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Query {
        query: String,
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  ```\nplain summary\n```  "), "plain summary");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn test_parse_fenced_json() {
        let parsed: Query = parse_json_response("```json\n{\"query\": \"borrow checker\"}\n```").unwrap();
        assert_eq!(parsed.query, "borrow checker");
    }

    #[test]
    fn test_parse_json_with_preamble() {
        let parsed: Query =
            parse_json_response("Here is the query:\n{\"query\": \"lifetimes\"}\nHope it helps").unwrap();
        assert_eq!(parsed.query, "lifetimes");
    }

    #[test]
    fn test_parse_rejects_non_json_and_missing_fields() {
        assert!(parse_json_response::<Query>("just text").is_err());
        assert!(parse_json_response::<Query>("{\"aspect\": \"x\"}").is_err());
    }
}
