use serde_json::Value;

use crate::error::BenchError;

/// Recovers a JSON object from judge output.
///
/// The whole (trimmed) text is parsed first. When that fails, for example
/// because the judge wrapped the object in prose or a markdown fence, the
/// first balanced `{...}` block is parsed instead.
pub fn extract_json_object(text: &str) -> Result<Value, BenchError> {
    let trimmed = text.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let candidate = balanced_braces(trimmed).ok_or_else(|| BenchError::Parse {
        message: "no JSON object found in judge output".to_string(),
        raw: text.to_string(),
    })?;

    match serde_json::from_str::<Value>(candidate) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(BenchError::Parse {
            message: "judge output is not a JSON object".to_string(),
            raw: text.to_string(),
        }),
        Err(err) => Err(BenchError::Parse {
            message: format!("invalid JSON in judge output: {err}"),
            raw: text.to_string(),
        }),
    }
}

/// Returns the first `{...}` block whose braces balance, skipping braces
/// inside string literals.
fn balanced_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_plain_object() {
        let value = extract_json_object(r#"  {"originality": 7}  "#).unwrap();
        assert_eq!(value, json!({"originality": 7}));
    }

    #[rstest]
    #[case::prose(r#"Sure! {"originality":7} Thanks"#)]
    #[case::fence("```json\n{\"originality\":7}\n```")]
    #[case::trailing_object(r#"{"originality":7} and also {"other":1}"#)]
    fn recovers_embedded_object(#[case] text: &str) {
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["originality"], json!(7));
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let text = r#"Result: {"note": "use } carefully", "originality": 4} done"#;
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["originality"], json!(4));
        assert_eq!(value["note"], json!("use } carefully"));
    }

    #[rstest]
    #[case::no_braces("I cannot rate this.")]
    #[case::unbalanced("{\"originality\": 7")]
    #[case::broken("Here: {originality: seven}")]
    #[case::array("[1, 2, 3]")]
    #[case::empty("")]
    fn fails_when_nothing_recoverable(#[case] text: &str) {
        let err = extract_json_object(text).unwrap_err();
        match err {
            BenchError::Parse { raw, .. } => assert_eq!(raw, text),
            other => panic!("unexpected error: {other}"),
        }
    }
}
