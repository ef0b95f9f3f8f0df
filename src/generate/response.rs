//! Response decoding.

use crate::domain::ChatResponse;
use crate::error::Result;

/// Decode a chat-completion body. An empty `choices` array is valid.
pub fn parse_response(raw: &[u8]) -> Result<ChatResponse> {
    Ok(serde_json::from_slice(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, ChoiceMessage};
    use crate::error::GenerateError;

    fn response(contents: &[&str]) -> ChatResponse {
        ChatResponse {
            choices: contents
                .iter()
                .map(|c| Choice { message: ChoiceMessage { content: c.to_string() } })
                .collect(),
        }
    }

    #[test]
    fn parses_first_choice() {
        let raw = br##"{"choices":[{"message":{"content":"# Docs\n"}}]}"##;
        let parsed = parse_response(raw).unwrap();
        assert_eq!(parsed.first_content(), Some("# Docs\n"));
    }

    #[test]
    fn serialized_responses_parse_back() {
        for r in [response(&[]), response(&["a"]), response(&["```rs\nx\n```", "second", ""])] {
            let bytes = serde_json::to_vec(&r).unwrap();
            assert_eq!(parse_response(&bytes).unwrap(), r);
        }
    }

    #[test]
    fn empty_choices_is_valid() {
        let parsed = parse_response(br#"{"choices":[]}"#).unwrap();
        assert!(parsed.first_content().is_none());
    }

    #[test]
    fn invalid_json_is_decode_error() {
        assert!(matches!(parse_response(b"<html>502</html>"), Err(GenerateError::Decode(_))));
    }

    #[test]
    fn missing_choices_is_decode_error() {
        let err = parse_response(br#"{"object":"error","message":"Unauthorized"}"#).unwrap_err();
        assert!(matches!(err, GenerateError::Decode(_)));
    }

    #[test]
    fn missing_content_is_decode_error() {
        assert!(parse_response(br#"{"choices":[{"message":{}}]}"#).is_err());
    }
}
