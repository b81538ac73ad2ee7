pub mod dates;
pub mod phone;

use crate::error::TriageError;
use crate::model::RawMessage;

pub use dates::{iso_week, normalize_date};
pub use phone::{normalize_phone, parse_region};

/// Decode a batch container (a JSON array of message objects).
///
/// Any failure here rejects the whole batch; no message is processed.
pub fn decode_batch(json: &str) -> Result<Vec<RawMessage>, TriageError> {
    serde_json::from_str(json).map_err(TriageError::BatchDecode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_batch() {
        let json = r#"[
            {"number": 1, "description": "a", "dueDate": "", "phone": ""},
            {"number": 2, "description": "b", "dueDate": null, "phone": null},
            {"number": 3, "description": ""}
        ]"#;
        let messages = decode_batch(json).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].due_date.as_deref(), Some(""));
        assert!(messages[1].due_date.is_none());
        assert!(messages[2].phone.is_none());
    }

    #[test]
    fn test_empty_array() {
        assert!(decode_batch("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_container() {
        assert!(matches!(
            decode_batch(r#"[{"number": 1, "description": "a""#),
            Err(TriageError::BatchDecode(_))
        ));
        assert!(matches!(
            decode_batch(r#"{"number": 1}"#),
            Err(TriageError::BatchDecode(_))
        ));
    }

    #[test]
    fn test_message_without_number_rejects_batch() {
        assert!(matches!(
            decode_batch(r#"[{"description": "a"}]"#),
            Err(TriageError::BatchDecode(_))
        ));
    }
}
