//! Uniform result envelope for store-backed operations.
//!
//! ```json
//! { "status": "success", "data": [ ... ] }
//! { "status": "error" }
//! ```
//!
//! The error form carries no diagnostic. Details go to the log.

use serde::{Deserialize, Serialize};

/// Outcome tag of an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Success/error wrapper with an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
        }
    }

    pub fn error() -> Self {
        Self {
            status: EnvelopeStatus::Error,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_success_with_empty_data() {
        let env: Envelope<Vec<u32>> = Envelope::success(Vec::new());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json, serde_json::json!({"status": "success", "data": []}));
    }

    #[test]
    fn test_error_has_no_payload() {
        let env: Envelope<String> = Envelope::error();
        assert!(!env.is_success());
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"status":"error"}"#
        );
    }

    #[test]
    fn test_message_payload() {
        let env = Envelope::success("删除成功".to_string());
        let back: Envelope<String> =
            serde_json::from_str(&serde_json::to_string(&env).unwrap()).unwrap();
        assert_eq!(back.data.as_deref(), Some("删除成功"));
        assert!(back.is_success());
    }
}
