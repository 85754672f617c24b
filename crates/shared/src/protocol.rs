use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

/// Greeting payload as returned by `/api/message`.
///
/// The body is kept as raw JSON; only `message` and `timestamp` have
/// convenience accessors, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GreetingPayload(pub Value);

impl GreetingPayload {
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn timestamp(&self) -> Option<&Value> {
        self.0.get("timestamp").filter(|value| !value.is_null())
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointIndex {
    pub hello: String,
    pub personalized: String,
    pub api_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub timestamp: String,
    pub endpoints: EndpointIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub timestamp: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessageResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub backend: String,
    pub frontend: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn health_response_tolerates_missing_optional_fields() {
        let parsed: HealthResponse =
            serde_json::from_value(json!({ "status": "down" })).expect("parse");
        assert!(!parsed.is_healthy());
        assert_eq!(parsed.timestamp, None);
    }

    #[test]
    fn greeting_payload_exposes_message_and_timestamp() {
        let payload = GreetingPayload(json!({
            "message": "hi",
            "timestamp": "2024-05-01T10:00:00",
            "extra": [1, 2, 3],
        }));
        assert_eq!(payload.message(), Some("hi"));
        assert_eq!(payload.timestamp(), Some(&json!("2024-05-01T10:00:00")));
    }

    #[test]
    fn greeting_payload_keeps_non_object_bodies() {
        let payload: GreetingPayload = serde_json::from_str("[\"a\"]").expect("parse");
        assert_eq!(payload.message(), None);
        assert_eq!(payload.timestamp(), None);
        assert_eq!(payload.as_json(), &json!(["a"]));
    }
}
