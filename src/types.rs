use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_required: Option<bool>,
}

impl MessageMetadata {
    pub fn requires_salary_slip(&self) -> bool {
        self.salary_required.unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    /// RFC 3339 string as received or generated; not validated.
    pub timestamp: String,
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    pub fn suggestions(&self) -> &[String] {
        match (&self.sender, &self.metadata) {
            (Sender::Bot, Some(meta)) => &meta.suggestions,
            _ => &[],
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        self.metadata.as_ref()?.download_url.as_deref()
    }
}

/// Frame written to the assistant socket.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundFrame {
    pub content: String,
    pub sender: Sender,
    pub timestamp: String,
}

/// Frame read from the assistant socket.
///
/// The backend also repeats `suggestions` at the top level; those win over
/// the ones nested in `metadata` when non-empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InboundFrame {
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
}

impl InboundFrame {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Metadata with top-level suggestions folded in.
    pub fn merged_metadata(&self) -> MessageMetadata {
        let mut meta = self.metadata.clone().unwrap_or_default();
        if !self.suggestions.is_empty() {
            meta.suggestions = self.suggestions.clone();
        }
        meta
    }
}

/// `null` and a missing key both read as no suggestions.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbound_frame_has_wire_shape() {
        let frame = OutboundFrame {
            content: "start".into(),
            sender: Sender::User,
            timestamp: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": "start",
                "sender": "user",
                "timestamp": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn inbound_frame_tolerates_backend_extras() {
        let raw = r#"{"type":"message","content":"Hi","sender":"bot","timestamp":"2024-01-01T10:00:00","metadata":{"salary_required":true},"suggestions":["A","B"]}"#;
        let frame = InboundFrame::from_json(raw).unwrap();
        assert_eq!(frame.content, "Hi");
        let meta = frame.merged_metadata();
        assert!(meta.requires_salary_slip());
        assert_eq!(meta.suggestions, vec!["A", "B"]);
    }

    #[test]
    fn nested_suggestions_survive_empty_top_level() {
        let raw = r#"{"content":"Pick","metadata":{"suggestions":["Yes"]},"suggestions":[]}"#;
        let frame = InboundFrame::from_json(raw).unwrap();
        assert_eq!(frame.merged_metadata().suggestions, vec!["Yes"]);
    }

    #[test]
    fn null_suggestions_read_as_empty() {
        let top = InboundFrame::from_json(r#"{"content":"Hi","suggestions":null}"#).unwrap();
        assert_eq!(top.content, "Hi");
        assert!(top.merged_metadata().suggestions.is_empty());

        let nested =
            InboundFrame::from_json(r#"{"content":"Hi","metadata":{"suggestions":null}}"#)
                .unwrap();
        assert_eq!(nested.content, "Hi");
        assert!(nested.merged_metadata().suggestions.is_empty());

        let both = InboundFrame::from_json(
            r#"{"content":"Hi","metadata":null,"suggestions":null}"#,
        )
        .unwrap();
        assert_eq!(both.merged_metadata(), MessageMetadata::default());
    }

    #[test]
    fn only_bot_messages_offer_suggestions() {
        let meta = MessageMetadata {
            suggestions: vec!["A".into()],
            ..Default::default()
        };
        let mut msg = ChatMessage {
            id: 1,
            content: String::new(),
            sender: Sender::User,
            timestamp: String::new(),
            metadata: Some(meta),
        };
        assert!(msg.suggestions().is_empty());
        msg.sender = Sender::Bot;
        assert_eq!(msg.suggestions(), ["A".to_string()]);
    }
}
