//! Stateless parts-assistant boundary.
//!
//! The storefront's chat widget is backed by a remote model. From the
//! engine's perspective the integration is a single stateless call:
//! history plus a new message in, reply text out. Transport failures are
//! converted into a canned offline reply rather than surfaced to the
//! widget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Reply used whenever the assistant cannot be reached.
pub const OFFLINE_REPLY: &str =
    "Sorry, the parts assistant is offline right now. Please try again later \
     or send us your question through the contact form.";

/// Errors from the assistant transport.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The remote service failed or was unreachable.
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),

    /// The attached image payload was malformed.
    #[error("Invalid image attachment")]
    InvalidImage,
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The customer.
    User,
    /// The assistant.
    Model,
}

/// One turn of conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// An image attached to a message: raw base64 payload plus mime type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageAttachment {
    /// Base64-encoded image bytes, without any data-URI prefix.
    pub data: String,
    /// Mime type, e.g. "image/jpeg".
    pub mime: String,
}

impl ImageAttachment {
    /// Build an attachment from a `data:<mime>;base64,<payload>` URI,
    /// stripping the prefix. Returns `None` for anything else.
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        if mime.is_empty() || payload.is_empty() {
            return None;
        }
        Some(Self {
            data: payload.to_string(),
            mime: mime.to_string(),
        })
    }
}

/// The stateless assistant contract.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Send a message with optional history and image, get the reply text.
    async fn send(
        &self,
        history: &[ChatTurn],
        message: &str,
        image: Option<&ImageAttachment>,
    ) -> Result<String, AssistantError>;
}

/// Send a message, falling back to [`OFFLINE_REPLY`] when the transport
/// fails. The widget never sees an error.
pub async fn reply_or_offline<A: Assistant>(
    assistant: &A,
    history: &[ChatTurn],
    message: &str,
    image: Option<&ImageAttachment>,
) -> String {
    match assistant.send(history, message, image).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!(error = %err, "assistant unavailable, using offline reply");
            OFFLINE_REPLY.to_string()
        }
    }
}

/// Scripted [`Assistant`] for tests: pops canned replies in order, and
/// fails once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedAssistant {
    replies: Mutex<VecDeque<String>>,
}

impl ScriptedAssistant {
    /// Create an assistant that answers with the given replies in order.
    pub fn new(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
        }
    }

    /// Create an assistant that always fails.
    pub fn offline() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Assistant for ScriptedAssistant {
    async fn send(
        &self,
        _history: &[ChatTurn],
        _message: &str,
        _image: Option<&ImageAttachment>,
    ) -> Result<String, AssistantError> {
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| AssistantError::Unavailable("replies mutex poisoned".into()))?;
        replies
            .pop_front()
            .ok_or_else(|| AssistantError::Unavailable("no scripted reply left".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_prefix_stripped() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let attachment = ImageAttachment::from_data_uri(uri).unwrap();
        assert_eq!(attachment.mime, "image/png");
        assert_eq!(attachment.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_bad_data_uri_rejected() {
        assert!(ImageAttachment::from_data_uri("https://example.com/a.png").is_none());
        assert!(ImageAttachment::from_data_uri("data:image/png;base64,").is_none());
        assert!(ImageAttachment::from_data_uri("data:;base64,abc").is_none());
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let assistant = ScriptedAssistant::new(["first", "second"]);
        let history = [ChatTurn::user("hello")];

        let one = assistant.send(&history, "q1", None).await.unwrap();
        let two = assistant.send(&history, "q2", None).await.unwrap();
        assert_eq!(one, "first");
        assert_eq!(two, "second");
        assert!(assistant.send(&history, "q3", None).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_fallback() {
        let assistant = ScriptedAssistant::offline();
        let reply = reply_or_offline(&assistant, &[], "anyone there?", None).await;
        assert_eq!(reply, OFFLINE_REPLY);
    }
}
