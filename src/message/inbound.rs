use serde_json::Value;
use thiserror::Error;

pub const MAX_MESSAGE_LENGTH: usize = 10_000;

/// A chat submission extracted from one inbound frame.
///
/// Both ingress paths produce one of these: the websocket session parses
/// the raw frame with [`ChatPayload::parse`], the HTTP submission endpoint
/// validates its request field with [`ChatPayload::from_content`]. Content
/// is trimmed; whatever is stored is exactly what is broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatPayload {
	content: String,
}

impl ChatPayload {
	/// Parses a `{"message": <string>}` frame.
	pub fn parse(text: &str) -> Result<Self, PayloadError> {
		let value: Value = serde_json::from_str(text).map_err(|_| PayloadError::MalformedJson)?;
		let message = value.get("message").and_then(Value::as_str);

		Self::from_content(message.unwrap_or_default())
	}

	/// Validates already-extracted content: non-empty after trimming and
	/// within the length bound.
	pub fn from_content(content: &str) -> Result<Self, PayloadError> {
		let trimmed = content.trim();
		if trimmed.is_empty() || trimmed.chars().count() > MAX_MESSAGE_LENGTH {
			return Err(PayloadError::InvalidContent);
		}

		Ok(Self {
			content: trimmed.to_string(),
		})
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn into_content(self) -> String {
		self.content
	}
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
	/// The error strings double as the error replies on the wire.
	#[error("Invalid JSON format.")]
	MalformedJson,
	#[error("消息內容為空或格式無效。")]
	InvalidContent,
}
