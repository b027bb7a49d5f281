use crate::message::WebSocketMessage;
use crate::message::event::BroadcastEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One frame on a connection's outbound channel.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum OutgoingFrame {
	Event {
		message: String,
		user: String,
		timestamp: DateTime<Utc>,
	},
	Error {
		error: String,
	},
}

impl OutgoingFrame {
	pub fn error(message: impl Into<String>) -> Self {
		Self::Error { error: message.into() }
	}
}

impl From<&BroadcastEvent> for OutgoingFrame {
	fn from(event: &BroadcastEvent) -> Self {
		Self::Event {
			message: event.message.clone(),
			user: event.user.clone(),
			timestamp: event.timestamp,
		}
	}
}

impl From<&OutgoingFrame> for WebSocketMessage {
	fn from(frame: &OutgoingFrame) -> Self {
		let json = serde_json::to_string(frame).expect("Failed to serialize outgoing frame to JSON.");
		WebSocketMessage::Text(json.into())
	}
}
