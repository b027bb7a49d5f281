use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow, Clone, Debug, PartialEq, Eq)]
pub struct StoredMessage {
	pub uuid: Uuid,
	pub room_name: String,
	/// NULL means anonymous or sender-since-deleted.
	pub sender_name: Option<String>,
	pub content: String,
	pub sent_at: DateTime<Utc>,
	/// Breaks ties between messages sharing a timestamp.
	pub sequence: i64,
}
