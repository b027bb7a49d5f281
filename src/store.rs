use crate::clock::SubmissionInstant;
use crate::room::name::RoomName;
use crate::store::error::StoreError;
use crate::store::model::StoredMessage;
use async_trait::async_trait;

pub mod error;
pub mod model;
pub mod sqlite;

#[async_trait]
pub trait MessageStore: Send + Sync {
	/// Appends a message to a room's history. Content is validated by the
	/// caller; this only fails when storage is unavailable, and the caller
	/// decides whether live delivery proceeds regardless.
	async fn append(
		&self,
		room: &RoomName,
		sender: Option<&str>,
		content: &str,
		submitted_at: SubmissionInstant,
	) -> Result<StoredMessage, StoreError>;

	/// Returns at most `limit` of the room's most recent messages, oldest
	/// first, ordered by timestamp with insertion-order tie-break.
	async fn history(&self, room: &RoomName, limit: usize) -> Result<Vec<StoredMessage>, StoreError>;
}
