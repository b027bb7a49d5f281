use crate::clock::SubmissionInstant;
use crate::room::name::RoomName;
use crate::store::MessageStore;
use crate::store::error::StoreError;
use crate::store::model::StoredMessage;
use async_trait::async_trait;
use sqlx::{SqlitePool, migrate, query_as};
use uuid::Uuid;

#[derive(Clone)]
pub struct SqliteStore {
	pool: SqlitePool,
}

impl SqliteStore {
	pub async fn new(database_url: &str) -> Result<Self, StoreError> {
		let pool = SqlitePool::connect(database_url).await.map_err(StoreError::Open)?;
		let store = Self { pool };
		store.migrate().await?;

		Ok(store)
	}

	async fn migrate(&self) -> Result<(), StoreError> {
		migrate!().run(&self.pool).await.map_err(Into::into)
	}
}

#[async_trait]
impl MessageStore for SqliteStore {
	async fn append(
		&self,
		room: &RoomName,
		sender: Option<&str>,
		content: &str,
		submitted_at: SubmissionInstant,
	) -> Result<StoredMessage, StoreError> {
		let uuid = Uuid::new_v4();
		query_as(
			r"
			INSERT INTO chat_message (
				uuid,
				room_name,
				sender_name,
				content,
				sent_at,
				sequence
			) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
			RETURNING
				uuid,
				room_name,
				sender_name,
				content,
				sent_at,
				sequence
			",
		)
		.bind(uuid)
		.bind(room.as_str())
		.bind(sender)
		.bind(content)
		.bind(submitted_at.timestamp)
		.bind(submitted_at.sequence)
		.fetch_one(&self.pool)
		.await
		.map_err(Into::into)
	}

	async fn history(&self, room: &RoomName, limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
		let mut messages: Vec<StoredMessage> = query_as(
			r"
			SELECT
				uuid,
				room_name,
				sender_name,
				content,
				sent_at,
				sequence
			FROM chat_message
			WHERE room_name = ?1
			ORDER BY sent_at DESC, sequence DESC
			LIMIT ?2
			",
		)
		.bind(room.as_str())
		.bind(i64::try_from(limit).unwrap_or(i64::MAX))
		.fetch_all(&self.pool)
		.await?;

		// The query walks newest-first to apply the limit; callers read
		// history oldest-first.
		messages.reverse();
		Ok(messages)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{DateTime, Utc};

	fn instant(seconds: i64, sequence: i64) -> SubmissionInstant {
		SubmissionInstant {
			timestamp: DateTime::<Utc>::from_timestamp(seconds, 0).unwrap(),
			sequence,
		}
	}

	fn room(name: &str) -> RoomName {
		RoomName::try_from(name).expect("Invalid room name in test")
	}

	async fn store() -> SqliteStore {
		SqliteStore::new("sqlite::memory:")
			.await
			.expect("Failed to create in-memory SQLite database")
	}

	#[tokio::test]
	async fn appends_a_message() {
		let store = store().await;

		let message = store
			.append(&room("lobby"), Some("Ferris"), "hello", instant(1000, 0))
			.await
			.expect("Failed to append message");

		assert_eq!(4, message.uuid.get_version_num());
		assert_eq!("lobby", message.room_name);
		assert_eq!(Some("Ferris".to_string()), message.sender_name);
		assert_eq!("hello", message.content);
		assert_eq!(instant(1000, 0).timestamp, message.sent_at);
		assert_eq!(0, message.sequence);
	}

	#[tokio::test]
	async fn stores_anonymous_senders_as_null() {
		let store = store().await;

		let message = store
			.append(&room("lobby"), None, "hello", instant(1000, 0))
			.await
			.expect("Failed to append message");

		assert_eq!(None, message.sender_name);
	}

	#[tokio::test]
	async fn history_is_ordered_oldest_first() {
		let store = store().await;
		let lobby = room("lobby");

		store.append(&lobby, None, "second", instant(2000, 0)).await.unwrap();
		store.append(&lobby, None, "first", instant(1000, 0)).await.unwrap();
		store.append(&lobby, None, "third", instant(3000, 0)).await.unwrap();

		let history = store.history(&lobby, 100).await.expect("Failed to read history");

		let contents: Vec<_> = history.iter().map(|message| message.content.as_str()).collect();
		assert_eq!(vec!["first", "second", "third"], contents);
	}

	#[tokio::test]
	async fn equal_timestamps_are_ordered_by_sequence() {
		let store = store().await;
		let lobby = room("lobby");

		store.append(&lobby, None, "b", instant(1000, 1)).await.unwrap();
		store.append(&lobby, None, "a", instant(1000, 0)).await.unwrap();
		store.append(&lobby, None, "c", instant(1000, 2)).await.unwrap();

		let history = store.history(&lobby, 100).await.expect("Failed to read history");

		let contents: Vec<_> = history.iter().map(|message| message.content.as_str()).collect();
		assert_eq!(vec!["a", "b", "c"], contents);
	}

	#[tokio::test]
	async fn history_keeps_the_most_recent_messages_when_limited() {
		let store = store().await;
		let lobby = room("lobby");

		for count in 0..5 {
			store
				.append(&lobby, None, &format!("{count}"), instant(1000 + count, 0))
				.await
				.unwrap();
		}

		let history = store.history(&lobby, 2).await.expect("Failed to read history");

		let contents: Vec<_> = history.iter().map(|message| message.content.as_str()).collect();
		assert_eq!(vec!["3", "4"], contents);
	}

	#[tokio::test]
	async fn history_is_partitioned_by_room() {
		let store = store().await;

		store.append(&room("lobby"), None, "here", instant(1000, 0)).await.unwrap();
		store
			.append(&room("kitchen"), None, "elsewhere", instant(1000, 0))
			.await
			.unwrap();

		let history = store.history(&room("lobby"), 100).await.expect("Failed to read history");

		assert_eq!(1, history.len());
		assert_eq!("here", history[0].content);
	}

	#[tokio::test]
	async fn history_of_an_unknown_room_is_empty() {
		let store = store().await;

		let history = store.history(&room("nowhere"), 100).await.expect("Failed to read history");

		assert!(history.is_empty());
	}
}
