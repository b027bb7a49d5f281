use crate::message::event::BroadcastEvent;
use crate::room::name::RoomName;
use futures_util::{Stream, StreamExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::ready;
use std::pin::Pin;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

pub type EventStream = Pin<Box<dyn Stream<Item = BroadcastEvent> + Send>>;

/// Pub/sub seam between publishing an event and fanning it out.
///
/// The in-memory implementation below serves a single process; an
/// implementation backed by an external broker slots in here without the
/// router noticing.
pub trait ChannelTransport: Send + Sync {
	/// Publish an event onto a room topic. Publishing to a topic nobody
	/// subscribed to drops the event.
	fn publish(&self, topic: &RoomName, event: BroadcastEvent);

	/// Subscribe to a room topic. Events published afterwards appear on the
	/// stream in publish order.
	fn subscribe(&self, topic: &RoomName) -> EventStream;
}

pub struct InMemoryTransport {
	topics: Mutex<HashMap<RoomName, broadcast::Sender<BroadcastEvent>>>,
	capacity: usize,
}

impl InMemoryTransport {
	pub fn new(capacity: usize) -> Self {
		Self {
			topics: Mutex::new(HashMap::new()),
			capacity,
		}
	}
}

impl ChannelTransport for InMemoryTransport {
	fn publish(&self, topic: &RoomName, event: BroadcastEvent) {
		let sender = self.topics.lock().get(topic).cloned();
		if let Some(sender) = sender {
			// An audience-less topic is fine, the event simply goes nowhere.
			let _ = sender.send(event);
		}
	}

	fn subscribe(&self, topic: &RoomName) -> EventStream {
		let mut topics = self.topics.lock();
		// Topics whose subscribers are all gone are pruned lazily.
		topics.retain(|_, sender| sender.receiver_count() > 0);

		let sender = topics
			.entry(topic.clone())
			.or_insert_with(|| broadcast::channel(self.capacity).0);
		let receiver = sender.subscribe();

		// A subscriber that lags behind the channel capacity skips ahead,
		// dropping the overwritten events.
		Box::pin(BroadcastStream::new(receiver).filter_map(|result| ready(result.ok())))
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use chrono::Utc;

	fn event(room: &RoomName, message: &str) -> BroadcastEvent {
		BroadcastEvent::builder()
			.room(room.clone())
			.user("Ferris".to_string())
			.message(message.to_string())
			.timestamp(Utc::now())
			.build()
	}

	fn room(name: &str) -> RoomName {
		RoomName::try_from(name).expect("Invalid room name in test")
	}

	#[tokio::test]
	async fn subscriber_should_receive_events_in_publish_order() {
		let transport = InMemoryTransport::new(16);
		let lobby = room("lobby");
		let mut events = transport.subscribe(&lobby);

		transport.publish(&lobby, event(&lobby, "one"));
		transport.publish(&lobby, event(&lobby, "two"));
		transport.publish(&lobby, event(&lobby, "three"));

		assert_eq!("one", events.next().await.unwrap().message);
		assert_eq!("two", events.next().await.unwrap().message);
		assert_eq!("three", events.next().await.unwrap().message);
	}

	#[tokio::test]
	async fn every_subscriber_should_receive_every_event() {
		let transport = InMemoryTransport::new(16);
		let lobby = room("lobby");
		let mut first = transport.subscribe(&lobby);
		let mut second = transport.subscribe(&lobby);

		transport.publish(&lobby, event(&lobby, "hello"));

		assert_eq!("hello", first.next().await.unwrap().message);
		assert_eq!("hello", second.next().await.unwrap().message);
	}

	#[tokio::test]
	async fn publishing_without_subscribers_should_drop_the_event() {
		let transport = InMemoryTransport::new(16);
		let lobby = room("lobby");

		transport.publish(&lobby, event(&lobby, "lost"));

		let mut events = transport.subscribe(&lobby);
		transport.publish(&lobby, event(&lobby, "delivered"));
		assert_eq!("delivered", events.next().await.unwrap().message);
	}

	#[tokio::test]
	async fn topics_should_be_isolated() {
		let transport = InMemoryTransport::new(16);
		let lobby = room("lobby");
		let kitchen = room("kitchen");
		let mut lobby_events = transport.subscribe(&lobby);
		let mut kitchen_events = transport.subscribe(&kitchen);

		transport.publish(&lobby, event(&lobby, "lobby only"));
		transport.publish(&kitchen, event(&kitchen, "kitchen only"));

		assert_eq!("lobby only", lobby_events.next().await.unwrap().message);
		assert_eq!("kitchen only", kitchen_events.next().await.unwrap().message);
	}
}
