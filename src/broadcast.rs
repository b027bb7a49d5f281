use crate::broadcast::transport::ChannelTransport;
use crate::message::event::BroadcastEvent;
use crate::message::outgoing::OutgoingFrame;
use crate::room::member::Member;
use crate::room::member_id::MemberId;
use crate::room::name::RoomName;
use crate::room::registry::ConnectionRegistry;
use futures_util::StreamExt;
use futures_util::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod transport;

/// Outcome of fanning one event out to a room snapshot.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
	pub delivered: usize,
	pub evicted: Vec<MemberId>,
}

/// Fans events out to all members of a room.
///
/// Publishing goes through the injected [`ChannelTransport`]. A single
/// dispatcher task per active room consumes the topic and delivers one
/// event at a time, which keeps events FIFO per room for every member.
/// Delivery to an individual member is best-effort: a member whose
/// outbound channel fails or exceeds the delivery timeout is evicted from
/// the registry without holding up anybody else.
pub struct BroadcastRouter {
	registry: Arc<ConnectionRegistry>,
	transport: Arc<dyn ChannelTransport>,
	dispatchers: Mutex<HashMap<RoomName, JoinHandle<()>>>,
	delivery_timeout: Duration,
}

impl BroadcastRouter {
	pub fn new(
		registry: Arc<ConnectionRegistry>,
		transport: Arc<dyn ChannelTransport>,
		delivery_timeout: Duration,
	) -> Self {
		Self {
			registry,
			transport,
			dispatchers: Mutex::new(HashMap::new()),
			delivery_timeout,
		}
	}

	/// Hands an event to its room's topic. Delivery happens on the room's
	/// dispatcher task.
	pub fn publish(&self, event: BroadcastEvent) {
		let room = event.room.clone();
		self.transport.publish(&room, event);
	}

	/// Registers a member and makes sure the room has a running dispatcher.
	pub fn attach(&self, room: &RoomName, member: Member) {
		self.registry.join(room, member);
		self.ensure_dispatcher(room);
	}

	/// Removes a member. The dispatcher is retired along with the last one.
	pub fn detach(&self, room: &RoomName, member_id: MemberId) {
		self.registry.leave(room, member_id);

		let mut dispatchers = self.dispatchers.lock();
		if self.registry.member_count(room) == 0 {
			if let Some(dispatcher) = dispatchers.remove(room) {
				dispatcher.abort();
			}
		}
	}

	fn ensure_dispatcher(&self, room: &RoomName) {
		let mut dispatchers = self.dispatchers.lock();
		if dispatchers.contains_key(room) {
			return;
		}

		let mut events = self.transport.subscribe(room);
		let registry = self.registry.clone();
		let delivery_timeout = self.delivery_timeout;
		let dispatcher_room = room.clone();

		let dispatcher = tokio::spawn(async move {
			while let Some(event) = events.next().await {
				let report = fan_out(&registry, &dispatcher_room, &event, delivery_timeout).await;
				debug!(
					"Delivered event in '{}' to {} members ({} evicted).",
					dispatcher_room,
					report.delivered,
					report.evicted.len()
				);
			}
		});
		dispatchers.insert(room.clone(), dispatcher);
	}
}

/// Delivers one event to a point-in-time snapshot of a room's members.
///
/// All sends run concurrently, each bounded by `delivery_timeout`. Failed
/// or timed-out members are removed from the registry so a dead connection
/// cannot stall the room; delivery to the remaining members always
/// completes.
pub async fn fan_out(
	registry: &ConnectionRegistry,
	room: &RoomName,
	event: &BroadcastEvent,
	delivery_timeout: Duration,
) -> DeliveryReport {
	let members = registry.members_of(room);

	let attempts = members.into_iter().map(|member| async move {
		let frame = OutgoingFrame::from(event);
		let delivery = tokio::time::timeout(delivery_timeout, member.sender().send_frame(frame)).await;
		(member.id(), matches!(delivery, Ok(Ok(()))))
	});

	let mut report = DeliveryReport::default();
	for (member_id, delivered) in join_all(attempts).await {
		if delivered {
			report.delivered += 1;
		} else {
			warn!(
				"Evicting member {} from '{}', the outbound channel failed or timed out.",
				member_id, room
			);
			registry.leave(room, member_id);
			report.evicted.push(member_id);
		}
	}
	report
}
