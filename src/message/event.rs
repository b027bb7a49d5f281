use crate::room::name::RoomName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Ephemeral envelope fanned out to every member of a room.
///
/// Serialized in full on the transport topic so a broker-backed transport
/// can carry it between processes; the per-connection outbound frame drops
/// the room, the receiving connection already knows it.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, TypedBuilder)]
pub struct BroadcastEvent {
	pub room: RoomName,
	pub user: String,
	pub message: String,
	pub timestamp: DateTime<Utc>,
}
