use crate::room::member::Member;
use crate::room::member_id::MemberId;
use crate::room::name::RoomName;
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

/// Concurrent multimap from room name to the set of joined members.
///
/// Rooms are not reified anywhere else; one exists exactly as long as it
/// has members. Each room's member set is behind its own mutex so a busy
/// room cannot stall joins, leaves or broadcast snapshots in another.
///
/// A connection joins at most one room for its lifetime. The registry does
/// not enforce this, sessions do by construction.
#[derive(Default)]
pub struct ConnectionRegistry {
	rooms: RwLock<HashMap<RoomName, Arc<Mutex<BTreeMap<MemberId, Member>>>>>,
}

impl ConnectionRegistry {
	/// Adds a member to a room, creating the room on first join. Joining
	/// again with the same id replaces the previous registration, so a
	/// member is never delivered to twice.
	pub fn join(&self, room: &RoomName, member: Member) {
		let mut rooms = self.rooms.write();
		let members = rooms.entry(room.clone()).or_default().clone();
		let mut members = members.lock();

		if members.insert(member.id(), member).is_none() {
			info!("Room '{}' now has {} members.", room, members.len());
		}
	}

	/// Removes a member from a room. Removing an absent member is a no-op.
	/// The room entry is pruned once the last member is gone.
	pub fn leave(&self, room: &RoomName, member_id: MemberId) {
		let mut rooms = self.rooms.write();
		let Some(members) = rooms.get(room).cloned() else {
			return;
		};

		let mut members = members.lock();
		members.remove(&member_id);
		if members.is_empty() {
			drop(members);
			rooms.remove(room);
		}
	}

	/// Returns a point-in-time copy of a room's member set, safe to iterate
	/// while joins and leaves continue concurrently.
	pub fn members_of(&self, room: &RoomName) -> Vec<Member> {
		match self.rooms.read().get(room) {
			Some(members) => members.lock().values().cloned().collect(),
			None => Vec::new(),
		}
	}

	pub fn member_count(&self, room: &RoomName) -> usize {
		match self.rooms.read().get(room) {
			Some(members) => members.lock().len(),
			None => 0,
		}
	}
}
