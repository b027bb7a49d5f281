use crate::connection::sender::MessageSender;
use crate::identity::Identity;
use crate::room::member_id::MemberId;

/// A connection currently joined to a room.
///
/// The relay holds this non-owning handle for the duration of membership;
/// the transport layer owns the connection itself.
#[derive(Clone)]
pub struct Member {
	id: MemberId,
	identity: Identity,
	sender: MessageSender,
}

impl Member {
	pub fn new(id: MemberId, identity: Identity, sender: MessageSender) -> Self {
		Self { id, identity, sender }
	}

	pub fn id(&self) -> MemberId {
		self.id
	}

	pub fn identity(&self) -> &Identity {
		&self.identity
	}

	pub fn sender(&self) -> MessageSender {
		self.sender.clone()
	}
}
