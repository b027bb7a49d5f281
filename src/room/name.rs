use crate::room::error::RoomError;
use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_ROOM_NAME_LENGTH: usize = 255;

/// A validated room identifier.
///
/// Holding a value of this type is proof that the name is non-empty,
/// consists only of ASCII letters, digits and underscores, and is at most
/// [`MAX_ROOM_NAME_LENGTH`] bytes long. Every ingress path (websocket join,
/// message submission, history read) constructs one before touching any
/// other component, so all of them reject exactly the same names.
#[derive(
	Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Deref, derive_more::Display, derive_more::Into, Serialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl TryFrom<&str> for RoomName {
	type Error = RoomError;

	fn try_from(name: &str) -> Result<Self, Self::Error> {
		if name.is_empty() || name.len() > MAX_ROOM_NAME_LENGTH {
			return Err(RoomError::InvalidRoomName);
		}

		if !name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_') {
			return Err(RoomError::InvalidRoomName);
		}

		Ok(Self(name.to_string()))
	}
}

impl<'deserializer> Deserialize<'deserializer> for RoomName {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'deserializer>,
	{
		let name = String::deserialize(deserializer)?;
		RoomName::try_from(name.as_str()).map_err(serde::de::Error::custom)
	}
}
