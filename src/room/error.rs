use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoomError {
	/// The error string doubles as the rejection reply on the wire.
	#[error("房間名稱格式無效。")]
	InvalidRoomName,
}
