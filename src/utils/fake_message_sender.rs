use crate::connection::sender::{MessageSender, MessageSenderTrait};
use crate::message::outgoing::OutgoingFrame;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Notify;

/// In-memory stand-in for a connection's outbound channel that records
/// every delivered frame. [`FakeMessageSender::blocked`] builds one whose
/// sends never complete, [`FakeMessageSender::disconnected`] one whose
/// sends always fail.
#[derive(Clone, Default)]
pub struct FakeMessageSender {
	inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
	frames: parking_lot::Mutex<Vec<OutgoingFrame>>,
	frame_notification: Notify,
	mode: Mode,
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
	#[default]
	Recording,
	Blocked,
	Disconnected,
}

impl FakeMessageSender {
	pub fn blocked() -> Self {
		Self::with_mode(Mode::Blocked)
	}

	pub fn disconnected() -> Self {
		Self::with_mode(Mode::Disconnected)
	}

	fn with_mode(mode: Mode) -> Self {
		Self {
			inner: Arc::new(Inner {
				mode,
				..Default::default()
			}),
		}
	}

	pub fn frames(&self) -> Vec<OutgoingFrame> {
		self.inner.frames.lock().clone()
	}

	/// Waits until at least `count` frames have been recorded and returns
	/// them. Callers are expected to bound this with a timeout.
	pub async fn wait_for_frames(&self, count: usize) -> Vec<OutgoingFrame> {
		loop {
			{
				let frames = self.inner.frames.lock();
				if frames.len() >= count {
					return frames.clone();
				}
			}
			self.inner.frame_notification.notified().await;
		}
	}
}

#[async_trait]
impl MessageSenderTrait for FakeMessageSender {
	async fn send_frame(&self, frame: OutgoingFrame) -> Result<(), ()> {
		match self.inner.mode {
			Mode::Blocked => std::future::pending::<Result<(), ()>>().await,
			Mode::Disconnected => Err(()),
			Mode::Recording => {
				self.inner.frames.lock().push(frame);
				self.inner.frame_notification.notify_one();
				Ok(())
			}
		}
	}

	async fn close(&self) {}
}

impl From<FakeMessageSender> for MessageSender {
	fn from(fake_message_sender: FakeMessageSender) -> Self {
		Arc::pin(fake_message_sender)
	}
}
