use crate::message::WebSocketMessage;
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;

pub type MessageReceiver = Pin<Box<dyn MessageReceiverTrait + Unpin + Send>>;

/// One inbound frame, reduced to what the session protocol cares about.
pub enum ReceivedFrame {
	/// A text frame carrying a not yet validated payload.
	Text(String),
	/// A frame kind the protocol does not accept (binary).
	Unsupported,
	/// The transport is gone; no more frames will arrive.
	Closed,
}

#[async_trait]
pub trait MessageReceiverTrait {
	/// Receive the next frame, or `Closed` once the connection is gone.
	async fn receive(&mut self) -> ReceivedFrame;
}

pub struct StreamMessageReceiver<FrameStream> {
	frame_stream: FrameStream,
}

#[async_trait]
impl<FrameStream> MessageReceiverTrait for StreamMessageReceiver<FrameStream>
where
	FrameStream: Stream<Item = WebSocketMessage> + Unpin + Send,
{
	async fn receive(&mut self) -> ReceivedFrame {
		loop {
			let Some(websocket_message) = self.frame_stream.next().await else {
				return ReceivedFrame::Closed;
			};

			match websocket_message {
				WebSocketMessage::Text(text) => return ReceivedFrame::Text(text.to_string()),
				WebSocketMessage::Binary(_) => return ReceivedFrame::Unsupported,
				WebSocketMessage::Close(_) => return ReceivedFrame::Closed,
				// Ping/Pong are answered by the transport layer.
				WebSocketMessage::Ping(_) | WebSocketMessage::Pong(_) => {}
			}
		}
	}
}

impl<FrameStream> StreamMessageReceiver<FrameStream>
where
	FrameStream: Stream<Item = WebSocketMessage>,
{
	pub fn new(frame_stream: FrameStream) -> Self {
		Self { frame_stream }
	}
}

impl<FrameStream> From<StreamMessageReceiver<FrameStream>> for MessageReceiver
where
	FrameStream: Stream<Item = WebSocketMessage> + Unpin + Send + 'static,
{
	fn from(stream_message_receiver: StreamMessageReceiver<FrameStream>) -> Self {
		Box::pin(stream_message_receiver)
	}
}
