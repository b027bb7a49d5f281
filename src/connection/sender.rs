use crate::message::WebSocketMessage;
use crate::message::outgoing::OutgoingFrame;
use async_trait::async_trait;
use futures_util::{Sink, SinkExt};
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;
use tracing::error;

/// Cloneable outbound half of a connection. The relay never owns the
/// underlying transport, it only holds these handles.
pub type MessageSender = Pin<Arc<dyn MessageSenderTrait + Send + Sync>>;

#[async_trait]
pub trait MessageSenderTrait {
	async fn send_frame(&self, frame: OutgoingFrame) -> Result<(), ()>;
	async fn close(&self);
}

pub struct SinkMessageSender<FrameSink> {
	inner: tokio::sync::Mutex<SinkMessageSenderInner<FrameSink>>,
}

struct SinkMessageSenderInner<FrameSink> {
	frame_sink: FrameSink,
}

#[async_trait]
impl<FrameSink, SinkError> MessageSenderTrait for SinkMessageSender<FrameSink>
where
	FrameSink: Sink<WebSocketMessage, Error = SinkError> + Send + Unpin + 'static,
	SinkError: Debug + 'static,
{
	async fn send_frame(&self, frame: OutgoingFrame) -> Result<(), ()> {
		let mut inner = self.inner.lock().await;

		let websocket_message = WebSocketMessage::from(&frame);

		inner
			.frame_sink
			.send(websocket_message)
			.await
			.map_err(|sink_error| error!("Error while sending frame: {:?}", sink_error))
	}

	async fn close(&self) {
		let mut inner = self.inner.lock().await;
		let _ = inner.frame_sink.send(WebSocketMessage::Close(None)).await;
	}
}

impl<FrameSink, SinkError> SinkMessageSender<FrameSink>
where
	FrameSink: Sink<WebSocketMessage, Error = SinkError> + Unpin,
	SinkError: Debug + 'static,
{
	pub fn new(frame_sink: FrameSink) -> Self {
		let inner = SinkMessageSenderInner { frame_sink };
		Self { inner: inner.into() }
	}
}

impl<FrameSink, SinkError> From<SinkMessageSender<FrameSink>> for MessageSender
where
	FrameSink: Sink<WebSocketMessage, Error = SinkError> + Send + Unpin + 'static,
	SinkError: Debug + 'static,
{
	fn from(sink_message_sender: SinkMessageSender<FrameSink>) -> Self {
		Arc::pin(sink_message_sender)
	}
}
