use crate::connection::receiver::{MessageReceiver, StreamMessageReceiver};
use crate::connection::sender::{MessageSender, SinkMessageSender};
use crate::message::WebSocketMessage;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde_json::{Value, json};
use std::pin::Pin;

/// Client end of an in-memory connection, paired with the server-side
/// sender/receiver handles a session consumes.
pub struct TestClient {
	sender: Pin<Box<dyn Sink<WebSocketMessage, Error = ()> + Unpin + Send>>,
	receiver: Pin<Box<dyn Stream<Item = WebSocketMessage> + Unpin + Send>>,
}

impl TestClient {
	pub fn new() -> (MessageSender, MessageReceiver, Self) {
		let (client_sender, server_receiver) = futures_channel::mpsc::unbounded();
		let (server_sender, client_receiver) = futures_channel::mpsc::unbounded();
		let client_sender = client_sender.sink_map_err(|_error| ());

		let message_sender = MessageSender::from(SinkMessageSender::new(server_sender));
		let message_receiver = MessageReceiver::from(StreamMessageReceiver::new(server_receiver));

		let test_client = Self {
			sender: Box::pin(client_sender),
			receiver: Box::pin(client_receiver),
		};

		(message_sender, message_receiver, test_client)
	}

	pub async fn send_raw(&mut self, message: WebSocketMessage) {
		self.sender
			.send(message)
			.await
			.expect("Failed to send message via TestClient.");
	}

	pub async fn send_text(&mut self, text: &str) {
		self.send_raw(WebSocketMessage::Text(text.to_string().into())).await;
	}

	pub async fn send_chat(&mut self, message: &str) {
		self.send_text(&json!({"message": message}).to_string()).await;
	}

	pub async fn receive_raw(&mut self) -> WebSocketMessage {
		self.receiver
			.next()
			.await
			.expect("Failed to receive message via TestClient")
	}

	pub async fn receive_json(&mut self) -> Value {
		match self.receive_raw().await {
			WebSocketMessage::Text(text) => {
				serde_json::from_str(text.as_str()).expect("Received frame was not valid JSON")
			}
			_ => panic!("Received non-text frame"),
		}
	}

	pub async fn receive_error(&mut self) -> String {
		let frame = self.receive_json().await;
		frame["error"]
			.as_str()
			.unwrap_or_else(|| panic!("Received frame was not an error frame: {frame}"))
			.to_string()
	}

	/// Receives an event frame and returns `(user, message, timestamp)`.
	pub async fn receive_event(&mut self) -> (String, String, String) {
		let frame = self.receive_json().await;
		let field = |name: &str| {
			frame[name]
				.as_str()
				.unwrap_or_else(|| panic!("Received frame was not an event frame: {frame}"))
				.to_string()
		};
		(field("user"), field("message"), field("timestamp"))
	}

	pub async fn receive_close(&mut self) {
		match self.receive_raw().await {
			WebSocketMessage::Close(_) => {}
			message => panic!("Expected a close frame, got {message:?}"),
		}
	}
}
