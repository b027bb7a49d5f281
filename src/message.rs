pub mod event;
pub mod inbound;
pub mod outgoing;

pub type WebSocketMessage = axum::extract::ws::Message;
