use crate::identity::{ANONYMOUS, Identity};
use crate::message::inbound::{ChatPayload, PayloadError};
use crate::room::error::RoomError;
use crate::room::name::RoomName;
use crate::server::ServerState;
use crate::session::submit;
use crate::store::model::StoredMessage;
use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

pub fn rest_api() -> Router<ServerState> {
	Router::new().route("/rooms/{room_name}/messages", post(send_message).get(history))
}

/// Error body for the HTTP entry points, loosely RFC7807-shaped.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ApiErrorResponse {
	r#type: &'static str,
	status: u16,
	message: String,
}

impl ApiErrorResponse {
	fn bad_request(r#type: &'static str, message: String) -> Self {
		Self {
			r#type,
			status: StatusCode::BAD_REQUEST.as_u16(),
			message,
		}
	}

	fn internal(message: String) -> Self {
		Self {
			r#type: "internal_server_error",
			status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
			message,
		}
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		let status_code = StatusCode::from_u16(self.status).expect("StatusCode could not be mapped.");
		(status_code, Json(self)).into_response()
	}
}

impl From<RoomError> for ApiErrorResponse {
	fn from(room_error: RoomError) -> Self {
		Self::bad_request("invalid_room_name", room_error.to_string())
	}
}

impl From<PayloadError> for ApiErrorResponse {
	fn from(payload_error: PayloadError) -> Self {
		let r#type = match payload_error {
			PayloadError::MalformedJson => "malformed_payload",
			PayloadError::InvalidContent => "invalid_message_content",
		};
		Self::bad_request(r#type, payload_error.to_string())
	}
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
	pub message: String,
	/// Display identity resolved by the caller; absent means anonymous.
	pub user: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct SendMessageResponse {
	pub status: &'static str,
	pub timestamp: DateTime<Utc>,
}

/// Synchronous submission entry point. Validates exactly like a live
/// session and then persists and publishes exactly like one, so callers
/// without a websocket reach every member of the room all the same.
async fn send_message(
	Path(room_name): Path<String>,
	State(state): State<ServerState>,
	Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiErrorResponse> {
	let room = RoomName::try_from(room_name.as_str())?;
	let payload = ChatPayload::from_content(&request.message)?;
	let identity = Identity::from_optional_name(request.user);

	let event = submit(&state.application_context, &state.router, &room, &identity, payload).await;

	Ok(Json(SendMessageResponse {
		status: "sent",
		timestamp: event.timestamp,
	}))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
	pub limit: Option<usize>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
	pub user: String,
	pub message: String,
	pub timestamp: DateTime<Utc>,
}

impl From<StoredMessage> for HistoryEntry {
	fn from(message: StoredMessage) -> Self {
		Self {
			user: message.sender_name.unwrap_or_else(|| ANONYMOUS.to_string()),
			message: message.content,
			timestamp: message.sent_at,
		}
	}
}

/// History read entry point: up to `limit` most recent messages, oldest
/// first. Unlike submissions there is nothing to fall back on here, so a
/// store failure is surfaced.
async fn history(
	Path(room_name): Path<String>,
	Query(query): Query<HistoryQuery>,
	State(state): State<ServerState>,
) -> Result<Json<Vec<HistoryEntry>>, ApiErrorResponse> {
	let room = RoomName::try_from(room_name.as_str())?;
	let ceiling = state.application_context.configuration.history_limit;
	let limit = query.limit.unwrap_or(ceiling).min(ceiling);

	let messages = state
		.application_context
		.store
		.history(&room, limit)
		.await
		.map_err(|store_error| {
			error!("Failed to read history for '{}': {}", room, store_error);
			ApiErrorResponse::internal("History is currently unavailable.".to_string())
		})?;

	Ok(Json(messages.into_iter().map(HistoryEntry::from).collect()))
}
