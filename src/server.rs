use crate::broadcast::BroadcastRouter;
use crate::broadcast::transport::InMemoryTransport;
use crate::connection::receiver::{MessageReceiver, StreamMessageReceiver};
use crate::connection::sender::{MessageSender, SinkMessageSender};
use crate::context::ApplicationContext;
use crate::identity::Identity;
use crate::infallible_stream::InfallibleStream;
use crate::room::member_id_sequence::MemberIdSequence;
use crate::room::registry::ConnectionRegistry;
use crate::session::run_session;
use axum::Router;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use futures_util::StreamExt;
use serde::Deserialize;
use std::sync::Arc;

pub mod rest_api;

/// Everything the request handlers need.
#[derive(Clone)]
pub struct ServerState {
	pub application_context: ApplicationContext,
	pub router: Arc<BroadcastRouter>,
	pub member_ids: Arc<MemberIdSequence>,
}

impl ServerState {
	pub fn new(application_context: ApplicationContext) -> Self {
		let registry = Arc::new(ConnectionRegistry::default());
		let transport = Arc::new(InMemoryTransport::new(
			application_context.configuration.broadcast_capacity,
		));
		let router = Arc::new(BroadcastRouter::new(
			registry,
			transport,
			application_context.configuration.delivery_timeout,
		));

		Self {
			application_context,
			router,
			member_ids: Arc::new(MemberIdSequence::default()),
		}
	}
}

pub async fn run_server(application_context: ApplicationContext) -> Result<(), std::io::Error> {
	let address = application_context.configuration.address;
	let state = ServerState::new(application_context);

	axum_server::bind(address)
		.serve(create_router(state).into_make_service())
		.await
}

pub fn create_router(state: ServerState) -> Router {
	Router::new()
		.route("/ws/{room_name}", get(websocket))
		.nest("/api", rest_api::rest_api())
		.with_state(state)
}

#[derive(Deserialize)]
struct WebSocketQuery {
	/// Display identity resolved by the authentication layer in front of
	/// this server; absent means anonymous.
	user: Option<String>,
}

async fn websocket(
	websocket_upgrade: WebSocketUpgrade,
	Path(room_name): Path<String>,
	Query(query): Query<WebSocketQuery>,
	State(state): State<ServerState>,
) -> Response {
	websocket_upgrade.on_upgrade(move |websocket| {
		let (sink, stream) = websocket.split();

		let message_sender = MessageSender::from(SinkMessageSender::new(sink));
		let message_receiver = MessageReceiver::from(StreamMessageReceiver::new(InfallibleStream::from(stream)));

		run_session(
			state.application_context,
			state.router,
			state.member_ids,
			room_name,
			Identity::from_optional_name(query.user),
			message_sender,
			message_receiver,
		)
	})
}
