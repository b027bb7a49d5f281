use crate::broadcast::BroadcastRouter;
use crate::connection::receiver::{MessageReceiver, ReceivedFrame};
use crate::connection::sender::MessageSender;
use crate::context::ApplicationContext;
use crate::identity::Identity;
use crate::message::event::BroadcastEvent;
use crate::message::inbound::{ChatPayload, PayloadError};
use crate::message::outgoing::OutgoingFrame;
use crate::room::member::Member;
use crate::room::member_id::MemberId;
use crate::room::member_id_sequence::MemberIdSequence;
use crate::room::name::RoomName;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::sync::Arc;
use tracing::{error, info, warn};

const QUOTA: Quota = Quota::per_second(nonzero!(1u32)).allow_burst(nonzero!(10u32));

/// Drives one connection through its lifetime.
///
/// A connection starts out unjoined: the requested room name is validated
/// and the member registered, or the connection is rejected and closed
/// without ever joining. Once joined, every inbound frame is validated,
/// persisted and fanned out until the transport goes away, which removes
/// the member again. There is no way back from that.
pub async fn run_session(
	application_context: ApplicationContext,
	router: Arc<BroadcastRouter>,
	member_ids: Arc<MemberIdSequence>,
	requested_room: String,
	identity: Identity,
	message_sender: MessageSender,
	message_receiver: MessageReceiver,
) {
	let Some(session) = join_room(&router, &member_ids, &requested_room, identity, message_sender).await else {
		return;
	};

	handle_messages(&application_context, &router, &session, message_receiver).await;

	router.detach(&session.room, session.member_id);
	info!("'{}' left room '{}'.", session.identity, session.room);
}

struct Session {
	room: RoomName,
	member_id: MemberId,
	identity: Identity,
	sender: MessageSender,
}

async fn join_room(
	router: &BroadcastRouter,
	member_ids: &MemberIdSequence,
	requested_room: &str,
	identity: Identity,
	message_sender: MessageSender,
) -> Option<Session> {
	let room = match RoomName::try_from(requested_room) {
		Ok(room) => room,
		Err(room_error) => {
			warn!("Rejected join attempt with invalid room name {:?}.", requested_room);
			let _ = message_sender
				.send_frame(OutgoingFrame::error(room_error.to_string()))
				.await;
			message_sender.close().await;
			return None;
		}
	};

	let member_id = member_ids.next();
	router.attach(&room, Member::new(member_id, identity.clone(), message_sender.clone()));
	info!("'{}' joined room '{}'.", identity, room);

	Some(Session {
		room,
		member_id,
		identity,
		sender: message_sender,
	})
}

async fn handle_messages(
	application_context: &ApplicationContext,
	router: &BroadcastRouter,
	session: &Session,
	mut message_receiver: MessageReceiver,
) {
	let rate_limiter = RateLimiter::direct(QUOTA);
	loop {
		let text = match message_receiver.receive().await {
			ReceivedFrame::Text(text) => text,
			ReceivedFrame::Unsupported => {
				let _ = session
					.sender
					.send_frame(OutgoingFrame::error(PayloadError::MalformedJson.to_string()))
					.await;
				continue;
			}
			ReceivedFrame::Closed => break,
		};

		// Rate limit after receipt so protocol frames are not starved.
		rate_limiter.until_ready().await;

		let payload = match ChatPayload::parse(&text) {
			Ok(payload) => payload,
			Err(payload_error) => {
				warn!(
					"Rejected submission from '{}' in '{}': {:?}",
					session.identity, session.room, payload_error
				);
				let _ = session
					.sender
					.send_frame(OutgoingFrame::error(payload_error.to_string()))
					.await;
				continue;
			}
		};

		submit(application_context, router, &session.room, &session.identity, payload).await;
	}
}

/// Persists a validated submission and publishes the live event.
///
/// Both ingress paths end up here, so a message submitted over HTTP is
/// indistinguishable from one submitted over a live connection. A
/// persistence failure is logged and delivery proceeds from the in-memory
/// event; history is best-effort relative to live fan-out.
pub async fn submit(
	application_context: &ApplicationContext,
	router: &BroadcastRouter,
	room: &RoomName,
	identity: &Identity,
	payload: ChatPayload,
) -> BroadcastEvent {
	let instant = application_context.clock.next();

	if let Err(store_error) = application_context
		.store
		.append(room, identity.stored_name(), payload.content(), instant)
		.await
	{
		error!("Failed to store message in '{}': {}", room, store_error);
	}

	let event = BroadcastEvent::builder()
		.room(room.clone())
		.user(identity.display_name().to_string())
		.message(payload.into_content())
		.timestamp(instant.timestamp)
		.build();
	router.publish(event.clone());
	event
}
