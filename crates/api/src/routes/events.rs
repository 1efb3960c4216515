//! Realtime event stream endpoint.

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{select_all, Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

use crate::app::AppState;
use crate::realtime::EventHub;

/// Rooms to join for the lifetime of the connection.
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub team: Option<String>,
    pub spoc: Option<String>,
}

/// Subscribe to request lifecycle events.
///
/// GET /api/events?team=<id>&spoc=<id>
///
/// The stream always carries the global events; the query parameters
/// additionally join the matching team/SPOC rooms for this connection.
/// Membership does not survive a reconnect: a client that reconnects
/// must pass the parameters again.
pub async fn subscribe(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.hub.prune_idle_rooms();

    let mut receivers = vec![state.hub.subscribe_global()];
    if let Some(team_id) = query.team.as_deref().filter(|id| !id.is_empty()) {
        receivers.push(state.hub.subscribe_room(&EventHub::team_room(team_id)));
    }
    if let Some(spoc_id) = query.spoc.as_deref().filter(|id| !id.is_empty()) {
        receivers.push(state.hub.subscribe_room(&EventHub::spoc_room(spoc_id)));
    }

    tracing::info!(team = ?query.team, spoc = ?query.spoc, "Realtime subscriber connected");

    let stream = select_all(receivers.into_iter().map(BroadcastStream::new)).filter_map(
        |item| async move {
            match item {
                Ok(event) => Some(Ok(Event::default()
                    .event(event.name)
                    .data(event.payload.to_string()))),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Realtime subscriber lagged; events dropped");
                    None
                }
            }
        },
    );

    Sse::new(stream).keep_alive(KeepAlive::default())
}
