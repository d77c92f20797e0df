use axum::{Json, body::Bytes, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct EventPayload {
    pub event: Event,
}

#[derive(Deserialize, Debug)]
pub struct Event {
    pub op: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Deserialize, Debug, Default)]
pub struct EventData {
    pub new: Option<EventUser>,
}

#[derive(Deserialize, Debug)]
pub struct EventUser {
    pub id: String,
    pub username: String,
}

/// POST /events - row change notifications from the GraphQL engine.
///
/// Always acknowledged so the engine does not redeliver.
pub async fn receive(body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<EventPayload>(&body) {
        Ok(payload) => handle(payload.event),
        Err(e) => tracing::warn!(error = %e, "undecodable event payload"),
    }

    (StatusCode::OK, Json(json!({"status": "ok"})))
}

fn handle(event: Event) {
    match (event.op.as_str(), event.data.new) {
        ("INSERT", Some(user)) => {
            tracing::info!(id = %user.id, username = %user.username, "user created");
        }
        (op, _) => tracing::debug!(op, "event ignored"),
    }
}
