use anyhow::anyhow;
use rocket::{
    http::Status,
    request::{FromRequest, Outcome},
    Request, State,
};
use serde::{
    de::{value::StrDeserializer, IntoDeserializer},
    Deserialize,
};
use tracing::{debug, info, trace, warn};

mod events;
pub use events::*;

mod signing;
use signing::SignedGitHubPayload;

use crate::webhooks::{Event, EventSender};

const X_GITHUB_EVENT: &str = "X-GitHub-Event";

pub struct GitHubSecret(pub String);

#[rocket::post("/api/webhooks/github", data = "<payload>")]
pub(crate) fn github_webhook(
    event: GitHubEventType,
    payload: SignedGitHubPayload,
    sender: &State<EventSender>,
) -> Result<&'static str, Status> {
    info!("received event {:?}", event);
    trace!("signed payload:\n{}", payload.0);

    let event = match parse_event(event, &payload.0) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!("ignoring event {:?}", event);
            return Ok("OK");
        }
        Err(e) => {
            warn!("couldn't decode {:?} payload: {}", event, e);
            return Err(Status::BadRequest);
        }
    };

    sender.0.send(Event::GitHub(event)).map_err(|_| {
        warn!("responder is gone, dropping event");
        Status::ServiceUnavailable
    })?;

    Ok("OK")
}

/// Decodes the payload of the event types the bot cares about, `None` for anything else.
fn parse_event(event_type: GitHubEventType, payload: &str) -> anyhow::Result<Option<GitHubEvent>> {
    let event = match event_type {
        GitHubEventType::IssueComment => {
            GitHubEvent::IssueComment(serde_json::from_str(payload)?)
        }
        GitHubEventType::Ping => GitHubEvent::Ping(serde_json::from_str(payload)?),
        GitHubEventType::Other => return Ok(None),
    };

    Ok(Some(event))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitHubEventType {
    IssueComment,
    Ping,
    #[serde(other)]
    Other,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for GitHubEventType {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let event_types = request.headers().get(X_GITHUB_EVENT).collect::<Vec<_>>();
        if event_types.len() != 1 {
            return Outcome::Error((
                Status::BadRequest,
                anyhow!("request header needs exactly one event type"),
            ));
        }

        let deserializer: StrDeserializer<'_, serde::de::value::Error> =
            event_types[0].into_deserializer();
        match GitHubEventType::deserialize(deserializer) {
            Ok(ev_type) => Outcome::Success(ev_type),
            Err(e) => Outcome::Error((Status::BadRequest, anyhow!(e))),
        }
    }
}
