use rocket::{routes, Build, Rocket};
use tokio::sync::mpsc::UnboundedSender;

pub mod github;
pub use github::{GitHubEvent, GitHubSecret};

pub struct EventSender(pub UnboundedSender<Event>);

#[derive(Debug)]
pub enum Event {
    GitHub(GitHubEvent),
}

/// Builds the webhook server, forwarding every accepted delivery to `sender`.
pub fn server(secret: GitHubSecret, sender: EventSender) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![github::github_webhook])
        .manage(sender)
        .manage(secret)
}
