use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, trace, warn};

use crate::{
    github::{CommentPoster, CreatedComment},
    webhooks::{
        github::{IssueCommentAction, IssueCommentEvent},
        Event, GitHubEvent,
    },
};

pub(crate) mod message_builder;

mod notice;
use notice::migration_notice;

pub(crate) mod utils;

/// Comments starting with this prefix were commands for the old bot.
const COMMAND_PREFIX: &str = "bot ";

/// Answers old-style `bot ...` commands on pull requests with a pointer to the new command bot.
pub struct Responder<P> {
    poster: P,
    enabled: bool,
}

impl<P: CommentPoster> Responder<P> {
    pub fn new(poster: P, enabled: bool) -> Self {
        Self { poster, enabled }
    }

    /// Whether `event` is a freshly posted `bot ...` comment on a pull request.
    pub fn should_respond(event: &IssueCommentEvent) -> bool {
        event.action == IssueCommentAction::Created
            && event.issue.is_pull_request()
            && event.comment.body.starts_with(COMMAND_PREFIX)
    }

    /// Posts the migration notice if `event` triggers it. Returns `None` when nothing was
    /// posted.
    ///
    /// Failures of the GitHub call are returned as-is, nothing is retried.
    pub async fn respond(
        &self,
        event: &IssueCommentEvent,
    ) -> anyhow::Result<Option<CreatedComment>> {
        if !Self::should_respond(event) {
            trace!("comment {} doesn't need an answer", event.comment);
            return Ok(None);
        }

        if !self.enabled {
            let sender = event
                .sender
                .as_ref()
                .map_or("someone", |sender| sender.login.as_str());
            info!(
                "{} used an old command on {}, but answering is disabled: {}",
                sender, event.issue, event.comment
            );
            return Ok(None);
        }

        let target = event.target();
        let notice = migration_notice()?;
        debug!("answering {} with `{}`", target, notice.plain);

        let created = self
            .poster
            .create_issue_comment(&target, &notice.body)
            .await?;
        info!(
            "posted migration notice {} on {}: {}",
            created.id, target, created.html_url
        );

        Ok(Some(created))
    }

    /// Reads one `issue_comment` payload from disk, as GitHub Actions provides it, and answers it.
    pub async fn respond_to_file(
        &self,
        event_path: &Path,
    ) -> anyhow::Result<Option<CreatedComment>> {
        let event_file = File::open(event_path)
            .with_context(|| format!("couldn't open {}:", event_path.display()))?;
        let event: IssueCommentEvent = serde_json::from_reader(BufReader::new(event_file))
            .context("couldn't parse issue_comment payload")?;

        self.respond(&event).await
    }

    /// Handle events until every sender is dropped.
    pub async fn run(&self, mut events: UnboundedReceiver<Event>) {
        debug!("running...");

        loop {
            let event = match events.recv().await {
                Some(event) => event,
                None => {
                    info!("all channel senders were dropped, exiting receive loop");
                    break;
                }
            };
            debug!("received event: {:?}", event);

            if let Err(e) = self.handle_event(event).await {
                warn!("encountered error while handling event: {:#}", e);
            }
        }
    }

    async fn handle_event(&self, event: Event) -> anyhow::Result<()> {
        match event {
            Event::GitHub(GitHubEvent::IssueComment(event)) => {
                self.respond(&event).await?;
            }
            Event::GitHub(GitHubEvent::Ping(event)) => {
                info!("webhook {} is set up: {}", event.hook_id, event.zen);
            }
        }

        Ok(())
    }
}
