use std::fmt::Display;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::responder::utils::shorten_content;

mod issue_comment;
mod ping;

pub use issue_comment::*;
pub use ping::*;

#[derive(Debug)]
pub enum GitHubEvent {
    IssueComment(IssueCommentEvent),
    Ping(PingEvent),
}

#[derive(Debug, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: GitHubUser,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: Option<String>,
    // an issue can be a PR, in this case the object contains a `pull_request` key with urls to the
    // PR. Only its truthiness matters.
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        match &self.pull_request {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().map_or(false, |n| n != 0.0),
            Some(Value::Array(_)) | Some(Value::Object(_)) | Some(Value::Bool(true)) => true,
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.title {
            Some(title) => write!(f, "#{} ({})", self.number, shorten_content(title)),
            None => write!(f, "#{}", self.number),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub html_url: Option<Url>,
    pub body: String,
}

impl Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", shorten_content(&self.body))?;
        if let Some(url) = &self.html_url {
            write!(f, " ({})", url)?;
        }
        Ok(())
    }
}
