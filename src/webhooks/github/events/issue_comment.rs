use serde::Deserialize;

use crate::{
    github::IssueRef,
    webhooks::github::events::{Comment, GitHubUser, Issue, Repository},
};

#[derive(Debug, Deserialize)]
pub struct IssueCommentEvent {
    pub sender: Option<GitHubUser>,
    pub repository: Repository,
    pub issue: Issue,
    pub action: IssueCommentAction,
    pub comment: Comment,
}

impl IssueCommentEvent {
    /// The issue (or pull request) this comment was posted on.
    pub fn target(&self) -> IssueRef {
        IssueRef {
            owner: self.repository.owner.login.clone(),
            repo: self.repository.name.clone(),
            number: self.issue.number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCommentAction {
    Created,
    Edited,
    Deleted,
}
