use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// The issue or pull request a comment is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatedComment {
    pub id: u64,
    pub html_url: Url,
}

#[derive(Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

/// Anything able to post a comment on a GitHub issue.
#[async_trait]
pub trait CommentPoster: Send + Sync {
    async fn create_issue_comment(
        &self,
        target: &IssueRef,
        body: &str,
    ) -> anyhow::Result<CreatedComment>;
}

pub struct GitHubClient {
    http: reqwest::Client,
    api_url: Url,
    token: String,
}

impl GitHubClient {
    pub fn new(mut api_url: Url, token: String) -> anyhow::Result<Self> {
        // keep path prefixes such as GitHub Enterprise's `/api/v3` when joining
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("couldn't build HTTP client")?;

        Ok(Self {
            http,
            api_url,
            token,
        })
    }

    fn comments_url(&self, target: &IssueRef) -> anyhow::Result<Url> {
        self.api_url
            .join(&format!(
                "repos/{}/{}/issues/{}/comments",
                target.owner, target.repo, target.number
            ))
            .with_context(|| format!("couldn't build comments URL for {}", target))
    }
}

#[async_trait]
impl CommentPoster for GitHubClient {
    async fn create_issue_comment(
        &self,
        target: &IssueRef,
        body: &str,
    ) -> anyhow::Result<CreatedComment> {
        let url = self.comments_url(target)?;
        debug!("posting comment on {}", target);
        trace!("POST {}", url);

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&CreateComment { body })
            .send()
            .await
            .with_context(|| format!("couldn't reach GitHub to comment on {}", target))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "GitHub refused comment on {} ({}): {}",
                target,
                status,
                message
            ));
        }

        response
            .json()
            .await
            .context("couldn't decode created comment")
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn target() -> IssueRef {
        IssueRef {
            owner: "paritytech".to_string(),
            repo: "polkadot-sdk".to_string(),
            number: 4242,
        }
    }

    #[tokio::test]
    async fn test_create_issue_comment() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/paritytech/polkadot-sdk/issues/4242/comments"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/vnd.github+json"))
            .and(header("X-GitHub-Api-Version", "2022-11-28"))
            .and(body_json(serde_json::json!({ "body": "hello" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 99,
                "html_url": "https://github.com/paritytech/polkadot-sdk/pull/4242#issuecomment-99",
                "body": "hello",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(
            Url::parse(&mock_server.uri()).unwrap(),
            "test-token".to_string(),
        )
        .unwrap();
        let created = client
            .create_issue_comment(&target(), "hello")
            .await
            .unwrap();

        assert_eq!(created.id, 99);
        assert_eq!(
            created.html_url.as_str(),
            "https://github.com/paritytech/polkadot-sdk/pull/4242#issuecomment-99"
        );
    }

    #[tokio::test]
    async fn test_keeps_api_path_prefix() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v3/repos/paritytech/polkadot-sdk/issues/4242/comments"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 1,
                "html_url": "https://ghe.example.com/paritytech/polkadot-sdk/pull/4242#issuecomment-1",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api_url = Url::parse(&format!("{}/api/v3", mock_server.uri())).unwrap();
        let client = GitHubClient::new(api_url, "test-token".to_string()).unwrap();

        assert!(client.create_issue_comment(&target(), "hi").await.is_ok());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"message": "Resource not accessible by integration"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GitHubClient::new(
            Url::parse(&mock_server.uri()).unwrap(),
            "test-token".to_string(),
        )
        .unwrap();
        let err = client
            .create_issue_comment(&target(), "hello")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("403"), "{}", message);
        assert!(message.contains("paritytech/polkadot-sdk#4242"), "{}", message);
    }
}
