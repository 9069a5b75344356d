use std::{env, fs::File, io::BufReader, path::Path};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Default, Deserialize)]
pub struct InformConfig {
    /// Secret shared with GitHub, used to verify webhook signatures
    pub github_secret: Option<String>,
    /// Token used to post comments through the GitHub REST API
    pub github_token: Option<String>,
    /// Root of the GitHub REST API. Anything under a GitHub Enterprise path prefix works too.
    pub github_api_url: Option<Url>,
    /// When set to `false`, matching comments are logged but never answered.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl InformConfig {
    /// Reads the YAML configuration at `path`, or starts from defaults when no file is given,
    /// then fills the GitHub token and API URL from the Actions environment if they are unset.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::from_path(path)?;
        config.fill_from_env(env::var("GITHUB_TOKEN").ok(), env::var("GITHUB_API_URL").ok())?;

        Ok(config)
    }

    fn from_path(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("couldn't open {}:", path.display()))?;
                serde_yaml::from_reader(BufReader::new(file)).context("couldn't parse config file")
            }
            None => Ok(Self {
                enabled: true,
                ..Default::default()
            }),
        }
    }

    /// Values from the configuration file win over the environment.
    fn fill_from_env(
        &mut self,
        token: Option<String>,
        api_url: Option<String>,
    ) -> anyhow::Result<()> {
        if self.github_token.is_none() {
            self.github_token = token;
        }
        if self.github_api_url.is_none() {
            if let Some(url) = api_url {
                self.github_api_url =
                    Some(Url::parse(&url).context("GITHUB_API_URL isn't a valid URL")?);
            }
        }

        Ok(())
    }

    pub fn api_url(&self) -> anyhow::Result<Url> {
        match &self.github_api_url {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(DEFAULT_API_URL)?),
        }
    }

    pub fn token(&self) -> anyhow::Result<&str> {
        self.github_token
            .as_deref()
            .ok_or_else(|| anyhow!("no GitHub token configured (set github_token or GITHUB_TOKEN)"))
    }

    pub fn secret(&self) -> anyhow::Result<&str> {
        self.github_secret
            .as_deref()
            .ok_or_else(|| anyhow!("serving webhooks requires github_secret to be configured"))
    }
}
