use crate::contributions::EPOCH_YEAR;
use crate::github::DEFAULT_API_URL;
use crate::repos::DEFAULT_MAX_PAGES;
use anyhow::Result;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOGIN: &str = "halfguru";

#[derive(Parser, Debug)]
#[command(name = "github-stats-card")]
#[command(about = "Render a GitHub contribution and language stats card as SVG")]
#[command(version)]
pub struct Cli {
    /// GitHub access token
    #[arg(long, env = "ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub login to report on
    #[arg(long, env = "GITHUB_LOGIN", default_value = DEFAULT_LOGIN)]
    pub login: String,

    /// GitHub REST API root; GraphQL is served at `<api-url>/graphql`
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory the cards are written to
    #[arg(long, env = "STATS_OUTPUT_DIR", default_value = "generated")]
    pub output_dir: PathBuf,

    /// Also write copies whose file name carries the generation time
    #[arg(long, env = "STATS_TIMESTAMPED")]
    pub timestamped: bool,

    /// Number of languages shown on the card
    #[arg(long, default_value_t = 6)]
    pub top_languages: usize,

    /// First year to fetch contributions for
    #[arg(long, default_value_t = EPOCH_YEAR)]
    pub since_year: i32,

    /// Upper bound on repository pages fetched, for both the owned
    /// repository listing and the contributed-to count
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_repo_pages: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct Config {
    pub token: String,
    pub login: String,
    pub api_url: String,
    pub output_dir: PathBuf,
    pub timestamped: bool,
    pub top_languages: usize,
    pub since_year: i32,
    pub max_repo_pages: u32,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("login", &self.login)
            .field("api_url", &self.api_url)
            .field("output_dir", &self.output_dir)
            .field("timestamped", &self.timestamped)
            .field("top_languages", &self.top_languages)
            .field("since_year", &self.since_year)
            .field("max_repo_pages", &self.max_repo_pages)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Cli {
    /// Validate arguments. A missing or blank token is fatal.
    pub fn into_config(self) -> Result<Config> {
        let token = self
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow::anyhow!("ACCESS_TOKEN environment variable not set"))?;

        let login = self.login.trim().to_string();
        if login.is_empty() {
            anyhow::bail!("GitHub login must not be empty");
        }

        Ok(Config {
            token,
            login,
            api_url: self.api_url,
            output_dir: self.output_dir,
            timestamped: self.timestamped,
            top_languages: self.top_languages,
            since_year: self.since_year,
            max_repo_pages: self.max_repo_pages.max(1),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        })
    }
}
