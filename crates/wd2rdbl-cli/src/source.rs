//! Input sources for the convert command.

use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use wd2rdbl_domain::namespace::WD_DATA;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Where an entity document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input (`-`)
    Stdin,
    /// Local file
    File(PathBuf),
    /// Remote document (an http(s) URL, or the data URL of an entity id)
    Url(String),
}

impl Source {
    /// Interpret a command-line argument.
    ///
    /// Bare entity ids (`Q42`, `M123`) resolve to their `Special:EntityData`
    /// dump URL unless a file of that name exists.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            Source::Url(arg.to_string())
        } else if is_entity_id(arg) && !Path::new(arg).exists() {
            Source::Url(entity_data_url(arg))
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Read and parse the document.
    pub async fn load(&self, client: &reqwest::Client) -> Result<Value> {
        let data = match self {
            Source::Stdin => {
                let mut buffer = String::new();
                tokio::io::stdin().read_to_string(&mut buffer).await?;
                serde_json::from_str(&buffer)?
            }
            Source::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                serde_json::from_str(&contents)?
            }
            Source::Url(url) => {
                tracing::debug!("Fetching {}", url);
                client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<Value>()
                    .await?
            }
        };
        Ok(data)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "-"),
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

/// HTTP client for remote sources
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("wd2rdbl/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Dump-flavored JSON data URL of an entity
pub fn entity_data_url(id: &str) -> String {
    format!("{}{}.json?flavor=dump", WD_DATA, id)
}

/// `Q42`, `P31`, `L7`, `M123`
fn is_entity_id(arg: &str) -> bool {
    let mut chars = arg.chars();
    matches!(chars.next(), Some('Q' | 'P' | 'L' | 'M'))
        && arg.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}
