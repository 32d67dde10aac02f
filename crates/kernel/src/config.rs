//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Result, bail};

/// Base path used for local builds and previews.
const ROOT_BASE_PATH: &str = "/";

/// Base path used in CI when `BASE_PATH` is unset (project pages deploy).
const DEFAULT_CI_BASE_PATH: &str = "/abo-study/";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL prefix the site is served under, always starting and ending
    /// with `/` (default: `/`, or `BASE_PATH` / `/abo-study/` in CI).
    pub base_path: String,

    /// Public site origin for absolute links (optional).
    pub site_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let in_ci = lookup("CI").is_some_and(|v| !v.is_empty() && v != "false" && v != "0");

        let base_path = if in_ci {
            normalize_base_path(
                &lookup("BASE_PATH").unwrap_or_else(|| DEFAULT_CI_BASE_PATH.to_string()),
            )
        } else {
            ROOT_BASE_PATH.to_string()
        };

        let site_url = lookup("SITE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        if let Some(url) = &site_url
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            bail!("SITE_URL must be an http(s) URL, got '{url}'");
        }

        Ok(Self {
            base_path,
            site_url,
        })
    }

    /// Site-relative URL of a document path under the base path.
    pub fn document_url(&self, document_path: &str) -> String {
        format!("{}{}", self.base_path, document_path.trim_start_matches('/'))
    }

    /// Deep link to a heading: `<base><document-path>#h-<key>`.
    pub fn deep_link(&self, document_path: &str, fragment: &str) -> String {
        let url = format!("{}#{fragment}", self.document_url(document_path));
        match &self.site_url {
            Some(origin) => format!("{origin}{url}"),
            None => url,
        }
    }
}

/// Ensure a base path starts and ends with a single `/`.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        ROOT_BASE_PATH.to_string()
    } else {
        format!("/{trimmed}/")
    }
}
