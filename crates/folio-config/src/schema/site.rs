//! Site metadata used by the feed and sitemap generators.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute base URL, without trailing slash.
    pub site_url: String,
    pub blog_title: String,
    pub blog_description: String,
    pub language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Shahid Moosa".into(),
            site_url: "https://shahidster.tech".into(),
            blog_title: "Shahid Moosa - Distributed Systems Engineering".into(),
            blog_description: "Deep dives into distributed databases, data infrastructure, and production systems. Written by a senior distributed-systems engineer.".into(),
            language: "en-us".into(),
        }
    }
}

impl SiteConfig {
    /// `site_url` with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}
