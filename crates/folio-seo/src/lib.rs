//! Build-time site artifacts: `sitemap.xml`, `rss.xml`, `feed.json` and
//! `robots.txt`, generated from the article list and site metadata.
//!
//! All generators are pure; the build time is passed in so output is
//! reproducible.

pub mod dates;
pub mod feeds;
pub mod robots;
pub mod sitemap;
pub mod text;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use folio_config::SiteConfig;
use folio_content::Article;
use tracing::info;

pub use feeds::{generate_json_feed, generate_rss};
pub use robots::generate_robots_txt;
pub use sitemap::generate_sitemap;

#[derive(Debug, thiserror::Error)]
pub enum SeoError {
    #[error("failed to serialize feed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The four generated files, ready to be written.
#[derive(Debug, Clone)]
pub struct SiteArtifacts {
    pub sitemap: String,
    pub rss: String,
    pub json_feed: String,
    pub robots: String,
}

impl SiteArtifacts {
    pub fn generate(
        site: &SiteConfig,
        articles: &[Article],
        now: DateTime<Utc>,
    ) -> Result<Self, SeoError> {
        Ok(Self {
            sitemap: generate_sitemap(site, articles, now.date_naive()),
            rss: generate_rss(site, articles, now),
            json_feed: generate_json_feed(site, articles, now)?,
            robots: generate_robots_txt(site),
        })
    }

    /// Write every artifact into `dir`, creating it if needed. Returns the
    /// written paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, SeoError> {
        std::fs::create_dir_all(dir).map_err(|source| SeoError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let files = [
            ("sitemap.xml", &self.sitemap),
            ("rss.xml", &self.rss),
            ("feed.json", &self.json_feed),
            ("robots.txt", &self.robots),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = dir.join(name);
            std::fs::write(&path, content).map_err(|source| SeoError::Write {
                path: path.clone(),
                source,
            })?;
            info!("Generated {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
