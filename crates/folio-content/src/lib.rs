//! Static site content: the resume record fed to the chat assistant and
//! the blog article list used by the feed and sitemap generators.
//!
//! Both are embedded at build time from `data/*.json`; a resume override
//! can be loaded from disk.

pub mod articles;
pub mod resume;

pub use articles::{builtin_articles, Article};
pub use resume::{
    CertificationItem, EducationItem, MainInfo, ProjectItem, Resume, SkillCategory, SocialLink,
    WorkExperienceItem,
};

/// Errors raised while loading content documents.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
}
