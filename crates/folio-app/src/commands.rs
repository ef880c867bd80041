//! Subcommand handlers.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use folio_ai::{SendOutcome, Session};
use folio_common::{FolioError, Result};
use folio_config::schema::{ContentConfig, FolioConfig};
use folio_content::Resume;
use folio_seo::SiteArtifacts;
use tracing::info;

use crate::terminal;

/// Built-in resume unless `[content] resume_path` points elsewhere.
pub fn load_resume(content: &ContentConfig) -> Result<Resume> {
    let resume = match &content.resume_path {
        Some(path) => {
            info!("Using resume override: {}", path.display());
            Resume::from_json_path(path)
        }
        None => Resume::builtin(),
    };
    resume.map_err(|e| FolioError::Content(e.to_string()))
}

pub async fn chat(config: &FolioConfig, resume: &Resume) -> Result<()> {
    let session = Session::from_env(&config.chat, resume);
    terminal::run_chat(&session).await?;
    Ok(())
}

pub async fn ask(config: &FolioConfig, resume: &Resume, question: &str) -> Result<()> {
    let session = Session::from_env(&config.chat, resume);
    if let Some(reason) = session.degraded_reason() {
        return Err(FolioError::Ai(reason.to_string()));
    }

    let mut stdout = io::stdout();
    match terminal::stream_reply(&session, question, &mut stdout).await? {
        SendOutcome::Completed { .. } => Ok(()),
        SendOutcome::Failed(e) => Err(FolioError::Ai(e.to_string())),
        SendOutcome::Ignored(reason) => {
            Err(FolioError::Other(format!("question not sent: {reason:?}")))
        }
    }
}

pub fn prompt(resume: &Resume) -> Result<()> {
    let prompt = folio_ai::prompt::build_system_prompt(resume)
        .map_err(|e| FolioError::Content(e.to_string()))?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{prompt}")?;
    Ok(())
}

pub fn show_config(config: &FolioConfig) -> Result<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", folio_config::config_to_json(config))?;
    Ok(())
}

pub fn seo(config: &FolioConfig, out: &Path) -> Result<()> {
    let articles =
        folio_content::builtin_articles().map_err(|e| FolioError::Content(e.to_string()))?;
    let artifacts = SiteArtifacts::generate(&config.site, &articles, Utc::now())
        .map_err(|e| FolioError::Seo(e.to_string()))?;
    let written = artifacts
        .write_to_dir(out)
        .map_err(|e| FolioError::Seo(e.to_string()))?;

    let mut stdout = io::stdout();
    for path in written {
        writeln!(stdout, "{}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_override_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        let mut resume = Resume::builtin().unwrap();
        resume.main.name = "Ada Lovelace".into();
        std::fs::write(&path, serde_json::to_string(&resume).unwrap()).unwrap();

        let loaded = load_resume(&ContentConfig {
            resume_path: Some(path),
        })
        .unwrap();
        assert_eq!(loaded.main.name, "Ada Lovelace");
    }

    #[test]
    fn missing_resume_override_is_content_error() {
        let err = load_resume(&ContentConfig {
            resume_path: Some("/nonexistent/resume.json".into()),
        })
        .unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }

    #[test]
    fn seo_writes_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        seo(&FolioConfig::default(), dir.path()).unwrap();
        assert!(dir.path().join("feed.json").exists());
        assert!(dir.path().join("sitemap.xml").exists());
    }
}
