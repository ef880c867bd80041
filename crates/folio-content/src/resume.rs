//! Resume record.
//!
//! Field names serialize in camelCase so the JSON handed to the assistant
//! matches the document shipped with the site.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ContentError;

const BUILTIN_RESUME: &str = include_str!("../data/resume.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainInfo {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub experience: String,
    pub uptime: String,
    pub years_experience: String,
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceItem {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    pub name: String,
    pub credential_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub year: u16,
    pub university: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Everything the portfolio knows about its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub main: MainInfo,
    pub profile_summary: String,
    pub work_experience: Vec<WorkExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<CertificationItem>,
    pub skills: Vec<SkillCategory>,
    pub education: EducationItem,
    pub social_links: Vec<SocialLink>,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
}

impl Resume {
    /// The resume compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json_str(BUILTIN_RESUME)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a resume override from a JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let resume = Self::from_json_str(&content)?;
        info!("loaded resume for {} from {}", resume.main.name, path.display());
        Ok(resume)
    }

    /// Given name, used in greetings ("Shahid" for "Shahid Moosa").
    pub fn first_name(&self) -> &str {
        self.main
            .name
            .split_whitespace()
            .next()
            .unwrap_or(&self.main.name)
    }
}
