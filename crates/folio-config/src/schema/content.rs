use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Content overrides. When unset, the resume compiled into the binary is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub resume_path: Option<PathBuf>,
}
