//! Configuration schema types for Folio.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod content;
mod logging;
mod site;

pub use chat::*;
pub use content::*;
pub use logging::*;
pub use site::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub chat: ChatConfig,
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}
