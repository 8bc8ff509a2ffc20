//! Template Renderer Port - turns directory results into an HTML fragment.

use serde::Serialize;
use thiserror::Error;

use crate::domain::search::{DirectoryRecord, SearchCriteria};

/// Template used for the directory listing.
pub const DIRECTORY_TEMPLATE: &str = "directory/ldap.html";

/// Errors that can occur while rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Rendering failed: {0}")]
    Failed(String),
}

/// Model handed to the directory template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryModel {
    /// Logical field keys, in display order.
    pub columns: Vec<String>,
    #[serde(rename = "persons_list")]
    pub persons: Vec<DirectoryRecord>,
    #[serde(rename = "criteria_list")]
    pub criteria: SearchCriteria,
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, model: &DirectoryModel) -> Result<String, RenderError>;
}
