//! Render inputs
//!
//! Input is either plain report text or a JSON job record as stored by
//! the generation service:
//!
//! ```json
//! { "content": "...", "client_name": "...", "workflow_title": "...", "job_id": "..." }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A completed generation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Report text
    pub content: String,
    /// Recipient shown in the page footer
    #[serde(default)]
    pub client_name: String,
    /// Title shown in the page header
    #[serde(default)]
    pub workflow_title: String,
    /// Job identifier, used as the output file stem
    #[serde(default)]
    pub job_id: String,
}

impl Job {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Text to render plus whatever metadata came with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInput {
    pub content: String,
    pub title: Option<String>,
    pub recipient: Option<String>,
    /// Output file stem
    pub stem: String,
}

impl RenderInput {
    /// Read an input file; `.json` files are job records
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display()))?;
        let file_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string());

        let is_job = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_job {
            return Ok(Self {
                content: text,
                title: None,
                recipient: None,
                stem: file_stem,
            });
        }

        let job = Job::from_json_str(&text)
            .with_context(|| format!("Invalid job file: {}", path.display()))?;
        Ok(Self {
            content: job.content,
            title: non_empty(job.workflow_title),
            recipient: non_empty(job.client_name),
            stem: non_empty(job.job_id).unwrap_or(file_stem),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
