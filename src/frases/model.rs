use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FrasesError, Result};

fn default_category() -> String {
    "other".to_string()
}

fn default_license() -> String {
    "unknown".to_string()
}

/// One quotation record as loaded from the dataset snapshot.
///
/// Records are immutable for the life of the process; the dataset is
/// replaced wholesale by restarting with a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default = "default_license")]
    pub license: String,
}

impl Quote {
    /// Trims `text` and rejects the record if nothing is left.
    pub fn validated(mut self) -> Result<Self> {
        self.text = self.text.trim().to_string();
        if self.text.is_empty() {
            return Err(FrasesError::Validation("text must not be empty".into()));
        }
        Ok(self)
    }
}

/// A user-proposed quote, as posted to the submit endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubmission {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

impl NewSubmission {
    /// Boundary validation: trims `text` and rejects empty submissions
    /// before they ever reach the queue.
    pub fn validated(mut self) -> Result<Self> {
        self.text = self.text.trim().to_string();
        if self.text.is_empty() {
            return Err(FrasesError::Validation("text must not be empty".into()));
        }
        Ok(self)
    }
}

/// A queued submission awaiting moderation. Entries are never mutated;
/// promotion into the dataset or deletion happens outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSubmission {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl PendingSubmission {
    /// Accept a validated submission: assign a fresh id and fill in the
    /// submission defaults.
    pub fn accept(submission: NewSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: submission.text,
            author: submission.author.unwrap_or_else(|| "Anonymous".to_string()),
            category: submission
                .category
                .unwrap_or_else(|| "general".to_string()),
            source_url: submission.source_url,
            license: submission.license,
        }
    }
}
