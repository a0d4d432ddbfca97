//! # Printing Service
//!
//! Boundary to whatever actually prints a resolved job. The core only needs to
//! list queues and submit jobs; uploading documents, authentication and the
//! wire format belong to the implementation behind [`PrintingService`].
//!
//! [`ConsolePrinter`] is the in-process implementation used for local runs and
//! tests.

pub mod console;

pub use console::ConsolePrinter;

use crate::resolver::ResolvedPrintJob;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A print queue offered by the printing service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintQueue {
    #[serde(rename = "ID")]
    pub id: String,
    pub description: String,
}

impl PrintQueue {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Acknowledgement of a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReceipt {
    pub job_id: String,
    pub queue_id: String,
    pub copies: u32,
    pub documents: usize,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintServiceError {
    #[error("Print queue not found: {queue}")]
    QueueNotFound { queue: String },

    #[error("Error in uploading document {file_name}: {message}")]
    DocumentUpload { file_name: String, message: String },

    #[error("Print task failed: {message}")]
    Submission { message: String },

    #[error("Print service unavailable: {message}")]
    Unavailable { message: String },
}

impl PrintServiceError {
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A service that prints resolved jobs
#[async_trait]
pub trait PrintingService: Send + Sync {
    /// Queues jobs may be sent to
    async fn list_queues(&self) -> Result<Vec<PrintQueue>, PrintServiceError>;

    /// Submit a resolved job to its queue
    async fn submit_job(&self, job: &ResolvedPrintJob) -> Result<JobReceipt, PrintServiceError>;
}
