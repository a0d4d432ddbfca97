//! Console printer: accepts jobs for a fixed list of queues and writes their
//! details to the log instead of a device.

use super::{JobReceipt, PrintQueue, PrintServiceError, PrintingService};
use crate::config::PrinterSettings;
use crate::resolver::ResolvedPrintJob;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tracing::{info, trace};
use uuid::Uuid;

/// Longest content preview written to the trace log, in bytes
const PREVIEW_BYTES: usize = 64;

/// Receipts kept for inspection; older ones are dropped
pub const RECENT_RECEIPTS: usize = 32;

#[derive(Debug)]
pub struct ConsolePrinter {
    queues: Vec<PrintQueue>,
    receipt_capacity: usize,
    submitted: Mutex<VecDeque<JobReceipt>>,
}

impl ConsolePrinter {
    pub fn new<I, S>(queues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queues: queues
                .into_iter()
                .map(|id| PrintQueue::new(id, "Console queue"))
                .collect(),
            receipt_capacity: RECENT_RECEIPTS,
            submitted: Mutex::new(VecDeque::new()),
        }
    }

    /// Keep at most `capacity` receipts
    pub fn with_receipt_capacity(mut self, capacity: usize) -> Self {
        self.receipt_capacity = capacity;
        self
    }

    pub fn from_settings(settings: &PrinterSettings) -> Self {
        info!(queues = settings.queues.len(), "Print service initialized for console mode");
        Self::new(settings.queues.iter().cloned())
    }

    /// Receipts of the most recently accepted jobs, oldest first
    pub async fn submitted(&self) -> Vec<JobReceipt> {
        self.submitted.lock().await.iter().cloned().collect()
    }
}

impl Default for ConsolePrinter {
    fn default() -> Self {
        Self::from_settings(&PrinterSettings::default())
    }
}

#[async_trait]
impl PrintingService for ConsolePrinter {
    async fn list_queues(&self) -> Result<Vec<PrintQueue>, PrintServiceError> {
        Ok(self.queues.clone())
    }

    async fn submit_job(&self, job: &ResolvedPrintJob) -> Result<JobReceipt, PrintServiceError> {
        if !self.queues.iter().any(|q| q.id == job.queue_id) {
            return Err(PrintServiceError::QueueNotFound {
                queue: job.queue_id.clone(),
            });
        }

        let job_id = format!("console-task-{}", Uuid::new_v4());

        info!(
            job_id = %job_id,
            queue = %job.queue_id,
            copies = job.copies,
            documents = job.documents.len(),
            "PRINT JOB DETAILS"
        );
        for (index, document) in job.documents.iter().enumerate() {
            info!(
                job_id = %job_id,
                document = index + 1,
                file_name = %document.file_name,
                main_document = document.is_main_document,
                bytes = document.content.len(),
                "Document"
            );

            let end = document.content.len().min(PREVIEW_BYTES);
            trace!(
                job_id = %job_id,
                document = index + 1,
                preview = %String::from_utf8_lossy(&document.content[..end]),
                "Document content"
            );
        }

        let receipt = JobReceipt {
            job_id,
            queue_id: job.queue_id.clone(),
            copies: job.copies,
            documents: job.documents.len(),
            submitted_at: Utc::now(),
        };
        let mut submitted = self.submitted.lock().await;
        if self.receipt_capacity > 0 {
            if submitted.len() == self.receipt_capacity {
                submitted.pop_front();
            }
            submitted.push_back(receipt.clone());
        }

        Ok(receipt)
    }
}
