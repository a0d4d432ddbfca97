//! # Print Dispatch
//!
//! Request-level entry point: resolve a print request, hand the resulting job
//! to the printing service and build the message shown to the user.
//!
//! ```text
//! PrintRequest ──► PrintResolver ──► ResolvedPrintJob ──► PrintingService
//!                       │                                      │
//!                  ResolveError                         PrintServiceError
//!                       └──────────────► DispatchError ◄───────┘
//! ```

use crate::logging::log_print_operation;
use crate::printer::{JobReceipt, PrintQueue, PrintServiceError, PrintingService};
use crate::registry::PrintRegistry;
use crate::resolver::{PrintRequest, PrintResolver, RecordSource, ResolveError, ResolvedPrintJob};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result of a successful print request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOutcome {
    pub job: ResolvedPrintJob,
    pub receipt: JobReceipt,
    /// Confirmation for the end user
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Printer(#[from] PrintServiceError),
}

impl DispatchError {
    /// HTTP-like status the host should answer with
    pub fn status(&self) -> u16 {
        match self {
            Self::Resolve(e) => e.http_status(),
            Self::Printer(PrintServiceError::QueueNotFound { .. }) => 400,
            Self::Printer(PrintServiceError::Unavailable { .. }) => 503,
            Self::Printer(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Resolve(e) => e.code(),
            Self::Printer(PrintServiceError::QueueNotFound { .. }) => "PRINT_QUEUE_NOT_FOUND",
            Self::Printer(PrintServiceError::DocumentUpload { .. }) => "PRINT_UPLOAD_FAILED",
            Self::Printer(PrintServiceError::Submission { .. }) => "PRINT_TASK_FAILED",
            Self::Printer(PrintServiceError::Unavailable { .. }) => "PRINT_SERVICE_UNAVAILABLE",
        }
    }
}

/// Resolves requests and submits them to a printing service
#[derive(Clone)]
pub struct PrintDispatcher {
    resolver: PrintResolver,
    printer: Arc<dyn PrintingService>,
}

impl std::fmt::Debug for PrintDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintDispatcher")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl PrintDispatcher {
    pub fn new(registry: Arc<PrintRegistry>, printer: Arc<dyn PrintingService>) -> Self {
        Self {
            resolver: PrintResolver::new(registry),
            printer,
        }
    }

    pub fn resolver(&self) -> &PrintResolver {
        &self.resolver
    }

    /// Queues offered by the printing service
    pub async fn queues(&self) -> Result<Vec<PrintQueue>, DispatchError> {
        Ok(self.printer.list_queues().await?)
    }

    /// Resolve `request` against its record and submit the job
    pub async fn print(
        &self,
        request: &PrintRequest,
        source: &dyn RecordSource,
    ) -> Result<PrintOutcome, DispatchError> {
        let job = match self.resolver.resolve(request, source).await {
            Ok(job) => job,
            Err(e) => {
                log_print_operation(
                    "resolve",
                    &request.entity,
                    None,
                    None,
                    e.code(),
                    Some(&e.to_string()),
                );
                return Err(e.into());
            }
        };

        let receipt = match self.printer.submit_job(&job).await {
            Ok(receipt) => receipt,
            Err(e) => {
                log_print_operation(
                    "submit",
                    &request.entity,
                    Some(&job.queue_id),
                    None,
                    "failed",
                    Some(&e.to_string()),
                );
                return Err(e.into());
            }
        };

        log_print_operation(
            "submit",
            &request.entity,
            Some(&job.queue_id),
            Some(&receipt.job_id),
            "success",
            None,
        );

        let message = outcome_message(&job);
        Ok(PrintOutcome {
            job,
            receipt,
            message,
        })
    }
}

fn outcome_message(job: &ResolvedPrintJob) -> String {
    format!(
        "Document sent to print queue {}\nNo. of copies requested: {}",
        job.queue_id, job.copies
    )
}
