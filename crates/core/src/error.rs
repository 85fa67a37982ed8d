//! Errors reported by cost sources

use thiserror::Error;

/// Remediation steps shown when the billing API rejects our credentials
pub const CREDENTIALS_HELP: &str = "Please configure credentials:\n\
    1. Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY environment variables, or\n\
    2. Configure ~/.aws/credentials file, or\n\
    3. Use an IAM role if running on EC2";

/// Errors a cost source can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// A transient failure; the next cycle may well succeed
    #[error("Failed to fetch cost data: {0}")]
    Fetch(String),

    /// Credentials are missing or were rejected
    #[error("Cloud credentials not found or invalid ({detail}). {help}", help = CREDENTIALS_HELP)]
    Credentials { detail: String },

    /// The live billing integration is not part of this build
    #[error("{integration} is required for live cost data. {hint}")]
    IntegrationUnavailable { integration: String, hint: String },
}

impl SourceError {
    pub fn fetch(message: impl Into<String>) -> Self {
        SourceError::Fetch(message.into())
    }

    pub fn credentials(detail: impl Into<String>) -> Self {
        SourceError::Credentials {
            detail: detail.into(),
        }
    }

    /// True for errors that will not go away by polling again
    ///
    /// The scheduler shows these to the user once and only logs repeats
    /// at debug level.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, SourceError::Fetch(_))
    }
}
