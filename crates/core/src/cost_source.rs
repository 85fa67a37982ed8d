//! Cost source trait and related types

use crate::error::SourceError;
use cost_widget_types::CostData;
use std::fmt;

/// Which kind of provider backs a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Generated data for demos and tests
    Simulated,
    /// A real billing API
    Live,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Simulated => write!(f, "simulated"),
            SourceKind::Live => write!(f, "live"),
        }
    }
}

/// Metadata about a cost source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of where the numbers come from
    pub description: String,
    pub kind: SourceKind,
}

/// Trait for all cost sources
///
/// A cost source answers "what has been spent this month, and on what".
/// Each call to `fetch` produces a fresh snapshot; sources keep no
/// history between calls.
pub trait CostSource {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Fetch the current month-to-date snapshot
    ///
    /// Called once per scheduler cycle, on the same thread that renders.
    /// Errors are reported once per call; the caller decides whether to
    /// retry, fall back, or just wait for the next cycle.
    fn fetch(&mut self) -> Result<CostData, SourceError>;

    /// Check if this source can be used at all
    ///
    /// A live source without a billing integration reports false here.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: CostSource + ?Sized> CostSource for Box<S> {
    fn metadata(&self) -> &SourceMetadata {
        (**self).metadata()
    }

    fn fetch(&mut self) -> Result<CostData, SourceError> {
        (**self).fetch()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Type-erased cost source for dynamic dispatch
pub type BoxedCostSource = Box<dyn CostSource>;
