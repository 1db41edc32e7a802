//! Engine types
//!
//! The per-call request a host hands to the engine.

use crate::filter::Qualifier;
use crate::pagination::StopSignal;

/// One list invocation
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Host predicates; ones the resource cannot push down are ignored
    pub qualifiers: Vec<Qualifier>,
    /// Maximum records to return; `None` or zero means all
    pub limit: Option<u64>,
    /// Resume after this cursor
    pub after: Option<String>,
    /// Cooperative cancellation
    pub stop: StopSignal,
}

impl ListRequest {
    /// An unfiltered, unlimited request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one qualifier
    #[must_use]
    pub fn qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Add several qualifiers
    #[must_use]
    pub fn qualifiers(mut self, qualifiers: impl IntoIterator<Item = Qualifier>) -> Self {
        self.qualifiers.extend(qualifiers);
        self
    }

    /// Cap the number of records
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume after a cursor from an earlier page
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Share a stop signal with the consumer
    #[must_use]
    pub fn stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }
}
