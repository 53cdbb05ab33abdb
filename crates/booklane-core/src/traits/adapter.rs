// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all collaborator adapters implement.

use crate::error::BooklaneError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Booklane collaborator adapters.
///
/// Every adapter (store, session, event source, handoff) implements this
/// trait, which provides identity and health check capabilities.
pub trait Adapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Returns the type of collaborator this adapter stands in for.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    fn health_check(&self) -> Result<HealthStatus, BooklaneError> {
        Ok(HealthStatus::Healthy)
    }
}
