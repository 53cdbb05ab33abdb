// SPDX-FileCopyrightText: 2026 Booklane Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Booklane integration tests.
//!
//! Deterministic stand-ins for the engine's collaborators, so repository
//! and dispatcher tests run without a real auth layer, wall clock or disk.
//!
//! # Components
//!
//! - [`MockSession`] - login/logout-able session provider
//! - [`ManualClock`] - clock that only moves when told to
//! - [`FailingStore`] - store whose writes can be made to fail
//! - [`fixtures`] - the alice/bob/"Dune" cast used across the workspace

pub mod clock;
pub mod failing_store;
pub mod fixtures;
pub mod mock_session;

pub use clock::ManualClock;
pub use failing_store::FailingStore;
pub use mock_session::MockSession;
