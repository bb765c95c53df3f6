// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the global manager entry points.

/// Why the global manager could not be reached.
///
/// Neither case is fatal. The fire-and-forget entry points in [`global`](crate::global)
/// log these as warnings and skip the operation; [`global::with`](crate::global::with)
/// hands them to the caller.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// No manager has been bound on this thread yet.
    #[error("no manager is bound yet; call `global::make` with the host surface first")]
    Uninitialized,
    /// The manager is in the middle of a dispatch pass, typically because a handler called
    /// back into it.
    #[error("the manager is busy dispatching; re-entrant calls are skipped")]
    Busy,
}
