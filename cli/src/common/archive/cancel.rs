//! # pkgrs Cooperative Cancellation (`common::archive::cancel`)
//!
//! File: cli/src/common/archive/cancel.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! A shared flag the archive engine polls between per-file steps (staging copy,
//! encoding, zip writing, extraction). The CLI trips it from its Ctrl-C handler;
//! the engine then fails with `PkgError::Cancelled` after its staging area is
//! dropped.
//!
use crate::core::error::{PkgError, Result};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Returns `Err(PkgError::Cancelled)` once `cancel` has been called.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            anyhow::bail!(PkgError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(token.check().is_ok());
        handle.cancel();
        assert!(token.is_cancelled());
        let err = token.check().unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Cancelled)));
    }
}
