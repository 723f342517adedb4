//! One-shot UI bootstrap.
//!
//! DESIGN
//! ======
//! The bootstrapper hands a `UiConfiguration` to a `UiFactory` exactly once
//! and publishes the handle it returns. The handle lives in a `OnceLock`, so
//! it is assigned a single time and read-only afterwards. Failures inside the
//! UI (unreachable document, bad content) belong to the handle, never to
//! `run`.

use std::sync::{Arc, OnceLock};

use crate::ui_config::UiConfiguration;

/// Builds a live UI from a configuration record.
pub trait UiFactory {
    type Handle;

    fn create(&self, config: UiConfiguration) -> Self::Handle;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("ui already bootstrapped")]
    AlreadyBootstrapped,
}

pub struct Bootstrapper<H> {
    ui: OnceLock<Arc<H>>,
}

impl<H> Bootstrapper<H> {
    #[must_use]
    pub const fn new() -> Self {
        Self { ui: OnceLock::new() }
    }

    /// Build the UI and publish its handle.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyBootstrapped` if a handle was already published. The
    /// factory is not called in that case.
    pub fn run<F>(&self, factory: &F, config: UiConfiguration) -> Result<Arc<H>, BootstrapError>
    where
        F: UiFactory<Handle = H>,
    {
        let mut created = false;
        let document_url = config.document_url.clone();
        let handle = self.ui.get_or_init(|| {
            created = true;
            Arc::new(factory.create(config))
        });

        if !created {
            tracing::warn!("ui bootstrap requested twice; keeping the first handle");
            return Err(BootstrapError::AlreadyBootstrapped);
        }

        tracing::info!(%document_url, "ui bootstrapped");
        Ok(Arc::clone(handle))
    }

    /// The published handle, if `run` has completed.
    #[must_use]
    pub fn ui(&self) -> Option<Arc<H>> {
        self.ui.get().cloned()
    }
}

impl<H> Default for Bootstrapper<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod tests;
