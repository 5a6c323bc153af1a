//! Mount lifecycle of a prescription view.
//!
//! `Unmounted → MountedNotReady → MountedReady`. The ready transition is
//! deferred until after mount, happens at most once, and only in an
//! environment that can produce binary output. A server pre-render pass
//! mounts to `MountedNotReady` and stays there.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde::Serialize;

/// Where the view is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderEnvironment {
    /// Markup-only pass whose output is transmitted elsewhere.
    Server,
    /// Interactive context able to build and deliver binary documents.
    Client,
}

impl RenderEnvironment {
    pub fn supports_binary_output(self) -> bool {
        match self {
            Self::Server => false,
            Self::Client => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MountState {
    Unmounted,
    MountedNotReady,
    MountedReady,
}

#[derive(Debug)]
pub struct ViewLifecycle {
    state: Mutex<MountState>,
}

impl ViewLifecycle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MountState::Unmounted),
        })
    }

    pub fn state(&self) -> MountState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == MountState::MountedReady
    }

    /// Mounts the view. Returns the deferred ready transition on the first
    /// call only; later calls are no-ops.
    pub fn mount(self: &Arc<Self>, environment: RenderEnvironment) -> Option<PendingActivation> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != MountState::Unmounted {
            tracing::debug!(state = ?*state, "View already mounted");
            return None;
        }
        *state = MountState::MountedNotReady;
        tracing::debug!(?environment, "View mounted");

        Some(PendingActivation {
            lifecycle: Arc::downgrade(self),
            environment,
        })
    }

    fn mark_ready(&self, environment: RenderEnvironment) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != MountState::MountedNotReady {
            return false;
        }
        if !environment.supports_binary_output() {
            tracing::debug!(?environment, "Environment cannot produce documents; staying not-ready");
            return false;
        }
        *state = MountState::MountedReady;
        tracing::info!("View ready for document generation");
        true
    }
}

/// The ready transition scheduled by [`ViewLifecycle::mount`].
///
/// Holds only a weak reference: once the view is torn down, resolving is a
/// no-op.
#[derive(Debug)]
pub struct PendingActivation {
    lifecycle: Weak<ViewLifecycle>,
    environment: RenderEnvironment,
}

impl PendingActivation {
    /// Runs the transition after yielding to the event loop once.
    /// Returns whether the view became ready.
    pub async fn resolve(self) -> bool {
        tokio::task::yield_now().await;
        self.apply()
    }

    /// Runs the transition immediately.
    pub fn apply(self) -> bool {
        match self.lifecycle.upgrade() {
            Some(lifecycle) => lifecycle.mark_ready(self.environment),
            None => {
                tracing::debug!("View torn down before activation; skipping");
                false
            }
        }
    }
}
