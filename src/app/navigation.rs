use std::sync::{Arc, PoisonError, RwLock};

use crate::app::types::AppView;

/// Shared handle to the current view.
///
/// Cloned into the API client's unauthorized handler so a 401 anywhere can
/// send the UI back to the authentication entry point.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Arc<RwLock<AppView>>,
}

impl Navigator {
    pub fn new(initial: AppView) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn current(&self) -> AppView {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn navigate(&self, view: AppView) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if *current != view {
            tracing::debug!("[APP] Navigating {} -> {}", current.path(), view.path());
            *current = view;
        }
    }
}
