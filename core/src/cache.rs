//! Single-slot holder for the most recent result set.

use std::sync::{Arc, RwLock};

use crate::task::ResultSet;

/// Last-result cache shared by the request handlers.
///
/// Every `store` replaces the previous result set wholesale. Concurrent
/// writers resolve last-writer-wins; readers always see one complete set.
#[derive(Debug, Default)]
pub struct ResultCache {
    slot: RwLock<Option<Arc<ResultSet>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, items: ResultSet) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(items));
    }

    /// Current result set, or `None` before the first submission.
    pub fn snapshot(&self) -> Option<Arc<ResultSet>> {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Current items if there is at least one.
    pub fn non_empty(&self) -> Option<Arc<ResultSet>> {
        self.snapshot().filter(|items| !items.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().is_none()
    }

    pub fn len(&self) -> usize {
        self.snapshot().map(|items| items.len()).unwrap_or(0)
    }
}
