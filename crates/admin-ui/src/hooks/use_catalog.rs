//! Access to the record services from components
//!
//! Services hold their own shared state, so a revision counter tells
//! Dioxus when to re-render. Reading it subscribes a component; every
//! mutation made through [`CatalogContext::settle`] bumps it.

use dioxus::prelude::*;

use super::use_notifications::NotificationCenter;
use crate::models::ConsoleResult;
use crate::services::Catalog;

#[derive(Clone, Copy, PartialEq)]
pub struct CatalogContext {
    catalog: CopyValue<Catalog>,
    revision: Signal<u64>,
}

impl CatalogContext {
    /// Handle to the services without subscribing; for event handlers.
    pub fn catalog(&self) -> Catalog {
        self.catalog.read().clone()
    }

    /// Subscribes the calling component to catalog changes.
    pub fn subscribe(&self) -> Catalog {
        let _ = *self.revision.read();
        self.catalog()
    }

    pub fn touch(&self) {
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Reports the outcome of a mutation as a toast and refreshes subscribers.
    pub fn settle<T>(
        &self,
        result: ConsoleResult<T>,
        notifications: &NotificationCenter,
        success: impl Into<String>,
    ) -> Option<T> {
        self.touch();
        match result {
            Ok(value) => {
                notifications.success(success);
                Some(value)
            }
            Err(err) => {
                notifications.error(err.user_message());
                None
            }
        }
    }
}

pub fn use_catalog_provider(init: impl FnOnce() -> Catalog) -> CatalogContext {
    use_context_provider(|| CatalogContext {
        catalog: CopyValue::new(init()),
        revision: Signal::new(0),
    })
}

pub fn use_catalog() -> CatalogContext {
    use_context::<CatalogContext>()
}
