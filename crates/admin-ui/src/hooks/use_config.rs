//! Console configuration state

use dioxus::prelude::*;

use crate::models::{ConsoleConfig, ConsoleError, ConsoleResult};

/// Configuration shared through context
#[derive(Clone, Copy, PartialEq)]
pub struct ConfigContext {
    pub config: Signal<ConsoleConfig>,
}

impl ConfigContext {
    pub fn current(&self) -> ConsoleConfig {
        self.config.read().clone()
    }

    /// Actor recorded in activity entries
    pub fn operator(&self) -> String {
        self.config.read().console.operator.clone()
    }

    pub fn page_size(&self) -> usize {
        self.config.read().console.page_size
    }

    pub fn confirm_destructive(&self) -> bool {
        self.config.read().console.confirm_destructive
    }

    pub fn money(&self, amount: hotelier_data::Money) -> String {
        self.config.read().money(amount)
    }

    /// Replaces the live configuration when `next` validates.
    pub fn apply(&self, next: ConsoleConfig) -> ConsoleResult<()> {
        let result = next.validate();
        if !result.is_valid() {
            return Err(ConsoleError::Validation { result });
        }
        tracing::info!(page_size = next.console.page_size, "console configuration applied");
        let mut config = self.config;
        config.set(next);
        Ok(())
    }

    pub fn reset(&self) {
        let mut config = self.config;
        config.set(ConsoleConfig::embedded());
    }
}

/// Installs the configuration context; call once from the root component.
pub fn use_config_provider(initial: ConsoleConfig) -> ConfigContext {
    use_context_provider(|| ConfigContext {
        config: Signal::new(initial),
    })
}

pub fn use_config() -> ConfigContext {
    use_context::<ConfigContext>()
}
