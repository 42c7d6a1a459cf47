//! Ordered, fail-fast configuration options.
//!
//! A [`ConfigOption<T>`] is a named function that mutates a `T` and may
//! reject its input. Options are cheap to clone so one list can configure
//! several targets. [`apply_options`] runs a list in order and stops at the
//! first failure; whatever the earlier options changed stays changed.

use std::sync::Arc;

use tracing::debug;

use crate::error::ConfigError;

type ApplyFn<T> = dyn Fn(&mut T) -> Result<(), ConfigError> + Send + Sync;

/// A deferred configuration step for targets of type `T`.
pub struct ConfigOption<T> {
    name: &'static str,
    apply: Arc<ApplyFn<T>>,
}

impl<T> ConfigOption<T> {
    pub fn new<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut T) -> Result<(), ConfigError> + Send + Sync + 'static,
    {
        Self {
            name,
            apply: Arc::new(apply),
        }
    }

    /// An option that accepts any target and changes nothing.
    /// Used to keep retired option names source-compatible.
    pub fn identity(name: &'static str) -> Self {
        Self::new(name, |_| Ok(()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, target: &mut T) -> Result<(), ConfigError> {
        (self.apply)(target)
    }
}

impl<T> Clone for ConfigOption<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> std::fmt::Debug for ConfigOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ConfigOption").field(&self.name).finish()
    }
}

/// Apply `options` to `target` in order, returning the first error.
pub fn apply_options<'a, T: 'a>(
    target: &mut T,
    options: impl IntoIterator<Item = &'a ConfigOption<T>>,
) -> Result<(), ConfigError> {
    for (index, option) in options.into_iter().enumerate() {
        if let Err(err) = option.apply(target) {
            debug!(option = option.name(), index, error = %err, "option rejected");
            return Err(err);
        }
        debug!(option = option.name(), index, "option applied");
    }
    Ok(())
}
