//! Active plugin configuration
//!
//! Request-time callbacks take read locks and may run concurrently; a
//! configuration reload takes the write lock.

use std::sync::{PoisonError, RwLock};

use crate::domain::entities::Configuration;

#[derive(Debug, Default)]
pub struct SharedConfiguration {
    inner: RwLock<Configuration>,
}

impl SharedConfiguration {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            inner: RwLock::new(configuration),
        }
    }

    /// Snapshot of the current configuration
    pub fn get(&self) -> Configuration {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active configuration
    pub fn set(&self, configuration: Configuration) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = configuration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn set_then_get() {
        let shared = SharedConfiguration::default();
        assert!(shared.get().format_on_login);

        shared.set(Configuration { format_on_login: false });
        assert!(!shared.get().format_on_login);

        shared.set(Configuration { format_on_login: false });
        assert_eq!(shared.get(), Configuration { format_on_login: false });
    }

    #[test]
    fn readers_see_a_consistent_value_during_reloads() {
        let shared = Arc::new(SharedConfiguration::default());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    shared.set(Configuration { format_on_login: i % 2 == 0 });
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let _ = shared.get().format_on_login;
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        // last write was i = 199
        assert!(!shared.get().format_on_login);
    }
}
