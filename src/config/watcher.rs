//! Configuration file watcher for hot reload of middleware settings.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::Services;
use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// Reloads access rules and store mounts when the config file changes.
pub struct ConfigWatcher {
    path: PathBuf,
    services: Services,
}

impl ConfigWatcher {
    pub fn new(path: &Path, services: Services) -> Self {
        Self {
            path: path.to_path_buf(),
            services,
        }
    }

    /// Start watching. Dropping the returned watcher stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let services = self.services;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    match load_config(&path) {
                        Ok(config) => apply(&services, config),
                        Err(e) => tracing::error!(
                            path = %path.display(),
                            error = %e,
                            "Config reload failed, keeping current settings"
                        ),
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}

/// Push the reloadable parts of `config` into the live middleware.
pub fn apply(services: &Services, config: RouterConfig) {
    services.access.update(config.access.rules);
    services.store_switch.update(config.stores);
    tracing::info!("Configuration reloaded");
}
