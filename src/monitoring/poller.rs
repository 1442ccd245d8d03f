//! Alert and model-health pollers

use crate::config::PollingConfig;
use crate::core::managers::{BudgetManager, ModelHealthManager};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Periodically refreshes the budget-alert snapshot
#[derive(Debug)]
pub struct AlertPoller {
    manager: Arc<BudgetManager>,
    interval: Duration,
    active: Arc<AtomicBool>,
}

impl AlertPoller {
    /// Create a poller over the given manager
    pub fn new(manager: Arc<BudgetManager>, config: &PollingConfig) -> Self {
        Self {
            manager,
            interval: Duration::from_secs(config.alert_interval_secs),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the poller is running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Refresh period this poller was configured with
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the background refresh task
    pub fn start(&self) {
        info!(interval_secs = self.interval.as_secs(), "Starting alert poller");
        self.active.store(true, Ordering::Release);

        let manager = Arc::clone(&self.manager);
        let active = Arc::clone(&self.active);
        let period = self.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                if !active.load(Ordering::Acquire) {
                    break;
                }

                match manager.refresh_alerts().await {
                    Ok(alerts) => debug!(count = alerts.len(), "Alert snapshot refreshed"),
                    Err(e) => error!("Alert refresh failed: {}", e),
                }
            }
        });
    }

    /// Stop the poller; the task exits on its next tick
    pub fn stop(&self) {
        info!("Stopping alert poller");
        self.active.store(false, Ordering::Release);
    }
}

/// Periodically refreshes the model-health cache
#[derive(Debug)]
pub struct ModelHealthPoller {
    manager: Arc<ModelHealthManager>,
    interval: Duration,
    active: Arc<AtomicBool>,
}

impl ModelHealthPoller {
    /// Create a poller over the given manager
    pub fn new(manager: Arc<ModelHealthManager>, config: &PollingConfig) -> Self {
        Self {
            manager,
            interval: Duration::from_secs(config.health_interval_secs),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether the poller is running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Refresh period this poller was configured with
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the background refresh task
    pub fn start(&self) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting model health poller"
        );
        self.active.store(true, Ordering::Release);

        let manager = Arc::clone(&self.manager);
        let active = Arc::clone(&self.active);
        let period = self.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;

                if !active.load(Ordering::Acquire) {
                    break;
                }

                match manager.refresh().await {
                    Ok(entries) => debug!(count = entries.len(), "Model health refreshed"),
                    Err(e) => error!("Model health refresh failed: {}", e),
                }
            }
        });
    }

    /// Stop the poller; the task exits on its next tick
    pub fn stop(&self) {
        info!("Stopping model health poller");
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{EnterpriseContext, EnterpriseDirectory};

    #[tokio::test]
    async fn test_poller_active_flag() {
        let context = Arc::new(EnterpriseContext::new(EnterpriseDirectory::for_tests()));
        let manager = Arc::new(BudgetManager::new(context));
        let poller = AlertPoller::new(manager, &PollingConfig::default());

        assert!(!poller.is_active());
        poller.start();
        assert!(poller.is_active());
        poller.stop();
        assert!(!poller.is_active());
    }

    #[tokio::test]
    async fn test_pollers_use_configured_intervals() {
        let context = Arc::new(EnterpriseContext::new(EnterpriseDirectory::for_tests()));
        let config = PollingConfig {
            alert_interval_secs: 10,
            health_interval_secs: 7,
        };

        let alerts = AlertPoller::new(Arc::new(BudgetManager::new(context.clone())), &config);
        let health = ModelHealthPoller::new(Arc::new(ModelHealthManager::new(context)), &config);

        assert_eq!(alerts.interval(), Duration::from_secs(10));
        assert_eq!(health.interval(), Duration::from_secs(7));
    }
}
