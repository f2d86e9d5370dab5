//! Live selection settings.
//!
//! `Settings` publishes the current [`FilterPolicy`] on a watch channel.
//! Front ends subscribe and recompute the next holiday whenever the value
//! actually changes.

use tokio::sync::watch;
use tracing::debug;

use crate::models::FilterPolicy;

pub struct Settings {
    tx: watch::Sender<FilterPolicy>,
}

impl Settings {
    pub fn new(initial: FilterPolicy) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn policy(&self) -> FilterPolicy {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterPolicy> {
        self.tx.subscribe()
    }

    /// Replace the policy. Subscribers are woken only if it changed.
    pub fn replace(&self, policy: FilterPolicy) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == policy {
                false
            } else {
                *current = policy;
                true
            }
        });
        if changed {
            debug!(?policy, "Selection settings changed");
        }
        changed
    }

    pub fn set_skip_weekends(&self, value: bool) -> bool {
        self.replace(FilterPolicy {
            skip_weekend: value,
            ..self.policy()
        })
    }

    pub fn set_skip_today(&self, value: bool) -> bool {
        self.replace(FilterPolicy {
            skip_today: value,
            ..self.policy()
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(FilterPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let settings = Settings::default();
        let mut rx = settings.subscribe();

        assert!(settings.set_skip_weekends(true));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), FilterPolicy::new(true, false));

        assert!(settings.set_skip_today(true));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), FilterPolicy::new(true, true));
    }

    #[tokio::test]
    async fn test_unchanged_value_does_not_notify() {
        let settings = Settings::new(FilterPolicy::skip_weekends());
        let mut rx = settings.subscribe();

        assert!(!settings.set_skip_weekends(true));
        assert!(!settings.replace(FilterPolicy::skip_weekends()));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_policy_reflects_latest_value() {
        let settings = Settings::default();
        settings.set_skip_today(true);
        assert_eq!(settings.policy(), FilterPolicy::new(false, true));
    }
}
