//! Live label mode.
//!
//! Stands in for the panel indicator: settings are re-read on every tick and
//! published through [`Settings`]; a change, or a new day, re-renders the
//! label. Only label changes are printed.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use feriados_core::{FilterPolicy, HolidaySelector, Settings};

use crate::label;

/// Last printed label, to print only on change.
#[derive(Debug, Default)]
struct LabelState {
    last: Option<String>,
}

impl LabelState {
    /// Record `label`, returning it if it differs from what is on screen.
    /// No holiday leaves the previous label in place.
    fn update(&mut self, label: Option<String>) -> Option<&str> {
        let label = label?;
        if self.last.as_deref() == Some(label.as_str()) {
            return None;
        }
        self.last = Some(label);
        self.last.as_deref()
    }
}

async fn render(selector: &HolidaySelector, policy: FilterPolicy, state: &mut LabelState) {
    let today = Local::now().date_naive();
    let next = selector.next_holiday_on(today, policy).await;
    if let Some(text) = state.update(next.map(|next| label(&next, today))) {
        println!("{}", text);
    }
}

pub async fn run<F>(
    selector: HolidaySelector,
    initial: FilterPolicy,
    interval: Duration,
    mut reload: F,
) -> Result<()>
where
    F: FnMut() -> Result<FilterPolicy>,
{
    let settings = Settings::new(initial);
    let mut changes = settings.subscribe();
    let mut state = LabelState::default();

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(?initial, "Watching for settings changes");
    render(&selector, settings.policy(), &mut state).await;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping watch");
                return Ok(());
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let policy = *changes.borrow_and_update();
                render(&selector, policy, &mut state).await;
            }
            _ = ticker.tick() => {
                let changed = match reload() {
                    Ok(policy) => settings.replace(policy),
                    Err(e) => {
                        warn!(error = %e, "Failed to reload settings");
                        false
                    }
                };
                // A change is rendered by the branch above; otherwise the
                // date may have moved on
                if !changed {
                    render(&selector, settings.policy(), &mut state).await;
                }
            }
        }
    }
}
