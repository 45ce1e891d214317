//! Click session state and its transitions.
//!
//! Every mutation is expressed as [`apply`], a pure `(state, action) -> state`
//! function, so the session can be driven without a server or a timer.

use crate::models::{ClickEvent, StatusResponse};

pub const AUTO_CLICKER_LABEL: &str = "Auto Clicker";
pub const AUTO_CLICKER_STOPPED_LABEL: &str = "Auto Clicker Stopped";
pub const ALERT_LABEL: &str = "Alert Button";
pub const CONFIRM_LABEL: &str = "Confirm Action";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickerState {
    log: Vec<ClickEvent>,
    pub last_clicked: String,
    pub auto_clicking: bool,
    pub analytics_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click { label: String, at_ms: i64 },
    /// A click guarded by a user confirmation; declined confirmations do nothing.
    Confirm { confirmed: bool, at_ms: i64 },
    AutoTick { at_ms: i64 },
    StartAuto,
    StopAuto,
    Reset,
    ToggleAnalytics,
}

impl ClickerState {
    pub fn log(&self) -> &[ClickEvent] {
        &self.log
    }

    pub fn click_count(&self) -> u64 {
        self.log.len() as u64
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            click_count: self.click_count(),
            last_clicked: self.last_clicked.clone(),
            auto_clicking: self.auto_clicking,
            analytics_visible: self.analytics_visible,
        }
    }

    fn append(&mut self, label: String, at_ms: i64) {
        // Keep timestamps non-decreasing even if the wall clock steps back.
        let occurred_at = self
            .log
            .last()
            .map_or(at_ms, |last| last.occurred_at.max(at_ms));
        self.log.push(ClickEvent {
            occurred_at,
            sequence_index: self.click_count() + 1,
            label,
        });
    }
}

pub fn apply(mut state: ClickerState, action: Action) -> ClickerState {
    match action {
        Action::Click { label, at_ms } => {
            state.last_clicked = label.clone();
            state.append(label, at_ms);
        }
        Action::Confirm { confirmed, at_ms } => {
            if confirmed {
                state = apply(
                    state,
                    Action::Click {
                        label: CONFIRM_LABEL.to_string(),
                        at_ms,
                    },
                );
            }
        }
        Action::AutoTick { at_ms } => {
            if state.auto_clicking {
                state.append(AUTO_CLICKER_LABEL.to_string(), at_ms);
            }
        }
        Action::StartAuto => {
            if !state.auto_clicking {
                state.auto_clicking = true;
                state.last_clicked = AUTO_CLICKER_LABEL.to_string();
            }
        }
        Action::StopAuto => {
            if state.auto_clicking {
                state.auto_clicking = false;
                state.last_clicked = AUTO_CLICKER_STOPPED_LABEL.to_string();
            }
        }
        Action::Reset => {
            state.log.clear();
            state.last_clicked.clear();
            // a running auto clicker reports its stop after the clear
            state = apply(state, Action::StopAuto);
        }
        Action::ToggleAnalytics => {
            state.analytics_visible = !state.analytics_visible;
        }
    }
    state
}
