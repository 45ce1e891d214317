use crate::models::{AnalyticsResponse, StatusResponse};
use crate::session::{apply, Action, ClickerState, ALERT_LABEL};
use crate::stats::build_analytics;
use crate::ticker::{spawn_repeating, TaskHandle};
use chrono::Utc;
use std::{
    mem,
    ops::ControlFlow,
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Default)]
struct Session {
    clicker: ClickerState,
    auto_task: Option<TaskHandle>,
    /// Bumped on every auto-clicker start; ticks carrying an older value are ignored.
    generation: u64,
}

impl Session {
    fn dispatch(&mut self, action: Action) {
        self.clicker = apply(mem::take(&mut self.clicker), action);
    }

    fn cancel_auto(&mut self) -> bool {
        match self.auto_task.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }
}

/// Owns the click session and the single auto-click task.
///
/// Every operation runs under one lock, so a stop or reset that has returned
/// is never followed by a tick from the cancelled task.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    auto_click_interval: Duration,
}

impl AppState {
    pub fn new(auto_click_interval: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            auto_click_interval,
        }
    }

    #[cfg(test)]
    pub(crate) async fn snapshot(&self) -> crate::session::ClickerState {
        self.session.lock().await.clicker.clone()
    }

    pub async fn status(&self) -> StatusResponse {
        self.session.lock().await.clicker.status()
    }

    pub async fn analytics(&self) -> AnalyticsResponse {
        let session = self.session.lock().await;
        build_analytics(session.clicker.log())
    }

    pub async fn click(&self, label: String) -> StatusResponse {
        let mut session = self.session.lock().await;
        debug!(label = %label, "click");
        session.dispatch(Action::Click {
            label,
            at_ms: now_ms(),
        });
        session.clicker.status()
    }

    /// Records an alert click and returns the message shown for it, which
    /// reports the count from before the click.
    pub async fn alert(&self) -> (String, StatusResponse) {
        let mut session = self.session.lock().await;
        let message = format!(
            "You've clicked {} buttons total!",
            session.clicker.click_count()
        );
        session.dispatch(Action::Click {
            label: ALERT_LABEL.to_string(),
            at_ms: now_ms(),
        });
        (message, session.clicker.status())
    }

    pub async fn confirm(&self, confirmed: bool) -> StatusResponse {
        let mut session = self.session.lock().await;
        if !confirmed {
            debug!("confirm action declined");
        }
        session.dispatch(Action::Confirm {
            confirmed,
            at_ms: now_ms(),
        });
        session.clicker.status()
    }

    pub async fn start_auto(&self) -> StatusResponse {
        let mut session = self.session.lock().await;
        if session.clicker.auto_clicking {
            debug!("auto clicker already running");
            return session.clicker.status();
        }

        session.dispatch(Action::StartAuto);
        session.generation += 1;
        let generation = session.generation;
        let weak = Arc::downgrade(&self.session);
        session.auto_task = Some(spawn_repeating(self.auto_click_interval, move || {
            auto_tick(weak.clone(), generation)
        }));

        info!(
            generation,
            interval_ms = self.auto_click_interval.as_millis() as u64,
            "auto clicker started"
        );
        session.clicker.status()
    }

    pub async fn stop_auto(&self) -> StatusResponse {
        let mut session = self.session.lock().await;
        if session.cancel_auto() {
            info!(generation = session.generation, "auto clicker stopped");
        }
        session.dispatch(Action::StopAuto);
        session.clicker.status()
    }

    pub async fn reset(&self) -> StatusResponse {
        let mut session = self.session.lock().await;
        let cleared = session.clicker.click_count();
        session.cancel_auto();
        session.dispatch(Action::Reset);
        info!(cleared, "click history reset");
        session.clicker.status()
    }

    pub async fn toggle_analytics(&self) -> StatusResponse {
        let mut session = self.session.lock().await;
        session.dispatch(Action::ToggleAnalytics);
        session.clicker.status()
    }

    /// Cancels the auto clicker ahead of process exit.
    pub async fn shutdown(&self) {
        let mut session = self.session.lock().await;
        if session.cancel_auto() {
            session.dispatch(Action::StopAuto);
            info!("auto clicker cancelled for shutdown");
        }
    }
}

async fn auto_tick(session: Weak<Mutex<Session>>, generation: u64) -> ControlFlow<()> {
    let Some(shared) = session.upgrade() else {
        return ControlFlow::Break(());
    };
    let mut session = shared.lock().await;
    if session.generation != generation || session.auto_task.is_none() {
        return ControlFlow::Break(());
    }

    session.dispatch(Action::AutoTick { at_ms: now_ms() });
    debug!(
        generation,
        click_count = session.clicker.click_count(),
        "auto click"
    );
    ControlFlow::Continue(())
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
