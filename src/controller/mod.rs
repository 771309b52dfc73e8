//! Dashboard controller
//!
//! Owns the dashboard state, the backend client and the bookkeeping that
//! decides which responses may be applied. The UI loop feeds it key
//! actions and [`Update`]s; it never blocks on the network itself.

pub mod loaders;
mod mutations;
pub mod updates;

use crate::api::MonitorApi;
use crate::config::Config;
use crate::consts::cli_consts::refresh::LOG_DAY_CHOICES;
use crate::events::{Event, EventType, Panel};
use crate::logging::LogLevel;
use crate::network::{ErrorHandler, RequestTracker};
use crate::ui::dashboard::state::{DashboardState, Tab, ToastKind};
use loaders::{SUMMARY_PANELS, load_and_report};
use updates::Update;

use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct DashboardController {
    pub state: DashboardState,
    api: Arc<dyn MonitorApi>,
    updates: mpsc::Sender<Update>,
    tracker: RequestTracker,
    error_handler: ErrorHandler,
    config: Config,
    /// Where theme and log range changes are persisted; `None` keeps them in memory.
    config_path: Option<PathBuf>,
}

impl DashboardController {
    pub fn new(
        api: Arc<dyn MonitorApi>,
        updates: mpsc::Sender<Update>,
        config: Config,
        config_path: Option<PathBuf>,
        with_background_color: bool,
    ) -> Self {
        let log_days = if LOG_DAY_CHOICES.contains(&config.log_days) {
            config.log_days
        } else {
            crate::consts::cli_consts::refresh::DEFAULT_LOG_DAYS
        };
        let state = DashboardState::new(
            api.environment().clone(),
            config.theme,
            log_days,
            with_background_color,
        );
        Self {
            state,
            api,
            updates,
            tracker: RequestTracker::new(),
            error_handler: ErrorHandler::new(),
            config,
            config_path,
        }
    }

    /// Initial load of the overview panels.
    pub fn start(&mut self) {
        self.refresh_all(false);
    }

    /// Reload the four summary panels concurrently. A `RefreshCycleDone`
    /// update follows once all of them have reported.
    pub fn refresh_all(&mut self, manual: bool) {
        let [summary, system, version, usage] =
            SUMMARY_PANELS.map(|panel| (panel, self.tracker.begin(panel)));
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let handler = self.error_handler.clone();
        let log_days = self.state.log_days;

        tokio::spawn(async move {
            let (api, tx) = (&*api, &updates);
            tokio::join!(
                load_and_report(api, tx, &handler, summary.0, summary.1, log_days),
                load_and_report(api, tx, &handler, system.0, system.1, log_days),
                load_and_report(api, tx, &handler, version.0, version.1, log_days),
                load_and_report(api, tx, &handler, usage.0, usage.1, log_days),
            );
            let _ = updates.send(Update::RefreshCycleDone { manual }).await;
        });
    }

    /// Refresh requested from the keyboard.
    pub fn manual_refresh(&mut self) {
        self.refresh_all(true);
        self.state.push_toast("数据已刷新", ToastKind::Success);
    }

    /// Load a single panel.
    pub fn load(&mut self, panel: Panel) {
        let generation = self.tracker.begin(panel);
        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let handler = self.error_handler.clone();
        let log_days = self.state.log_days;

        tokio::spawn(async move {
            load_and_report(&*api, &updates, &handler, panel, generation, log_days).await;
        });
    }

    /// Activate `tab`, loading its data when it has any of its own. A panel
    /// whose previous load is still outstanding is not requested again.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
        self.state.editing_rate = false;
        let panel = match tab {
            Tab::Overview => return,
            Tab::Pricing => Panel::Pricing,
            Tab::Tasks => Panel::Tasks,
            Tab::Logs => Panel::Logs,
        };
        if !self.tracker.in_flight(panel) {
            self.load(panel);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        self.config.theme = self.state.theme;
        self.persist_config();
    }

    /// Step through the logs day ranges and reload the logs.
    pub fn cycle_log_days(&mut self, forward: bool) {
        let len = LOG_DAY_CHOICES.len();
        let current = LOG_DAY_CHOICES
            .iter()
            .position(|d| *d == self.state.log_days)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.state.log_days = LOG_DAY_CHOICES[next];
        self.config.log_days = self.state.log_days;
        self.persist_config();
        self.load(Panel::Logs);
    }

    pub fn toggle_diagnostics(&mut self) {
        self.state.show_diagnostics = !self.state.show_diagnostics;
    }

    /// Apply one message from the fetch tasks or the refresh timer.
    pub fn handle_update(&mut self, update: Update) {
        match update {
            Update::Loaded {
                generation,
                payload,
            } => {
                let panel = payload.panel();
                if self.tracker.accept(panel, generation) {
                    self.state.apply_payload(payload);
                } else {
                    self.state.add_diagnostic(Event::stale(panel, generation));
                }
            }
            Update::LoadFailed {
                panel,
                generation,
                message,
                level,
            } => {
                if !self.tracker.accept(panel, generation) {
                    self.state.add_diagnostic(Event::stale(panel, generation));
                    return;
                }
                self.state
                    .add_diagnostic(Event::load_failed(panel, message, level));
            }
            Update::Mutated { mutation, result } => self.finish_mutation(mutation, result),
            Update::RefreshCycleDone { manual } => {
                self.state.last_refresh = Some(Local::now().format("%H:%M:%S").to_string());
                let source = if manual { "manual" } else { "scheduled" };
                self.state.add_diagnostic(Event::refresh(format!(
                    "Completed {} refresh cycle",
                    source
                )));
            }
            Update::Tick => {
                self.refresh_all(false);
                if self.state.active_tab == Tab::Tasks {
                    self.load(Panel::Tasks);
                }
            }
        }
    }

    fn persist_config(&mut self) {
        let Some(path) = self.config_path.as_ref() else {
            return;
        };
        if let Err(e) = self.config.save(path) {
            self.state.add_diagnostic(Event::new(
                Panel::Summary,
                format!("Failed to save {}: {}", path.display(), e),
                EventType::Error,
                LogLevel::Warn,
            ));
        }
    }
}
