//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::{poll, splash};
use crate::controller::DashboardController;
use crate::controller::updates::Update;
use crate::ui::dashboard::form::{FormField, PricingForm};
use crate::ui::dashboard::render_dashboard;
use crate::ui::dashboard::state::Tab;
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown while the first loads are in flight.
    Splash,
    /// The tabbed monitor dashboard.
    Dashboard,
}

/// Application state
pub struct App {
    /// Dashboard state and backend bookkeeping.
    controller: DashboardController,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives fetch results and refresh ticks.
    update_receiver: mpsc::Receiver<Update>,

    /// Broadcasts shutdown signal to the refresh worker.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        controller: DashboardController,
        update_receiver: mpsc::Receiver<Update>,
        shutdown_sender: broadcast::Sender<()>,
    ) -> Self {
        Self {
            controller,
            current_screen: Screen::Splash,
            update_receiver,
            shutdown_sender,
        }
    }
}

/// What the UI loop should do after a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    app.controller.start();

    // UI event loop
    loop {
        // Apply everything the fetch tasks and the refresher reported
        while let Ok(update) = app.update_receiver.try_recv() {
            app.controller.handle_update(update);
        }

        if app.current_screen == Screen::Dashboard {
            app.controller.state.update();
        }
        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash() {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(poll())? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if app.current_screen == Screen::Splash {
                    // Any key press other than quit skips the splash screen
                    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                        let _ = app.shutdown_sender.send(());
                        return Ok(());
                    }
                    app.current_screen = Screen::Dashboard;
                    continue;
                }

                if handle_key(&mut app.controller, key) == KeyOutcome::Quit {
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }
            }
        }
    }
}

/// Route one key press to the modal, dialog or input that owns focus,
/// falling back to the global and per-tab bindings.
pub fn handle_key(controller: &mut DashboardController, key: KeyEvent) -> KeyOutcome {
    if controller.state.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                controller.answer_confirm(true)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                controller.answer_confirm(false)
            }
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    if controller.state.modal.is_some() {
        match key.code {
            KeyCode::Esc => controller.close_form(),
            KeyCode::Enter => controller.submit_pricing_form(),
            code => {
                if let Some(form) = controller.state.modal.as_mut() {
                    handle_form_key(form, code);
                }
            }
        }
        return KeyOutcome::Continue;
    }

    if controller.state.editing_rate {
        match key.code {
            KeyCode::Esc => controller.state.cancel_rate_edit(),
            KeyCode::Enter => controller.update_exchange_rate(false),
            KeyCode::Backspace => controller.state.rate_backspace(),
            KeyCode::Char(c) => controller.state.rate_input_char(c),
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            controller.switch_tab(Tab::ALL[index]);
        }
        KeyCode::Tab => {
            let tab = controller.state.active_tab.next();
            controller.switch_tab(tab);
        }
        KeyCode::BackTab => {
            let tab = controller.state.active_tab.prev();
            controller.switch_tab(tab);
        }
        KeyCode::Char('t') => controller.toggle_theme(),
        KeyCode::Char('r') => controller.manual_refresh(),
        KeyCode::Char('d') | KeyCode::Char('D') => controller.toggle_diagnostics(),
        _ => match controller.state.active_tab {
            Tab::Pricing => handle_pricing_key(controller, key),
            Tab::Logs => match key.code {
                KeyCode::Char(']') | KeyCode::Right => controller.cycle_log_days(true),
                KeyCode::Char('[') | KeyCode::Left => controller.cycle_log_days(false),
                _ => {}
            },
            Tab::Overview | Tab::Tasks => {}
        },
    }
    KeyOutcome::Continue
}

fn handle_form_key(form: &mut PricingForm, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left | KeyCode::Right if form.focus == FormField::Currency => {
            form.toggle_currency()
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
}

fn handle_pricing_key(controller: &mut DashboardController, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => controller.state.select_next_model(),
        KeyCode::Up | KeyCode::Char('k') => controller.state.select_prev_model(),
        KeyCode::Char('a') => controller.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => controller.open_edit_form(),
        KeyCode::Char('x') | KeyCode::Delete => controller.request_delete(),
        KeyCode::Char('R') => controller.request_reset(),
        KeyCode::Char('c') => controller.toggle_currency(),
        KeyCode::Char('u') => controller.state.begin_rate_edit(),
        KeyCode::Char('U') => controller.update_exchange_rate(true),
        _ => {}
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.controller.state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{controller, drain, mock_api};
    use crate::models::{ModelPricing, MutationResponse, PricingConfig, TasksResponse};
    use crate::ui::dashboard::state::Confirm;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pricing() -> PricingConfig {
        PricingConfig {
            models: vec![
                ("default".to_string(), ModelPricing::default()),
                ("gpt-4o".to_string(), ModelPricing::default()),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut controller, _rx) = controller(mock_api());
        assert_eq!(handle_key(&mut controller, press(KeyCode::Char('q'))), KeyOutcome::Quit);
        assert_eq!(handle_key(&mut controller, press(KeyCode::Esc)), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut controller, ctrl_c), KeyOutcome::Quit);
    }

    #[tokio::test]
    async fn test_number_keys_switch_tabs() {
        let mut api = mock_api();
        api.expect_get_tasks()
            .times(1)
            .returning(|| Ok(TasksResponse::default()));
        let (mut controller, mut rx) = controller(api);

        handle_key(&mut controller, press(KeyCode::Char('3')));
        assert_eq!(controller.state.active_tab, Tab::Tasks);
        assert_eq!(drain(&mut rx).await.len(), 1);

        handle_key(&mut controller, press(KeyCode::Char('1')));
        assert_eq!(controller.state.active_tab, Tab::Overview);
    }

    #[tokio::test]
    async fn test_modal_captures_quit_key() {
        let (mut controller, _rx) = controller(mock_api());
        controller.state.active_tab = Tab::Pricing;

        handle_key(&mut controller, press(KeyCode::Char('a')));
        assert!(controller.state.modal.is_some());
        for c in "gpt-4q".chars() {
            assert_eq!(handle_key(&mut controller, press(KeyCode::Char(c))), KeyOutcome::Continue);
        }
        let form = controller.state.modal.as_ref().unwrap();
        assert_eq!(form.model(), Some("gpt-4q"));

        handle_key(&mut controller, press(KeyCode::Esc));
        assert!(controller.state.modal.is_none());
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let mut api = mock_api();
        api.expect_delete_pricing().times(1).returning(|_| {
            Ok(MutationResponse {
                success: true,
                ..Default::default()
            })
        });
        api.expect_get_pricing().returning(|| Ok(pricing()));
        let (mut controller, mut rx) = controller(api);
        controller.state.active_tab = Tab::Pricing;
        controller.state.pricing = Some(pricing());

        handle_key(&mut controller, press(KeyCode::Char('x')));
        assert_eq!(
            controller.state.confirm,
            Some(Confirm::Delete("gpt-4o".to_string()))
        );
        handle_key(&mut controller, press(KeyCode::Char('y')));
        assert!(controller.state.confirm.is_none());
        assert_eq!(drain(&mut rx).await.len(), 1);
    }

    #[tokio::test]
    async fn test_declined_reset_sends_nothing() {
        let (mut controller, mut rx) = controller(mock_api());
        controller.state.active_tab = Tab::Pricing;

        handle_key(&mut controller, press(KeyCode::Char('R')));
        assert_eq!(controller.state.confirm, Some(Confirm::Reset));
        handle_key(&mut controller, press(KeyCode::Char('n')));
        assert!(controller.state.confirm.is_none());
        assert!(drain(&mut rx).await.is_empty());
    }

    #[tokio::test]
    async fn test_rate_input_editing() {
        let (mut controller, _rx) = controller(mock_api());
        controller.state.active_tab = Tab::Pricing;
        controller.state.rate_input.clear();

        handle_key(&mut controller, press(KeyCode::Char('u')));
        assert!(controller.state.editing_rate);
        for c in "7.2q".chars() {
            handle_key(&mut controller, press(KeyCode::Char(c)));
        }
        assert_eq!(controller.state.rate_input, "7.2");
        assert!(controller.state.editing_rate);
    }
}
