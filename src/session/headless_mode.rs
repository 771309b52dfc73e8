//! Headless mode execution
//!
//! Runs the same controller as the TUI without a terminal UI, printing
//! diagnostics as they arrive and the overview after every refresh cycle.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::controller::DashboardController;
use crate::controller::updates::Update;
use crate::ui::dashboard::DashboardState;
use crate::ui::dashboard::components::overview::{
    session_line, summary_cards, system_lines, version_lines,
};
use std::error::Error;

/// Plain text rendering of the overview panels.
pub fn summary_report(state: &DashboardState) -> Vec<String> {
    let mut lines: Vec<String> = summary_cards(state)
        .into_iter()
        .map(|card| format!("{}: {} ({})", card.title, card.value, card.detail))
        .collect();
    lines.push(session_line(state));
    if let Some(system) = state.system.as_ref() {
        lines.extend(system_lines(system));
    }
    let (versions, badge) = version_lines(state);
    lines.extend(versions);
    if let Some((text, _)) = badge {
        lines.push(text);
    }
    lines
}

/// Print and forget the diagnostics collected since the last call.
fn flush_diagnostics(controller: &mut DashboardController) {
    for event in controller.state.diagnostics.drain(..) {
        if event.should_display() {
            println!("{}", event);
        }
    }
}

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console diagnostics output
/// 2. Ctrl+C shutdown handling
/// 3. Update loop management
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    let SessionData {
        mut controller,
        mut update_receiver,
        join_handles,
        shutdown_sender,
        base_url,
    } = session;
    print_session_starting("headless", &base_url);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = shutdown_sender.subscribe();
    controller.start();

    // Update loop: apply results and print until shutdown
    loop {
        tokio::select! {
            Some(update) = update_receiver.recv() => {
                let cycle_done = matches!(update, Update::RefreshCycleDone { .. });
                controller.handle_update(update);
                flush_diagnostics(&mut controller);
                if cycle_done {
                    for line in summary_report(&controller.state) {
                        println!("{}", line);
                    }
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

/// Load the overview panels once and print them.
pub async fn run_snapshot(session: SessionData) -> Result<(), Box<dyn Error>> {
    let SessionData {
        mut controller,
        mut update_receiver,
        ..
    } = session;

    controller.start();
    while let Some(update) = update_receiver.recv().await {
        let cycle_done = matches!(update, Update::RefreshCycleDone { .. });
        controller.handle_update(update);
        if cycle_done {
            break;
        }
    }
    flush_diagnostics(&mut controller);
    for line in summary_report(&controller.state) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::environment::Environment;
    use crate::models::{GatewayStatus, Summary};

    #[test]
    fn test_report_without_data_uses_placeholders() {
        let state = DashboardState::new(Environment::Local, Theme::Dark, 7, false);
        let report = summary_report(&state);
        assert_eq!(report[0], "Gateway: - (运行: -)");
        assert!(report.iter().any(|l| l == "当前版本: -"));
    }

    #[test]
    fn test_report_shows_gateway_status() {
        let mut state = DashboardState::new(Environment::Local, Theme::Dark, 7, false);
        state.summary = Some(Summary {
            gateway: Some(GatewayStatus {
                online: true,
                uptime_seconds: Some(90.0),
            }),
            ..Default::default()
        });
        assert!(summary_report(&state)[0].starts_with("Gateway: 🟢 在线"));
    }
}
