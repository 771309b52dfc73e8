//! Dashboard main renderer

use super::components::{
    diagnostics, footer, header, logs, modal, overview, pricing, tasks,
};
use super::state::{DashboardState, Tab};
use super::utils::Palette;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::Style;
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        let palette = Palette::for_theme(state.theme);
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background)),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    match state.active_tab {
        Tab::Overview => overview::render_overview(f, main_chunks[1], state),
        Tab::Pricing => pricing::render_pricing(f, main_chunks[1], state),
        Tab::Tasks => tasks::render_tasks(f, main_chunks[1], state),
        Tab::Logs => logs::render_logs(f, main_chunks[1], state),
    }
    footer::render_footer(f, main_chunks[2], state);

    // Overlays, topmost last
    if state.show_diagnostics {
        diagnostics::render_diagnostics(f, state);
    }
    if let Some(form) = &state.modal {
        modal::render_form_modal(f, form, state);
    }
    if let Some(confirm) = &state.confirm {
        modal::render_confirm(f, confirm, state);
    }
}
