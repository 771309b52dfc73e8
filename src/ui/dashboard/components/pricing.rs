//! Pricing tab
//!
//! Currency settings, the editable model table and the change history

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::format::{format_price, format_time, sanitize_text};
use crate::models::{PricingConfig, PricingHistoryEntry};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Padding, Paragraph, Row, Table, TableState,
};

pub const EMPTY_MODELS: &str = "暂无定价配置";
pub const EMPTY_HISTORY: &str = "暂无修改记录";

const HEADERS: [&str; 5] = ["模型", "提供商", "输入/1K", "输出/1K", "货币"];

/// Table cells of the editable entries in server order. `None` means the
/// table shows the placeholder row instead.
pub fn model_rows(pricing: Option<&PricingConfig>) -> Option<Vec<[String; 5]>> {
    let models = pricing?.editable_models();
    if models.is_empty() {
        return None;
    }
    Some(
        models
            .into_iter()
            .map(|(name, entry)| {
                [
                    sanitize_text(name),
                    entry
                        .provider
                        .as_deref()
                        .filter(|p| !p.is_empty())
                        .map(sanitize_text)
                        .unwrap_or_else(|| "-".to_string()),
                    format_price(entry.input_per_1k),
                    format_price(entry.output_per_1k),
                    entry
                        .currency
                        .as_deref()
                        .map(sanitize_text)
                        .unwrap_or_else(|| "USD".to_string()),
                ]
            })
            .collect(),
    )
}

fn optional(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human readable description of one history entry.
pub fn history_change(entry: &PricingHistoryEntry) -> String {
    if entry.is_reset() {
        return "重置为默认定价".to_string();
    }
    format!(
        "输入: {} → {}, 输出: {} → {}",
        optional(entry.old_input),
        optional(entry.new_input),
        optional(entry.old_output),
        optional(entry.new_output)
    )
}

/// History lines in server order, or a single placeholder.
pub fn history_lines(pricing: Option<&PricingConfig>, palette: &Palette) -> Vec<Line<'static>> {
    let history = pricing.map(|p| p.history.as_slice()).unwrap_or_default();
    if history.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_HISTORY,
            Style::default().fg(palette.muted),
        ))];
    }

    history
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(
                    format!("{} ", sanitize_text(&entry.model)),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(history_change(entry), Style::default().fg(palette.text)),
                Span::styled(
                    format!("  {}", format_time(entry.date.as_deref())),
                    Style::default().fg(palette.muted),
                ),
            ];
            if let Some(reason) = entry.reason.as_deref().filter(|r| !r.is_empty()) {
                spans.push(Span::styled(
                    format!("  ({})", sanitize_text(reason)),
                    Style::default().fg(palette.muted),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

/// Currency and exchange rate settings line.
pub fn settings_line(state: &DashboardState, palette: &Palette) -> Line<'static> {
    let updated = state
        .pricing
        .as_ref()
        .and_then(|p| p.exchange_rate.as_ref())
        .and_then(|r| r.last_updated.as_deref())
        .map(|t| format_time(Some(t)))
        .unwrap_or_else(|| "-".to_string());
    let rate_style = if state.editing_rate {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(palette.text)
    };
    let cursor = if state.editing_rate { "▏" } else { "" };

    Line::from(vec![
        Span::styled("显示货币: ", Style::default().fg(palette.muted)),
        Span::styled(
            state.currency.to_string(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   USD→CNY 汇率: ", Style::default().fg(palette.muted)),
        Span::styled(format!(" {}{} ", state.rate_input, cursor), rate_style),
        Span::styled(
            format!("   上次更新: {}", updated),
            Style::default().fg(palette.muted),
        ),
    ])
}

pub fn render_pricing(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(3),
            Constraint::Fill(2),
        ])
        .split(area);

    let block = |title: &'static str| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::horizontal(1))
    };

    f.render_widget(
        Paragraph::new(settings_line(state, &palette)).block(block("货币设置")),
        chunks[0],
    );

    let header = Row::new(HEADERS).style(
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(6),
    ];
    match model_rows(state.pricing.as_ref()) {
        Some(rows) => {
            let table = Table::new(
                rows.into_iter()
                    .map(|cells| Row::new(cells).style(Style::default().fg(palette.text))),
                widths,
            )
            .header(header)
            .block(block("模型定价"))
            .row_highlight_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::REVERSED),
            )
            .highlight_symbol("▶ ");
            let mut table_state = TableState::default().with_selected(Some(state.pricing_selected));
            f.render_stateful_widget(table, chunks[1], &mut table_state);
        }
        None => {
            let table = Table::new(
                [Row::new([EMPTY_MODELS]).style(Style::default().fg(palette.muted))],
                [Constraint::Fill(1)],
            )
            .header(header)
            .block(block("模型定价"));
            f.render_widget(table, chunks[1]);
        }
    }

    f.render_widget(
        Paragraph::new(history_lines(state.pricing.as_ref(), &palette)).block(block("修改记录")),
        chunks[2],
    );
}
