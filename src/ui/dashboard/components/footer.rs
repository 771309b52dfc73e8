//! Dashboard footer component
//!
//! Renders key hints for the active tab and the current toasts

use super::super::state::{DashboardState, Tab, ToastKind};
use super::super::utils::Palette;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Key hints for the current tab.
pub fn key_hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Overview => "[1-4/Tab] 切换 | [R]efresh | [T]heme | [D]iagnostics | [Q] Quit",
        Tab::Pricing => {
            "[↑↓] 选择 | [A]dd | [E]dit | [X] 删除 | [Shift+R] 重置 | [C] 货币 | [U] 汇率 | [Shift+U] 自动汇率 | [Q] Quit"
        }
        Tab::Tasks => "[1-4/Tab] 切换 | [R]efresh | [T]heme | [Q] Quit",
        Tab::Logs => "'[' ']' 日志范围 | [R]efresh | [T]heme | [Q] Quit",
    }
}

/// Key hints while a dialog, the form or the rate input owns the keyboard.
pub fn input_hints(state: &DashboardState) -> Option<&'static str> {
    if !state.is_capturing_input() {
        return None;
    }
    Some(if state.confirm.is_some() {
        "[Y] 确定 | [N] 取消"
    } else if state.modal.is_some() {
        "[Tab/↑↓] 切换字段 | [Enter] 保存 | [Esc] 取消"
    } else {
        "输入汇率 | [Enter] 提交 | [Esc] 取消"
    })
}

pub fn render_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);

    let line = match state.toasts.back() {
        Some(toast) => {
            let color = match toast.kind {
                ToastKind::Success => palette.success,
                ToastKind::Error => palette.danger,
                ToastKind::Info => palette.accent,
            };
            Line::from(Span::styled(
                toast.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::from(Span::styled(
            input_hints(state).unwrap_or_else(|| key_hints(state.active_tab)),
            Style::default().fg(palette.muted),
        )),
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(footer, area);
}
