//! Pricing form modal and confirmation dialog

use super::super::form::{FormField, PricingForm};
use super::super::state::{Confirm, DashboardState};
use super::super::utils::Palette;
use crate::format::sanitize_text;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

/// Rectangle of `width` x `height` centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// One line per form field, the focused one highlighted.
pub fn form_lines(form: &PricingForm, palette: &Palette) -> Vec<Line<'static>> {
    PricingForm::fields()
        .iter()
        .map(|field| {
            let focused = form.focus == *field;
            let read_only = *field == FormField::Model && form.is_editing();
            let value = match field {
                FormField::Currency => format!("◀ {} ▶", form.value(*field)),
                _ => sanitize_text(&form.value(*field)),
            };
            let value_style = if focused {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::REVERSED)
            } else if read_only {
                Style::default().fg(palette.muted)
            } else {
                Style::default().fg(palette.text)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<10}", field.label()),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(format!(" {} ", value), value_style),
            ])
        })
        .collect()
}

pub fn render_form_modal(f: &mut Frame, form: &PricingForm, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let area = centered_rect(60, 14, f.area());
    let title = if form.is_editing() {
        "编辑定价"
    } else {
        "新增模型定价"
    };

    let mut lines = form_lines(form, &palette);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Tab] 下一项  [Space] 切换货币  [Enter] 保存  [Esc] 取消",
        Style::default().fg(palette.muted),
    )));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.surface))
        .padding(Padding::uniform(1));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_confirm(f: &mut Frame, confirm: &Confirm, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let area = centered_rect(56, 7, f.area());

    let lines = vec![
        Line::from(Span::styled(
            sanitize_text(&confirm.prompt()),
            Style::default().fg(palette.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Y] 确定   [N] 取消",
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default()
        .title("确认")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(palette.warning))
        .style(Style::default().bg(palette.surface))
        .padding(Padding::horizontal(1));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    #[test]
    fn test_centered_rect_fits_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(60, 14, area);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 10);

        let rect = centered_rect(20, 4, Rect::new(0, 0, 100, 40));
        assert_eq!((rect.x, rect.y), (40, 18));
    }

    #[test]
    fn test_form_lines_cover_all_fields() {
        let palette = Palette::for_theme(Theme::Dark);
        let form = PricingForm::new_entry();
        let lines = form_lines(&form, &palette);
        assert_eq!(lines.len(), PricingForm::fields().len());
        let currency: String = lines[4].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(currency.contains("CNY"));
    }
}
