//! Tasks tab

use super::super::state::DashboardState;
use super::super::utils::Palette;
use crate::format::{format_time, sanitize_text};
use crate::models::TasksResponse;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub const EMPTY_TASKS: &str = "暂无运行中的任务";

/// One line per task in server order, or a single placeholder.
pub fn task_lines(tasks: Option<&TasksResponse>, palette: &Palette) -> Vec<Line<'static>> {
    let items = tasks.and_then(|t| t.tasks.as_deref()).unwrap_or_default();
    if items.is_empty() {
        return vec![Line::from(Span::styled(
            EMPTY_TASKS,
            Style::default().fg(palette.muted),
        ))];
    }

    items
        .iter()
        .map(|task| {
            let duration = task
                .duration_minutes
                .map(|m| format!("{}分钟", m))
                .unwrap_or_else(|| "-".to_string());
            Line::from(vec![
                Span::styled("● ", Style::default().fg(palette.task_status(&task.status))),
                Span::styled(
                    format!("{:<24} ", sanitize_text(&task.id)),
                    Style::default().fg(palette.text),
                ),
                Span::styled(
                    format!("{:<20} ", sanitize_text(&task.model)),
                    Style::default().fg(palette.accent),
                ),
                Span::styled(
                    format!("{:<14} ", format_time(task.last_active.as_deref())),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(duration, Style::default().fg(palette.muted)),
            ])
        })
        .collect()
}

pub fn render_tasks(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(area);

    let (running, completed) = state
        .tasks
        .as_ref()
        .map(|t| (t.running, t.completed_24h))
        .unwrap_or((0, 0));
    let counters = Paragraph::new(Line::from(vec![
        Span::styled("运行中: ", Style::default().fg(palette.muted)),
        Span::styled(
            running.to_string(),
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   24小时完成: ", Style::default().fg(palette.muted)),
        Span::styled(
            completed.to_string(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(counters, chunks[0]);

    let list = Paragraph::new(task_lines(state.tasks.as_ref(), &palette)).block(
        Block::default()
            .title("任务列表")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .padding(Padding::uniform(1)),
    );
    f.render_widget(list, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::models::Task;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_tasks_render_single_placeholder() {
        let none = task_lines(None, &palette());
        assert_eq!(none.len(), 1);
        assert_eq!(text(&none[0]), EMPTY_TASKS);

        let empty = TasksResponse {
            tasks: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(task_lines(Some(&empty), &palette()).len(), 1);
    }

    #[test]
    fn test_tasks_keep_server_order() {
        let response = TasksResponse {
            running: 2,
            completed_24h: 5,
            tasks: Some(vec![
                Task {
                    id: "zeta".to_string(),
                    status: "running".to_string(),
                    model: "gpt-4o".to_string(),
                    last_active: None,
                    duration_minutes: Some(12),
                },
                Task {
                    id: "alpha".to_string(),
                    status: "idle".to_string(),
                    model: "claude".to_string(),
                    last_active: None,
                    duration_minutes: None,
                },
            ]),
        };
        let lines = task_lines(Some(&response), &palette());
        assert_eq!(lines.len(), 2);
        assert!(text(&lines[0]).contains("zeta"));
        assert!(text(&lines[0]).ends_with("12分钟"));
        assert!(text(&lines[1]).ends_with('-'));
    }
}
