//! Token usage bar chart
//!
//! One stacked column per day: input tokens at the bottom, output tokens on
//! top, so a column's height is the day's total.

use super::super::chart::{UsageChart, UsageDay};
use super::super::state::DashboardState;
use crate::format::format_tokens;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

const BAR_WIDTH: u16 = 5;
const BAR_GAP: u16 = 2;
const BAR_SYMBOL: &str = "█";

/// Cell heights of the input and output segments of one column, scaled so
/// that a day totalling `max` fills `height` rows.
pub fn segment_heights(day: &UsageDay, max: u64, height: u16) -> (u16, u16) {
    if max == 0 || height == 0 {
        return (0, 0);
    }
    let scale = |value: u64| -> u16 {
        let scaled = (value as u128 * height as u128 + max as u128 / 2) / max as u128;
        scaled.min(height as u128) as u16
    };
    let total = scale(day.total());
    let input = scale(day.input).min(total);
    (input, total - input)
}

/// Stacked columns with the day total above and the `MM-DD` label below.
pub struct StackedBars<'a> {
    chart: &'a UsageChart,
}

impl<'a> StackedBars<'a> {
    pub fn new(chart: &'a UsageChart) -> Self {
        Self { chart }
    }
}

impl Widget for StackedBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // top row for totals, bottom row for labels
        if area.height < 3 || area.width < BAR_WIDTH {
            return;
        }
        let palette = self.chart.palette;
        let bars_height = area.height - 2;
        let baseline = area.bottom() - 2;
        let max = self.chart.max_value();
        let text_style = Style::default().fg(palette.text);

        for (i, day) in self.chart.days.iter().enumerate() {
            let x = area.x + i as u16 * (BAR_WIDTH + BAR_GAP);
            if x + BAR_WIDTH > area.right() {
                break;
            }
            let (input, output) = segment_heights(day, max, bars_height);

            for row in 0..input + output {
                let color = if row < input {
                    palette.input
                } else {
                    palette.output
                };
                for dx in 0..BAR_WIDTH {
                    if let Some(cell) = buf.cell_mut((x + dx, baseline - row)) {
                        cell.set_symbol(BAR_SYMBOL).set_fg(color);
                    }
                }
            }

            let value_row = baseline - (input + output);
            buf.set_stringn(
                x,
                value_row,
                format_tokens(day.total()),
                BAR_WIDTH as usize,
                text_style.add_modifier(Modifier::BOLD),
            );
            buf.set_stringn(
                x,
                area.bottom() - 1,
                &day.label,
                BAR_WIDTH as usize,
                text_style,
            );
        }
    }
}

pub fn render_usage_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(chart) = state.usage_chart.as_ref().filter(|c| !c.is_empty()) else {
        let block = Block::default()
            .title("Token 使用趋势 (7天)")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        f.render_widget(
            Paragraph::new("暂无使用数据")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let legend = Line::from(vec![
        Span::raw("Token 使用趋势 (7天)  "),
        Span::styled("■ 输入 Tokens ", Style::default().fg(chart.palette.input)),
        Span::styled("■ 输出 Tokens", Style::default().fg(chart.palette.output)),
    ]);
    let block = Block::default()
        .title(legend)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(chart.palette.grid));

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(StackedBars::new(chart), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::models::DailyUsage;
    use crate::ui::dashboard::chart::{INPUT_COLOR, OUTPUT_COLOR};

    fn chart(days: &[(u64, u64)]) -> UsageChart {
        let daily: Vec<DailyUsage> = days
            .iter()
            .enumerate()
            .map(|(i, (input, output))| DailyUsage {
                date: format!("2024-01-0{}", i + 1),
                input: *input,
                output: *output,
                cost: 0.0,
            })
            .collect();
        UsageChart::build(&daily, Theme::Dark)
    }

    #[test]
    fn test_segments_stack_to_the_day_total() {
        let chart = chart(&[(600, 400), (300, 200), (0, 0)]);
        let max = chart.max_value();
        assert_eq!(segment_heights(&chart.days[0], max, 10), (6, 4));
        assert_eq!(segment_heights(&chart.days[1], max, 10), (3, 2));
        assert_eq!(segment_heights(&chart.days[2], max, 10), (0, 0));
        assert_eq!(segment_heights(&chart.days[0], 0, 10), (0, 0));
    }

    #[test]
    fn test_input_is_drawn_below_output() {
        let chart = chart(&[(600, 400), (300, 200)]);
        let area = Rect::new(0, 0, 14, 12);
        let mut buf = Buffer::empty(area);
        StackedBars::new(&chart).render(area, &mut buf);

        // bars occupy rows 1..=10 of the first column
        assert_eq!(buf[(0, 10)].fg, INPUT_COLOR);
        assert_eq!(buf[(0, 5)].fg, INPUT_COLOR);
        assert_eq!(buf[(0, 4)].fg, OUTPUT_COLOR);
        assert_eq!(buf[(0, 1)].fg, OUTPUT_COLOR);
        assert_eq!(buf[(0, 0)].symbol(), "1");

        let label: String = (0..5).map(|x| buf[(x, 11)].symbol().to_string()).collect();
        assert_eq!(label, "01-01");
        // second column is half as tall
        assert_eq!(buf[(7, 6)].fg, OUTPUT_COLOR);
        assert_eq!(buf[(7, 5)].symbol(), "5");
    }
}
