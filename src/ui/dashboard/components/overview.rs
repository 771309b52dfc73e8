//! Overview tab
//!
//! Status cards, host resources, version info and the token usage chart

use super::super::state::DashboardState;
use super::super::utils::{Palette, ratio};
use super::usage_chart::render_usage_chart;
use crate::cost::CostPreview;
use crate::format::{format_duration, format_tokens, sanitize_text};
use crate::models::SystemInfo;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};

/// One status card: title, headline value and a detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
    pub detail: String,
}

/// The four headline cards, with placeholders for whatever is not loaded.
pub fn summary_cards(state: &DashboardState) -> Vec<Card> {
    let summary = state.summary.as_ref();
    let gateway = summary.and_then(|s| s.gateway.as_ref());
    let tasks = summary.and_then(|s| s.tasks.as_ref());
    let usage = summary.and_then(|s| s.token_usage.as_ref());
    let cost = cost_preview(state);

    vec![
        Card {
            title: "Gateway",
            value: match gateway {
                Some(g) if g.online => "🟢 在线".to_string(),
                Some(_) => "🔴 离线".to_string(),
                None => "-".to_string(),
            },
            detail: format!(
                "运行: {}",
                format_duration(gateway.and_then(|g| g.uptime_seconds))
            ),
        },
        Card {
            title: "运行中任务",
            value: tasks
                .map(|t| t.running.to_string())
                .unwrap_or_else(|| "-".to_string()),
            detail: format!(
                "24小时完成: {}",
                tasks
                    .map(|t| t.completed_24h.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ),
        },
        Card {
            title: "今日 Tokens",
            value: usage
                .map(|u| format_tokens(u.today_total()))
                .unwrap_or_else(|| "-".to_string()),
            detail: format!(
                "本周: {}",
                usage
                    .map(|u| format_tokens(u.week_total()))
                    .unwrap_or_else(|| "-".to_string())
            ),
        },
        Card {
            title: "预估成本",
            value: cost
                .as_ref()
                .map(|c| c.today.clone())
                .unwrap_or_else(|| "-".to_string()),
            detail: format!(
                "本周: {}",
                cost.map(|c| c.week).unwrap_or_else(|| "-".to_string())
            ),
        },
    ]
}

/// Cost preview, available once both the summary and the pricing are cached.
pub fn cost_preview(state: &DashboardState) -> Option<CostPreview> {
    let usage = state.summary.as_ref()?.token_usage.as_ref()?;
    let pricing = state.pricing.as_ref()?;
    Some(CostPreview::compute(usage, pricing, state.currency))
}

/// Session line: total sessions and last activity.
pub fn session_line(state: &DashboardState) -> String {
    let summary = state.summary.as_ref();
    let sessions = summary
        .and_then(|s| s.token_usage.as_ref())
        .and_then(|u| u.total_sessions)
        .filter(|n| *n > 0)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let online = summary
        .and_then(|s| s.gateway.as_ref())
        .map(|g| g.online)
        .unwrap_or(false);
    format!(
        "会话总数: {}   最近活跃: {}",
        sessions,
        if online { "刚刚" } else { "未知" }
    )
}

/// Host identity lines of the system panel.
pub fn system_lines(system: &SystemInfo) -> Vec<String> {
    let text = |v: &Option<String>| v.as_deref().map(sanitize_text);
    let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    let cpu = system.cpu.as_ref();
    let memory = system.memory.as_ref();
    let disk = system.disk.as_ref();

    vec![
        format!(
            "主机: {}",
            text(&system.hostname).unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "系统: {} {}",
            text(&system.os).unwrap_or_else(|| "-".to_string()),
            text(&system.architecture).unwrap_or_default()
        ),
        format!(
            "IP: {}",
            text(&system.ip).unwrap_or_else(|| "-".to_string())
        ),
        format!(
            "CPU: {}核 ({}%)",
            cpu.and_then(|c| c.count)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            system.cpu_percent()
        ),
        format!(
            "内存: {}GB / {}GB",
            number(memory.and_then(|m| m.available_gb)),
            number(memory.and_then(|m| m.total_gb))
        ),
        format!(
            "磁盘: {}GB / {}GB 可用",
            number(disk.and_then(|d| d.free_gb)),
            number(disk.and_then(|d| d.total_gb))
        ),
    ]
}

/// Version lines and update badge text.
pub fn version_lines(state: &DashboardState) -> (Vec<String>, Option<(String, bool)>) {
    let Some(info) = state.version.as_ref().and_then(|v| v.openclaw.as_ref()) else {
        return (vec!["当前版本: -".to_string(), "最新版本: -".to_string()], None);
    };
    let current = info.current.as_deref().map(sanitize_text);
    let latest = info.latest.as_deref().map(sanitize_text);
    let badge = if info.update_available {
        (
            format!("有更新: {}", latest.clone().unwrap_or_default()),
            true,
        )
    } else {
        ("已是最新".to_string(), false)
    };
    (
        vec![
            format!("当前版本: {}", current.unwrap_or_else(|| "-".to_string())),
            format!("最新版本: {}", latest.unwrap_or_else(|| "-".to_string())),
        ],
        Some(badge),
    )
}

pub fn render_overview(f: &mut Frame, area: Rect, state: &DashboardState) {
    let palette = Palette::for_theme(state.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Fill(1),
        ])
        .split(area);

    render_cards(f, rows[0], state, &palette);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    render_system_panel(f, middle[0], state, &palette);
    render_version_panel(f, middle[1], state, &palette);

    render_usage_chart(f, rows[2], state);
}

fn panel_block<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border))
        .title_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .padding(Padding::horizontal(1))
}

fn render_cards(f: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let cards = summary_cards(state);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let value_color = match card.value.as_str() {
            v if v.starts_with('🟢') => palette.success,
            v if v.starts_with('🔴') => palette.danger,
            _ => palette.text,
        };
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default().fg(value_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.detail.clone(),
                Style::default().fg(palette.muted),
            )),
        ])
        .block(panel_block(card.title, palette));
        f.render_widget(paragraph, *chunk);
    }
}

fn render_system_panel(f: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let block = panel_block("系统信息", palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(system) = state.system.as_ref() else {
        f.render_widget(
            Paragraph::new("加载中...").style(Style::default().fg(palette.muted)),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let lines: Vec<Line> = system_lines(system)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(palette.text))))
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauges = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 3])
        .split(chunks[1]);
    let readings = [
        ("CPU", system.cpu_percent()),
        ("内存", system.memory_percent()),
        ("磁盘", system.disk_percent()),
    ];
    for ((label, percent), chunk) in readings.iter().zip(gauges.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(palette.usage(*percent)).bg(palette.surface))
            .ratio(ratio(*percent))
            .label(format!("{} {:.1}%", label, percent));
        f.render_widget(gauge, *chunk);
    }
}

fn render_version_panel(f: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let (lines, badge) = version_lines(state);
    let mut text: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(palette.text))))
        .collect();
    if let Some((label, update)) = badge {
        let color: Color = if update {
            palette.warning
        } else {
            palette.success
        };
        text.push(Line::from(Span::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        session_line(state),
        Style::default().fg(palette.muted),
    )));
    text.push(Line::from(Span::styled(
        format!("后端: {}", state.environment),
        Style::default().fg(palette.muted),
    )));

    f.render_widget(
        Paragraph::new(text).block(panel_block("OpenClaw 版本", palette)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::environment::Environment;
    use crate::models::{
        DiskInfo, GatewayStatus, ModelPricing, PricingConfig, Summary, TokenUsage, UsagePeriod,
        VersionInfo, VersionResponse,
    };
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> DashboardState {
        DashboardState::new(Environment::Local, Theme::Dark, 7, false)
    }

    fn summary() -> Summary {
        Summary {
            gateway: Some(GatewayStatus {
                online: true,
                uptime_seconds: Some(3661.0),
            }),
            tasks: None,
            token_usage: Some(TokenUsage {
                today: Some(UsagePeriod {
                    input: 0,
                    output: 0,
                    total: 1000,
                }),
                week: Some(UsagePeriod {
                    input: 0,
                    output: 0,
                    total: 1_500_000,
                }),
                total_sessions: Some(12),
            }),
        }
    }

    #[test]
    fn test_cards_render_placeholders_before_load() {
        let cards = summary_cards(&state());
        assert!(cards.iter().all(|c| c.value == "-"));
    }

    #[test]
    fn test_cards_render_loaded_summary() {
        let mut state = state();
        state.summary = Some(summary());
        let cards = summary_cards(&state);

        assert_eq!(cards[0].value, "🟢 在线");
        assert_eq!(cards[0].detail, "运行: 1小时1分钟");
        assert_eq!(cards[2].value, "1K");
        assert_eq!(cards[2].detail, "本周: 1.5M");
        // no pricing cached yet
        assert_eq!(cards[3].value, "-");
        assert_eq!(session_line(&state), "会话总数: 12   最近活跃: 刚刚");
    }

    #[test]
    fn test_cost_card_uses_cached_pricing() {
        let mut state = state();
        state.summary = Some(summary());
        state.currency = crate::models::Currency::Usd;
        state.pricing = Some(PricingConfig {
            models: vec![(
                "default".to_string(),
                ModelPricing {
                    input_per_1k: Some(1.0),
                    output_per_1k: Some(2.0),
                    ..Default::default()
                },
            )],
            ..Default::default()
        });

        let cards = summary_cards(&state);
        assert_eq!(cards[3].value, "$1.40");
    }

    #[test]
    fn test_version_badge() {
        let mut state = state();
        assert!(version_lines(&state).1.is_none());

        state.version = Some(VersionResponse {
            monitor: None,
            openclaw: Some(VersionInfo {
                current: Some("1.0.0".to_string()),
                latest: Some("1.1.0".to_string()),
                update_available: true,
            }),
        });
        let (lines, badge) = version_lines(&state);
        assert_eq!(lines[0], "当前版本: 1.0.0");
        assert_eq!(badge, Some(("有更新: 1.1.0".to_string(), true)));
    }

    #[test]
    fn test_system_lines_fall_back_to_dashes() {
        let system = SystemInfo {
            hostname: Some("box\x1b[2J".to_string()),
            disk: Some(DiskInfo {
                total_gb: Some(100.0),
                free_gb: Some(40.0),
            }),
            ..Default::default()
        };
        let lines = system_lines(&system);
        assert_eq!(lines[0], "主机: box[2J");
        assert_eq!(lines[2], "IP: -");
        assert_eq!(lines[5], "磁盘: 40GB / 100GB 可用");
    }

    #[test]
    fn test_render_without_data_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let state = state();
        terminal
            .draw(|f| render_overview(f, f.area(), &state))
            .unwrap();
    }
}
