//! Display formatting for numbers, money, durations and timestamps.

use crate::models::Currency;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Round to `decimals` places with exact halves going away from zero, so
/// the fixed-precision formats below never round half to even.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Abbreviate a token count: `1.5M`, `12K`, `999`.
pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", round_half_up(n as f64 / 1_000_000.0, 1))
    } else if n >= 1_000 {
        format!("{:.0}K", round_half_up(n as f64 / 1_000.0, 0))
    } else {
        n.to_string()
    }
}

/// Format an amount with its currency symbol. Sub-cent amounts keep four decimals.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let symbol = currency.symbol();
    if amount >= 0.01 {
        format!("{}{:.2}", symbol, round_half_up(amount, 2))
    } else if amount > 0.0 {
        format!("{}{:.4}", symbol, round_half_up(amount, 4))
    } else {
        format!("{}0.00", symbol)
    }
}

/// Render an uptime in the two largest units, e.g. `2天3小时` or `5小时12分钟`.
pub fn format_duration(seconds: Option<f64>) -> String {
    let seconds = match seconds {
        Some(s) if s.is_finite() && s != 0.0 => s,
        _ => return "-".to_string(),
    };
    let total = seconds.max(0.0) as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{}天{}小时", days, hours)
    } else if hours > 0 {
        format!("{}小时{}分钟", hours, minutes)
    } else {
        format!("{}分钟", minutes)
    }
}

/// Parse a backend timestamp. The backend emits naive local ISO-8601 strings,
/// RFC 3339 strings are accepted as well.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Relative age of a timestamp against `now`.
pub fn format_relative_time(value: Option<&str>, now: DateTime<Local>) -> String {
    let Some(time) = value.and_then(parse_timestamp) else {
        return "-".to_string();
    };
    let diff = (now - time).num_seconds();

    if diff < 60 {
        "刚刚".to_string()
    } else if diff < 3_600 {
        format!("{}分钟前", diff / 60)
    } else if diff < 86_400 {
        format!("{}小时前", diff / 3_600)
    } else {
        time.format("%-m月%-d日 %H:%M").to_string()
    }
}

/// Relative age against the current local time.
pub fn format_time(value: Option<&str>) -> String {
    format_relative_time(value, Local::now())
}

/// `YYYY-MM-DD` to `MM-DD` chart label.
pub fn format_date_label(date: &str) -> String {
    date.get(5..).unwrap_or(date).to_string()
}

/// Per-1k price with four decimals, `-` when absent.
pub fn format_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", round_half_up(v, 4)))
        .unwrap_or_else(|| "-".to_string())
}

/// Neutralise server-supplied text before it reaches the terminal.
///
/// Control characters, escape sequence introducers included, are dropped;
/// line breaks and tabs collapse to spaces. Markup stays literal text.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(0), "0");
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1000), "1K");
        assert_eq!(format_tokens(45_600), "46K");
        assert_eq!(format_tokens(1_500_000), "1.5M");
        // exact halves round up
        assert_eq!(format_tokens(2_500), "3K");
        assert_eq!(format_tokens(1_250_000), "1.3M");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, Currency::Cny), "¥0.00");
        assert_eq!(format_currency(0.005, Currency::Usd), "$0.0050");
        assert_eq!(format_currency(12.3, Currency::Cny), "¥12.30");
        assert_eq!(format_currency(-3.0, Currency::Usd), "$0.00");
        assert_eq!(format_currency(0.125, Currency::Cny), "¥0.13");
        assert_eq!(format_currency(0.00625, Currency::Usd), "$0.0063");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(None), "-");
        assert_eq!(format_duration(Some(0.0)), "-");
        assert_eq!(format_duration(Some(3661.0)), "1小时1分钟");
        assert_eq!(format_duration(Some(90_000.0)), "1天1小时");
        assert_eq!(format_duration(Some(720.5)), "12分钟");
        assert_eq!(format_duration(Some(2.0 * 86_400.0 + 3.0 * 3_600.0)), "2天3小时");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let iso = |t: DateTime<Local>| t.naive_local().format("%Y-%m-%dT%H:%M:%S%.f").to_string();

        assert_eq!(format_relative_time(None, now), "-");
        assert_eq!(format_relative_time(Some("not a date"), now), "-");
        assert_eq!(
            format_relative_time(Some(&iso(now - Duration::seconds(30))), now),
            "刚刚"
        );
        assert_eq!(
            format_relative_time(Some(&iso(now - Duration::minutes(5))), now),
            "5分钟前"
        );
        assert_eq!(
            format_relative_time(Some(&iso(now - Duration::hours(3))), now),
            "3小时前"
        );
        assert_eq!(
            format_relative_time(Some(&iso(now - Duration::days(2))), now),
            "3月12日 12:00"
        );
    }

    #[test]
    fn test_format_date_label() {
        assert_eq!(format_date_label("2026-03-14"), "03-14");
        assert_eq!(format_date_label("bad"), "bad");
    }

    #[test]
    fn test_sanitize_text_keeps_markup_inert() {
        assert_eq!(
            sanitize_text("<script>alert('x')</script>"),
            "<script>alert('x')</script>"
        );
        assert_eq!(sanitize_text("\x1b[2Jwiped\x07"), "[2Jwiped");
        assert_eq!(sanitize_text("line1\nline2"), "line1 line2");
    }
}
