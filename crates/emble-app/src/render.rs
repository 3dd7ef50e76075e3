//! Plain-text rendering of the dashboard regions.

use chrono::NaiveDate;
use emble_dashboard::{KpiState, KpiStatus, SeriesState};
use emble_types::{ChatMessage, SeriesPoint};

/// Whole kronor with space-grouped thousands, e.g. `1 234 567 kr`.
pub fn format_sek(amount: f64) -> String {
    format!("{} kr", group_thousands(amount.round()))
}

/// Short form for chart axes: `1,2 mn`, `45 tn`, `3,1 md`.
pub fn format_compact(amount: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1.0, ""), (1e3, "tn"), (1e6, "mn"), (1e9, "md")];

    let mut idx = UNITS
        .iter()
        .rposition(|(scale, _)| amount.abs() >= *scale)
        .unwrap_or(0);

    // Rounding can carry into the next unit: 999 950 is `1 mn`, not `1000 tn`
    let mut rounded = round_compact(amount / UNITS[idx].0, idx == 0);
    while rounded.abs() >= 1000.0 && idx + 1 < UNITS.len() {
        idx += 1;
        rounded = round_compact(amount / UNITS[idx].0, false);
    }

    let text = if idx == 0 || rounded.abs() >= 100.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded).replace('.', ",")
    };

    match UNITS[idx].1 {
        "" => text,
        unit => format!("{} {}", text.trim_end_matches(",0"), unit),
    }
}

/// Whole numbers from 100 up (and for plain amounts), one decimal below.
fn round_compact(scaled: f64, whole: bool) -> f64 {
    if whole || scaled.abs() >= 100.0 {
        scaled.round()
    } else {
        (scaled * 10.0).round() / 10.0
    }
}

/// `2024-03` becomes `Mar 2024`, `2024-03-15` becomes `15 Mar 2024`.
/// Anything else is returned unchanged.
pub fn format_month(date: &str) -> String {
    if date.len() == 7 {
        if let Ok(day) = NaiveDate::parse_from_str(&format!("{}-01", date), "%Y-%m-%d") {
            return day.format("%b %Y").to_string();
        }
    } else if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.format("%-d %b %Y").to_string();
    }
    date.to_string()
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{}", value.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn kpi_strip(state: &KpiState) -> String {
    let Some(summary) = &state.summary else {
        return match state.status {
            KpiStatus::Idle | KpiStatus::Loading => "KPIs: loading...".to_string(),
            KpiStatus::Ready | KpiStatus::Unavailable => "KPIs: unavailable".to_string(),
        };
    };

    let mut line = format!(
        "Revenue YTD {} | Expenses YTD {} | Net result YTD {}",
        format_sek(summary.revenue_ytd),
        format_sek(summary.expenses_ytd),
        format_sek(summary.net_result_ytd),
    );
    if let Some(year) = summary.period.year {
        line = format!("[{}] {}", year, line);
    }
    if state.status == KpiStatus::Unavailable {
        line.push_str(" (stale)");
    }
    line
}

pub fn series_table(state: &SeriesState) -> String {
    let mut out = String::new();

    if state.groups.is_empty() {
        out.push_str("Account groups: none\n");
    } else {
        out.push_str("Account groups: ");
        let labels: Vec<String> = state
            .groups
            .iter()
            .map(|g| {
                if state.selection.group.as_deref() == Some(g.as_str()) {
                    format!("[{}]", g)
                } else {
                    g.clone()
                }
            })
            .collect();
        out.push_str(&labels.join(", "));
        out.push('\n');
    }

    let title = match &state.selection.group {
        Some(group) => format!("{} ({})", group, state.selection.window),
        None => format!("No group selected ({})", state.selection.window),
    };
    out.push_str(&title);
    if state.loading {
        out.push_str(" loading...");
    }
    out.push('\n');

    if state.series.is_empty() {
        out.push_str("  no data\n");
        return out;
    }

    for point in &state.series {
        out.push_str(&series_row(point));
        out.push('\n');
    }
    out
}

fn series_row(point: &SeriesPoint) -> String {
    format!(
        "  {:<12} {:>12} {:>12}",
        format_month(&point.date),
        format_compact(point.amount),
        format_compact(point.amount_ma)
    )
}

pub fn chat_entry(message: &ChatMessage) -> String {
    let who = if message.is_user() { "you" } else { "analyst" };
    let mut out = format!("{}> {}", who, message.text);

    match message.plot_bytes() {
        Some(Ok(bytes)) => out.push_str(&format!("\n[plot: {} bytes]", bytes.len())),
        Some(Err(_)) => out.push_str("\n[plot: unreadable]"),
        None => {}
    }
    out
}
