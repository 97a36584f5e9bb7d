//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use spotdesk_core::api::PaginationMeta;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a section heading.
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the page position to stderr.
pub fn page(meta: &PaginationMeta) {
    eprintln!();
    eprintln!(
        "{}",
        format!(
            "Page {} of {} ({} total)",
            meta.page, meta.total_pages, meta.total
        )
        .dimmed()
    );
    if meta.has_next() {
        eprintln!("{}", format!("Next: --page {}", meta.page + 1).dimmed());
    }
}

/// Turn a client error into the message the backend meant for the user.
pub fn api_error(err: spotdesk_core::Error) -> anyhow::Error {
    tracing::debug!(error = %err, "Request failed");
    anyhow::anyhow!(err.user_message())
}

/// Whole US dollars with thousands separators, e.g. `$12,500`.
pub fn money(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

/// A backend timestamp as `May 1, 2024`, or `-` if it cannot be read.
pub fn date(value: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match parsed {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => "-".to_string(),
    }
}

/// `value`, or `-` when missing or blank.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}
