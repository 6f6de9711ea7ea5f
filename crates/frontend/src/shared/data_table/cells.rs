//! Reusable cell renderers. All of them read through `Option`, so a record
//! with an unexpected shape renders as a placeholder instead of failing.

use super::column::CellContext;
use crate::shared::components::ui::badge::Badge;
use leptos::prelude::*;
use serde_json::Value;

/// Text shown for a raw field value.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Shortens long text to `max` characters with a trailing ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}…", head)
    }
}

pub fn text<H>(ctx: CellContext<'_, H>) -> AnyView {
    display_value(ctx.value).into_any()
}

/// Plain text with the full value in the tooltip.
pub fn truncated<H>(ctx: CellContext<'_, H>, max: usize) -> AnyView {
    let full = display_value(ctx.value);
    let short = truncate(&full, max);
    view! { <span title=full>{short}</span> }.into_any()
}

/// Formats a server timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 (`2024-03-15T14:02:26.123Z`) and SQL (`2024-03-15 14:02:26`)
/// forms; anything else is shown as is.
pub fn format_datetime(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M";
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.naive_utc().format(OUT).to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(OUT).to_string();
    }
    raw.to_string()
}

pub fn datetime<H>(ctx: CellContext<'_, H>) -> AnyView {
    match ctx.value.and_then(Value::as_str) {
        Some(raw) => format_datetime(raw).into_any(),
        None => text(ctx),
    }
}

pub fn badge(label: impl Into<String>, variant: &'static str) -> AnyView {
    let label = label.into();
    view! { <Badge variant=variant.to_string()>{label}</Badge> }.into_any()
}

pub fn status_badge(active: bool) -> AnyView {
    if active {
        badge("Active", "success")
    } else {
        badge("Inactive", "neutral")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "2024-03-15 14:02");
        assert_eq!(format_datetime("2024-12-31 23:59:59"), "2024-12-31 23:59");
        assert_eq!(format_datetime("yesterday"), "yesterday");
    }

    #[test]
    fn test_display_value_fallbacks() {
        assert_eq!(display_value(None), "N/A");
        assert_eq!(display_value(Some(&Value::Null)), "");
        assert_eq!(display_value(Some(&json!("acme.com"))), "acme.com");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&json!(true))), "true");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 3), "abc…");
        assert_eq!(truncate("ёжик", 2), "ёж…");
    }
}
