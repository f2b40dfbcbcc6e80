const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label used for an open-ended period.
pub const PRESENT: &str = "Present";

/// Render a stored date for display.
///
/// `YYYY-MM` and `YYYY-MM-DD` become `Mon YYYY`. Anything else is returned trimmed but
/// otherwise untouched.
pub fn format_date(raw: &str) -> String {
    let s = raw.trim();
    parse_year_month(s)
        .map(|(year, month)| format!("{} {year}", MONTHS[month - 1]))
        .unwrap_or_else(|| s.to_string())
}

/// Render a start/end pair, or `None` when both are blank.
pub fn format_period(start: &str, end: &str) -> Option<String> {
    let start = start.trim();
    let end = end.trim();
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(format!("{} - {PRESENT}", format_date(start))),
        (true, false) => Some(format_date(end)),
        (false, false) => Some(format!("{} - {}", format_date(start), format_date(end))),
    }
}

fn parse_year_month(s: &str) -> Option<(u32, usize)> {
    let mut parts = s.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next();
    if parts.next().is_some() || year.len() != 4 || month.len() != 2 {
        return None;
    }
    if let Some(d) = day
        && (d.len() != 2 || !d.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    let year: u32 = year.parse().ok()?;
    let month: usize = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[cfg(test)]
#[path = "../../tests/unit/document/period.rs"]
mod tests;
