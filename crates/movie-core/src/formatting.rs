use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Vote count with thousands separators, e.g. `1,234,567`.
///
/// ```
/// use movie_core::formatting::format_votes;
///
/// assert_eq!(format_votes(10_000), "10,000");
/// assert_eq!(format_votes(999), "999");
/// ```
pub fn format_votes(votes: u64) -> String {
    group_thousands(&votes.to_string())
}

/// Rating out of ten with one decimal, e.g. `8.4/10`.
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}/10", rating)
}

/// Format a running time in minutes.
///
/// * `< 60` minutes → `"45m"`
/// * whole hours → `"3h"`
/// * otherwise → `"2h 30m"`
///
/// ```
/// use movie_core::formatting::format_duration;
///
/// assert_eq!(format_duration(45),  "45m");
/// assert_eq!(format_duration(180), "3h");
/// assert_eq!(format_duration(150), "2h 30m");
/// ```
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// `format_duration` for an optional value; unknown durations render as `-`.
pub fn format_optional_duration(minutes: Option<u32>) -> String {
    minutes.map(format_duration).unwrap_or_else(|| "-".to_string())
}

/// Shorten `title` to at most `max_width` display columns, appending `...`
/// when anything was cut.
pub fn truncate_title(title: &str, max_width: usize) -> String {
    if title.width() <= max_width {
        return title.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in title.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Display width of `text` in terminal / spreadsheet columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    crate::calculations::round_to((part / whole) * 100.0, decimal_places)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
