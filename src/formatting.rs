use chrono::DateTime;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Map WMO weather codes to a display description.
///
/// Codes outside the table fall back to "Cloudy".
static WEATHER_CODES: phf::Map<u8, (&'static str, &'static str)> = phf::phf_map! {
    0u8 => ("Clear", "☀"),
    1u8 => ("Mostly clear", "⛅"),
    2u8 => ("Partly cloudy", "⛅"),
    3u8 => ("Overcast", "☁"),
    45u8 => ("Fog", "🌫"),
    48u8 => ("Fog", "🌫"),
    51u8 => ("Drizzle", "🌦"),
    61u8 => ("Rain", "🌧"),
    71u8 => ("Snow", "❄"),
    80u8 => ("Heavy showers", "🌧"),
    95u8 => ("Thunderstorm", "⛈"),
};

const WEATHER_DEFAULT: (&str, &str) = ("Cloudy", "☁");

pub fn weather_description(code: u8) -> &'static str {
    WEATHER_CODES.get(&code).unwrap_or(&WEATHER_DEFAULT).0
}

pub fn weather_icon(code: u8) -> &'static str {
    WEATHER_CODES.get(&code).unwrap_or(&WEATHER_DEFAULT).1
}

/// Round a raw temperature to the nearest integer for display.
pub fn round_temperature(temperature_c: f64) -> i64 {
    temperature_c.round() as i64
}

/// Truncate a string to the given display width, appending an ellipsis
/// when anything was cut. Width is measured in terminal columns, not chars.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.width() <= max_width {
        return s.to_string();
    }
    // Reserve one column for the ellipsis.
    let budget = max_width.saturating_sub(1);
    let mut width = 0usize;
    let mut out = String::new();
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > budget {
            break;
        }
        width += cw;
        out.push(c);
    }
    out.push('…');
    out
}

/// Turn a provider timestamp (RFC 3339) into a short display label.
/// Unparseable input falls back to the date portion of the raw string.
pub fn published_label(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => raw.split('T').next().unwrap_or(raw).to_string(),
    }
}
