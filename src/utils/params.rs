// Lenient parsing for query-string parameters.
// Invalid or missing input becomes the documented default, it is never rejected.

/// Parses an integer parameter, falling back to `default` when the value is
/// missing, blank or not a number.
pub fn parse_int_or(value: Option<&str>, default: i64) -> i64 {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

/// Only the exact string `"true"` enables a flag.
pub fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Blank strings are treated as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
