// Whitespace canonicalization for raw management-query output.
//
// Runs of two or more whitespace characters are removed outright, not
// squeezed to one space: "Intel  Core" becomes "IntelCore". Rendered
// summaries depend on this exact form.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Remove every run of 2+ whitespace characters and trim the result.
pub fn normalize_line(line: &str) -> String {
    WHITESPACE_RUNS.replace_all(line, "").trim().to_string()
}

/// Split a raw query result into normalized, non-empty lines in input order.
///
/// Lines equal to `exclude` (typically the property header) are dropped.
pub fn normalize_block(raw: &str, exclude: Option<&str>) -> Vec<String> {
    let cleaned = raw.replace('\r', "");
    cleaned
        .trim()
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && exclude.map_or(true, |label| trimmed != label)
        })
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Join every line of a raw result into one normalized value.
pub fn normalize_joined(raw: &str) -> String {
    normalize_line(&raw.replace(['\r', '\n'], ""))
}
