//! Version classification
//!
//! Only the leading dot-separated segment is inspected. The comparison is a
//! plain string comparison: no numeric coercion and no semver parsing, so
//! `"01.0.0"` and `"1.0.0"` count as different majors.

/// Returns true when `latest` has a different leading segment than `wanted`
pub fn is_major_update(wanted: &str, latest: &str) -> bool {
    leading_segment(latest) != leading_segment(wanted)
}

/// Returns the text before the first `.` (the whole string if there is none)
fn leading_segment(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
