//! Text utilities for dotted names.

/// Split a dotted reference into its qualifier and final segment.
///
/// # Example
/// ```
/// use enum_meta::base::text_utils::split_last_segment;
///
/// assert_eq!(split_last_segment("p.Color.RED"), Some(("p.Color", "RED")));
/// assert_eq!(split_last_segment("RED"), None);
/// ```
pub fn split_last_segment(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.')
        .filter(|(qualifier, last)| !qualifier.is_empty() && !last.is_empty())
}

/// Check if `name` ends with `suffix` on a segment boundary.
///
/// # Example
/// ```
/// use enum_meta::base::text_utils::ends_with_segments;
///
/// assert!(ends_with_segments("a.b.VehicleArea", "VehicleArea"));
/// assert!(ends_with_segments("VehicleArea", "VehicleArea"));
/// assert!(!ends_with_segments("a.b.MyVehicleArea", "VehicleArea"));
/// ```
pub fn ends_with_segments(name: &str, suffix: &str) -> bool {
    match name.strip_suffix(suffix) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}

/// Check if `name` starts with `prefix` on a segment boundary, with at least one
/// segment left over.
pub fn starts_with_segments(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('.'))
}
