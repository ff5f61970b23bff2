//! Path normalization and segmentation.
//!
//! Every routing decision in this crate operates on normalized paths: a
//! leading `/`, no trailing `/` except for the root path itself. The two
//! functions here are the only place that shape is defined.

/// Normalizes a raw location string into a routable path.
///
/// Empty input becomes `/`, the root path stays `/`, and trailing slashes
/// are trimmed otherwise. Normalization is idempotent.
pub fn normalize(raw: &str) -> String {
	let trimmed = raw.trim_end_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else {
		trimmed.to_string()
	}
}

/// Splits a path into its non-empty `/`-delimited segments.
///
/// Empty components are discarded, so `/a//b` and `/a/b` segment
/// identically. The root path yields no segments.
pub fn segments(path: &str) -> Vec<&str> {
	path.split('/').filter(|part| !part.is_empty()).collect()
}
