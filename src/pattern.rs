//! Route pattern parsing and matching.
//!
//! Patterns are validated eagerly when the route table is assembled, so a
//! malformed pattern fails at startup rather than on first navigation.
//!
//! Supported syntax:
//! - `*` — the wildcard pattern, matches any path
//! - `/dashboard` — literal segments, matched byte-for-byte
//! - `/session/:sessionId` - `:name` segments match any single path segment
//!   and capture its value

use std::collections::HashMap;

use crate::error::PatternError;
use crate::path::{normalize, segments};

/// One parsed component of a non-wildcard pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	/// Matches exactly this text.
	Literal(String),
	/// Matches any single segment, capturing it under the given name.
	Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
	/// Matches every path, including the root.
	Wildcard,
	/// Matches paths with exactly this many segments.
	Segments(Vec<Segment>),
}

/// A validated, compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The original pattern string.
	raw: String,
	kind: PatternKind,
}

/// Path parameters captured by a matched pattern.
///
/// Values are available both by name and in the order their `:name`
/// segments appear in the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	named: HashMap<String, String>,
	ordered: Vec<String>,
}

impl RouteParams {
	/// Returns the captured value for a parameter name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.named.get(name).map(String::as_str)
	}

	/// Returns the captured value at the given pattern position.
	pub fn positional(&self, index: usize) -> Option<&str> {
		self.ordered.get(index).map(String::as_str)
	}

	/// Returns the number of captured parameters.
	pub fn len(&self) -> usize {
		self.ordered.len()
	}

	/// Returns `true` when the match captured nothing.
	pub fn is_empty(&self) -> bool {
		self.ordered.is_empty()
	}
}

impl RoutePattern {
	/// Parses and validates a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] when the pattern is empty, a non-wildcard
	/// pattern lacks a leading `/`, or a parameter segment has no name.
	pub fn new(raw: &str) -> Result<Self, PatternError> {
		if raw == "*" {
			return Ok(Self {
				raw: raw.to_string(),
				kind: PatternKind::Wildcard,
			});
		}
		if raw.is_empty() {
			return Err(PatternError::Empty);
		}
		if !raw.starts_with('/') {
			return Err(PatternError::MissingLeadingSlash(raw.to_string()));
		}

		let mut parsed = Vec::new();
		for part in segments(raw) {
			match part.strip_prefix(':') {
				Some("") => return Err(PatternError::UnnamedParameter(raw.to_string())),
				Some(name) => parsed.push(Segment::Param(name.to_string())),
				None => parsed.push(Segment::Literal(part.to_string())),
			}
		}

		Ok(Self {
			raw: raw.to_string(),
			kind: PatternKind::Segments(parsed),
		})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.raw
	}

	/// Returns whether this is the wildcard pattern.
	pub fn is_wildcard(&self) -> bool {
		self.kind == PatternKind::Wildcard
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> Vec<&str> {
		match &self.kind {
			PatternKind::Wildcard => Vec::new(),
			PatternKind::Segments(parts) => parts
				.iter()
				.filter_map(|part| match part {
					Segment::Param(name) => Some(name.as_str()),
					Segment::Literal(_) => None,
				})
				.collect(),
		}
	}

	/// Attempts to match a normalized path against this pattern.
	///
	/// The wildcard matches everything and captures nothing. A segment
	/// pattern matches only paths with the same segment count, comparing
	/// literals byte-for-byte and capturing `:name` positions.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		let parts = match &self.kind {
			PatternKind::Wildcard => return Some(RouteParams::default()),
			PatternKind::Segments(parts) => parts,
		};

		let concrete = segments(path);
		if concrete.len() != parts.len() {
			return None;
		}

		let mut params = RouteParams::default();
		for (part, value) in parts.iter().zip(concrete) {
			match part {
				Segment::Literal(literal) => {
					if literal != value {
						return None;
					}
				}
				Segment::Param(name) => {
					params.named.insert(name.clone(), value.to_string());
					params.ordered.push(value.to_string());
				}
			}
		}

		Some(params)
	}

	/// Rebuilds a concrete path from this pattern and parameter values.
	///
	/// Returns `None` for the wildcard pattern or when a parameter is
	/// missing from `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let parts = match &self.kind {
			PatternKind::Wildcard => return None,
			PatternKind::Segments(parts) => parts,
		};

		let mut path = String::new();
		for part in parts {
			path.push('/');
			match part {
				Segment::Literal(literal) => path.push_str(literal),
				Segment::Param(name) => path.push_str(params.get(name)?),
			}
		}

		Some(normalize(&path))
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/")]
	#[case("/a/b/c")]
	#[case("/session/402-A")]
	fn test_wildcard_matches_everything(#[case] path: &str) {
		let pattern = RoutePattern::new("*").unwrap();
		assert!(pattern.is_wildcard());
		assert!(pattern.matches(path).is_some());
	}

	#[rstest]
	fn test_exact_match() {
		let pattern = RoutePattern::new("/dashboard").unwrap();
		assert!(pattern.matches("/dashboard").is_some());
		assert!(pattern.matches("/upload").is_none());
		assert!(pattern.matches("/dashboard/extra").is_none());
	}

	#[rstest]
	fn test_root_pattern_matches_only_root() {
		let pattern = RoutePattern::new("/").unwrap();
		assert!(pattern.matches("/").is_some());
		assert!(pattern.matches("/dashboard").is_none());
	}

	#[rstest]
	fn test_param_segment_matches_any_value() {
		let pattern = RoutePattern::new("/session/:sessionId").unwrap();
		assert!(pattern.matches("/session/402-A").is_some());
		assert!(pattern.matches("/session/402-A/extra").is_none());
		assert!(pattern.matches("/session").is_none());
	}

	#[rstest]
	fn test_param_with_literal_suffix() {
		let pattern = RoutePattern::new("/session/:sessionId/comparison").unwrap();
		assert!(pattern.matches("/session/402-A/comparison").is_some());
		assert!(pattern.matches("/session/402-A/biometric").is_none());
	}

	#[rstest]
	fn test_param_capture() {
		let pattern = RoutePattern::new("/session/:sessionId/findings").unwrap();
		let params = pattern.matches("/session/402-A/findings").unwrap();
		assert_eq!(params.get("sessionId"), Some("402-A"));
		assert_eq!(params.positional(0), Some("402-A"));
		assert_eq!(params.len(), 1);
	}

	#[rstest]
	fn test_param_names_in_order() {
		let pattern = RoutePattern::new("/a/:x/b/:y").unwrap();
		assert_eq!(pattern.param_names(), vec!["x", "y"]);
	}

	#[rstest]
	#[case("", PatternError::Empty)]
	#[case("dashboard", PatternError::MissingLeadingSlash("dashboard".to_string()))]
	#[case("/session/:", PatternError::UnnamedParameter("/session/:".to_string()))]
	fn test_invalid_patterns(#[case] raw: &str, #[case] expected: PatternError) {
		assert_eq!(RoutePattern::new(raw).unwrap_err(), expected);
	}

	#[rstest]
	fn test_reverse() {
		let pattern = RoutePattern::new("/session/:sessionId/export").unwrap();
		let mut params = HashMap::new();
		params.insert("sessionId".to_string(), "402-A".to_string());
		assert_eq!(
			pattern.reverse(&params),
			Some("/session/402-A/export".to_string())
		);
	}

	#[rstest]
	fn test_reverse_missing_param() {
		let pattern = RoutePattern::new("/session/:sessionId").unwrap();
		assert_eq!(pattern.reverse(&HashMap::new()), None);
	}

	#[rstest]
	fn test_reverse_wildcard_is_none() {
		let pattern = RoutePattern::new("*").unwrap();
		assert_eq!(pattern.reverse(&HashMap::new()), None);
	}

	#[rstest]
	fn test_pattern_display_and_equality() {
		let a = RoutePattern::new("/session/:sessionId").unwrap();
		let b = RoutePattern::new("/session/:sessionId").unwrap();
		let c = RoutePattern::new("/session/:id").unwrap();
		assert_eq!(format!("{}", a), "/session/:sessionId");
		assert_eq!(a, b);
		assert_ne!(a, c);
	}
}
