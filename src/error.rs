//! Error types for client-side routing.

use thiserror::Error;

/// Error raised when a route pattern fails validation at registration time.
///
/// A bad route table is a programming error, so these surface immediately
/// from the table builder instead of being deferred to first navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The pattern string was empty.
	#[error("route pattern must not be empty")]
	Empty,
	/// A non-wildcard pattern did not start with `/`.
	#[error("route pattern '{0}' must start with '/'")]
	MissingLeadingSlash(String),
	/// A `:` segment carried no parameter name.
	#[error("route pattern '{0}' contains a parameter segment with no name")]
	UnnamedParameter(String),
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route pattern failed validation.
	#[error("invalid route pattern: {0}")]
	InvalidPattern(#[from] PatternError),
	/// No route is registered under the given name.
	#[error("invalid route name: {0}")]
	InvalidRouteName(String),
	/// A parameter required to reverse a pattern was not supplied.
	#[error("missing parameter: {0}")]
	MissingParameter(String),
	/// The history facility rejected a push/replace.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),
	/// The host environment has no navigable history.
	#[error("history facility unavailable: {0}")]
	HistoryUnavailable(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_pattern_error_display() {
		assert_eq!(
			PatternError::MissingLeadingSlash("dashboard".to_string()).to_string(),
			"route pattern 'dashboard' must start with '/'"
		);
	}

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::InvalidRouteName("command-center".to_string()).to_string(),
			"invalid route name: command-center"
		);
		assert_eq!(
			RouterError::from(PatternError::Empty).to_string(),
			"invalid route pattern: route pattern must not be empty"
		);
	}
}
