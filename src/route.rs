//! Route table: ordered (pattern, target) registrations plus one fallback.
//!
//! The table is generic over the opaque view type `V`, keeping the router
//! independent of any particular rendering layer. Entries are validated and
//! compiled once at startup through [`RouteTableBuilder`]; a malformed
//! pattern fails registration immediately.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{PatternError, RouterError};
use crate::pattern::{RoutePattern, RouteParams};

/// Factory producing a view for a matched route.
pub type ViewFactory<V> = Rc<dyn Fn(&RouteParams) -> V>;

/// What a matched route resolves to.
pub enum RouteKind<V> {
	/// Render a view.
	View(ViewFactory<V>),
	/// Navigate somewhere else instead of rendering.
	///
	/// The redirect fires exactly once per resolution and renders nothing;
	/// same-path navigation is a history no-op, so a redirect can never
	/// loop the router.
	Redirect {
		/// Destination path.
		to: String,
		/// Whether to replace the current history entry.
		replace: bool,
	},
}

impl<V> Clone for RouteKind<V> {
	fn clone(&self) -> Self {
		match self {
			Self::View(factory) => Self::View(Rc::clone(factory)),
			Self::Redirect { to, replace } => Self::Redirect {
				to: to.clone(),
				replace: *replace,
			},
		}
	}
}

impl<V> std::fmt::Debug for RouteKind<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::View(_) => f.write_str("View"),
			Self::Redirect { to, replace } => f
				.debug_struct("Redirect")
				.field("to", to)
				.field("replace", replace)
				.finish(),
		}
	}
}

/// One registered route: a validated pattern bound to a target.
pub struct Route<V> {
	pattern: RoutePattern,
	name: Option<String>,
	kind: RouteKind<V>,
}

impl<V> Route<V> {
	/// Returns the route name, if one was registered.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the route target.
	pub fn kind(&self) -> &RouteKind<V> {
		&self.kind
	}
}

impl<V> std::fmt::Debug for Route<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern)
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish()
	}
}

/// The complete, ordered set of routes plus the wildcard fallback.
///
/// Lookup scans non-wildcard entries in registration order and returns the
/// first match; the fallback is consulted only when nothing else matches,
/// regardless of where it appeared in registration.
pub struct RouteTable<V> {
	routes: Vec<Route<V>>,
	named: HashMap<String, usize>,
	fallback: Option<RouteKind<V>>,
}

impl<V> std::fmt::Debug for RouteTable<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteTable")
			.field("routes_count", &self.routes.len())
			.field("named_routes", &self.named.keys().collect::<Vec<_>>())
			.field("has_fallback", &self.fallback.is_some())
			.finish()
	}
}

impl<V> RouteTable<V> {
	/// Starts building a route table.
	pub fn builder() -> RouteTableBuilder<V> {
		RouteTableBuilder::new()
	}

	/// Finds the target for a normalized path.
	///
	/// Returns the first non-wildcard entry whose pattern matches, then the
	/// fallback, then `None`.
	pub fn resolve(&self, path: &str) -> Option<(&RouteKind<V>, RouteParams)> {
		for route in &self.routes {
			if let Some(params) = route.pattern.matches(path) {
				return Some((&route.kind, params));
			}
		}
		self.fallback
			.as_ref()
			.map(|kind| (kind, RouteParams::default()))
	}

	/// Returns the number of non-wildcard routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether a fallback is registered.
	pub fn has_fallback(&self) -> bool {
		self.fallback.is_some()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Generates a URL by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		let route = &self.routes[*index];

		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		route.pattern.reverse(&params_map).ok_or_else(|| {
			let missing = route
				.pattern
				.param_names()
				.into_iter()
				.find(|n| !params_map.contains_key(*n))
				.unwrap_or("unknown");
			RouterError::MissingParameter(missing.to_string())
		})
	}
}

/// Builder for [`RouteTable`].
///
/// Registration is fallible: pattern validation errors propagate from each
/// call so a bad table never reaches the router.
pub struct RouteTableBuilder<V> {
	routes: Vec<Route<V>>,
	named: HashMap<String, usize>,
	fallback: Option<RouteKind<V>>,
}

impl<V> Default for RouteTableBuilder<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> RouteTableBuilder<V> {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			named: HashMap::new(),
			fallback: None,
		}
	}

	fn push(
		mut self,
		pattern: &str,
		name: Option<&str>,
		kind: RouteKind<V>,
	) -> Result<Self, PatternError> {
		let pattern = RoutePattern::new(pattern)?;
		// A wildcard is the entry of last resort no matter where it was
		// registered; the most recent registration wins the slot.
		if pattern.is_wildcard() {
			self.fallback = Some(kind);
			return Ok(self);
		}

		if let Some(name) = name {
			self.named.insert(name.to_string(), self.routes.len());
		}
		self.routes.push(Route {
			pattern,
			name: name.map(str::to_string),
			kind,
		});
		Ok(self)
	}

	/// Registers a route whose view ignores path parameters.
	pub fn route<F>(self, pattern: &str, component: F) -> Result<Self, PatternError>
	where
		F: Fn() -> V + 'static,
	{
		self.push(pattern, None, RouteKind::View(Rc::new(move |_| component())))
	}

	/// Registers a route whose view receives the captured parameters.
	pub fn route_params<F>(self, pattern: &str, component: F) -> Result<Self, PatternError>
	where
		F: Fn(&RouteParams) -> V + 'static,
	{
		self.push(pattern, None, RouteKind::View(Rc::new(component)))
	}

	/// Registers a named route for reverse lookups.
	pub fn named_route<F>(self, name: &str, pattern: &str, component: F) -> Result<Self, PatternError>
	where
		F: Fn() -> V + 'static,
	{
		self.push(
			pattern,
			Some(name),
			RouteKind::View(Rc::new(move |_| component())),
		)
	}

	/// Registers a named route whose view receives the captured parameters.
	pub fn named_route_params<F>(
		self,
		name: &str,
		pattern: &str,
		component: F,
	) -> Result<Self, PatternError>
	where
		F: Fn(&RouteParams) -> V + 'static,
	{
		self.push(pattern, Some(name), RouteKind::View(Rc::new(component)))
	}

	/// Registers a redirect entry: matching it navigates instead of rendering.
	pub fn redirect(self, pattern: &str, to: &str, replace: bool) -> Result<Self, PatternError> {
		self.push(
			pattern,
			None,
			RouteKind::Redirect {
				to: to.to_string(),
				replace,
			},
		)
	}

	/// Sets the wildcard fallback view.
	pub fn fallback<F>(mut self, component: F) -> Self
	where
		F: Fn() -> V + 'static,
	{
		self.fallback = Some(RouteKind::View(Rc::new(move |_| component())));
		self
	}

	/// Finishes the table.
	pub fn build(self) -> RouteTable<V> {
		RouteTable {
			routes: self.routes,
			named: self.named,
			fallback: self.fallback,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn table() -> RouteTable<&'static str> {
		RouteTable::builder()
			.route("/login", || "login")
			.unwrap()
			.route("/dashboard", || "dashboard")
			.unwrap()
			.route_params("/session/:sessionId", |p| {
				if p.get("sessionId").is_some() { "session" } else { "broken" }
			})
			.unwrap()
			.fallback(|| "fallback")
			.build()
	}

	fn render(table: &RouteTable<&'static str>, path: &str) -> Option<&'static str> {
		table.resolve(path).map(|(kind, params)| match kind {
			RouteKind::View(f) => f(&params),
			RouteKind::Redirect { .. } => "redirect",
		})
	}

	#[rstest]
	#[case("/login", Some("login"))]
	#[case("/dashboard", Some("dashboard"))]
	#[case("/session/402-A", Some("session"))]
	#[case("/unknown", Some("fallback"))]
	fn test_resolution(#[case] path: &str, #[case] expected: Option<&'static str>) {
		assert_eq!(render(&table(), path), expected);
	}

	#[rstest]
	fn test_no_fallback_resolves_to_none() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.route("/login", || "login")
			.unwrap()
			.build();
		assert!(table.resolve("/unknown").is_none());
		assert!(!table.has_fallback());
	}

	#[rstest]
	fn test_first_registered_match_wins() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.route_params("/session/:sessionId", |_| "by-param")
			.unwrap()
			.route("/session/402-A", || "literal")
			.unwrap()
			.build();
		assert_eq!(render(&table, "/session/402-A"), Some("by-param"));
	}

	#[rstest]
	fn test_wildcard_route_is_last_resort_regardless_of_position() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.route("*", || "anything")
			.unwrap()
			.route("/login", || "login")
			.unwrap()
			.build();
		assert_eq!(render(&table, "/login"), Some("login"));
		assert_eq!(render(&table, "/unknown"), Some("anything"));
		assert_eq!(table.route_count(), 1);
	}

	#[rstest]
	fn test_wildcard_redirect_entry() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.route("/login", || "login")
			.unwrap()
			.redirect("*", "/login", true)
			.unwrap()
			.build();
		match table.resolve("/unknown") {
			Some((RouteKind::Redirect { to, replace }, _)) => {
				assert_eq!(to, "/login");
				assert!(*replace);
			}
			other => panic!("expected redirect, got {:?}", other.map(|(k, _)| k)),
		}
	}

	#[rstest]
	fn test_malformed_pattern_fails_registration() {
		let result = RouteTable::<&'static str>::builder().route("", || "nothing");
		assert!(matches!(result, Err(PatternError::Empty)));
	}

	#[rstest]
	fn test_reverse_named_route() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.named_route_params("comparison", "/session/:sessionId/comparison", |_| "cmp")
			.unwrap()
			.build();
		assert!(table.has_route("comparison"));
		assert_eq!(
			table.reverse("comparison", &[("sessionId", "402-A")]).unwrap(),
			"/session/402-A/comparison"
		);
	}

	#[rstest]
	fn test_reverse_errors() {
		let table: RouteTable<&'static str> = RouteTable::builder()
			.named_route_params("session", "/session/:sessionId", |_| "s")
			.unwrap()
			.build();
		assert!(matches!(
			table.reverse("nope", &[]),
			Err(RouterError::InvalidRouteName(_))
		));
		assert!(matches!(
			table.reverse("session", &[]),
			Err(RouterError::MissingParameter(name)) if name == "sessionId"
		));
	}
}
