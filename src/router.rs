//! The router: current-path state, navigation, and view resolution.
//!
//! A [`Router`] owns the single source of truth for the current path. It is
//! created against a [`RouteTable`] and a [`HistoryBridge`], tracks external
//! back/forward events for as long as it lives, and releases its history
//! subscription on drop. The UI layer observes changes through
//! [`Router::subscribe`] and decides for itself when to re-render.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RouterError;
use crate::history::{HistoryBridge, ListenerGuard};
use crate::path::normalize;
use crate::pattern::RouteParams;
use crate::route::{RouteKind, RouteTable};

/// Options for [`Router::navigate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Overwrite the current history entry instead of pushing a new one.
	pub replace: bool,
}

impl NavigateOptions {
	/// Replace-semantics navigation.
	pub fn replace() -> Self {
		Self { replace: true }
	}
}

struct RouterState {
	path: String,
}

#[derive(Default)]
struct Subscribers {
	next_id: u64,
	entries: Vec<(u64, Rc<dyn Fn()>)>,
}

fn notify(subscribers: &RefCell<Subscribers>) {
	// Snapshot before calling out: a subscriber may navigate, which would
	// otherwise re-borrow the list.
	let snapshot: Vec<Rc<dyn Fn()>> = subscribers
		.borrow()
		.entries
		.iter()
		.map(|(_, cb)| Rc::clone(cb))
		.collect();
	for callback in snapshot {
		callback();
	}
}

fn navigate_impl(
	history: &Rc<dyn HistoryBridge>,
	state: &Rc<RefCell<RouterState>>,
	subscribers: &Rc<RefCell<Subscribers>>,
	to: &str,
	options: NavigateOptions,
) -> Result<(), RouterError> {
	let next = normalize(to);
	let same = next == state.borrow().path;

	if same {
		tracing::debug!(path = %next, "same-path navigation, history untouched");
	} else {
		tracing::debug!(path = %next, replace = options.replace, "navigating");
		if options.replace {
			history.replace(&next)?;
		} else {
			history.push(&next)?;
		}
		state.borrow_mut().path = next;
	}

	// Same-path navigation still triggers a render pass.
	notify(subscribers);
	Ok(())
}

/// Subscription handle returned by [`Router::subscribe`].
///
/// Dropping it detaches the callback.
pub struct Subscription {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("attached", &self.detach.is_some())
			.finish()
	}
}

/// Imperative navigation handle bound to a router.
///
/// Views hold one of these instead of the router itself; it stays valid for
/// as long as any clone of the router's internals lives.
#[derive(Clone)]
pub struct Navigator {
	history: Rc<dyn HistoryBridge>,
	state: Rc<RefCell<RouterState>>,
	subscribers: Rc<RefCell<Subscribers>>,
}

impl Navigator {
	/// Navigates with push semantics.
	pub fn go(&self, to: &str) -> Result<(), RouterError> {
		self.go_with(to, NavigateOptions::default())
	}

	/// Navigates with explicit options.
	pub fn go_with(&self, to: &str, options: NavigateOptions) -> Result<(), RouterError> {
		navigate_impl(&self.history, &self.state, &self.subscribers, to, options)
	}
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("path", &self.state.borrow().path)
			.finish()
	}
}

/// The client-side router.
pub struct Router<V> {
	table: RouteTable<V>,
	history: Rc<dyn HistoryBridge>,
	state: Rc<RefCell<RouterState>>,
	subscribers: Rc<RefCell<Subscribers>>,
	// Held for the router's lifetime; dropping the router detaches the
	// external-change listener.
	_external: ListenerGuard,
}

impl<V> Router<V> {
	/// Creates a router over a route table and a history bridge.
	///
	/// The initial path is read from the bridge, and the router subscribes
	/// to external (back/forward) changes immediately.
	pub fn new(table: RouteTable<V>, history: Rc<dyn HistoryBridge>) -> Self {
		let state = Rc::new(RefCell::new(RouterState {
			path: history.current_path(),
		}));
		let subscribers: Rc<RefCell<Subscribers>> = Rc::new(RefCell::new(Subscribers::default()));

		let external = {
			let state = Rc::clone(&state);
			let subscribers = Rc::clone(&subscribers);
			history.on_external_change(Rc::new(move |path: String| {
				tracing::debug!(%path, "external history change");
				state.borrow_mut().path = path;
				notify(&subscribers);
			}))
		};

		Self {
			table,
			history,
			state,
			subscribers,
			_external: external,
		}
	}

	/// Returns the current normalized path.
	pub fn current_path(&self) -> String {
		self.state.borrow().path.clone()
	}

	/// Returns the parameters captured by the currently matched route.
	pub fn params(&self) -> RouteParams {
		let path = self.current_path();
		self.table
			.resolve(&path)
			.map(|(_, params)| params)
			.unwrap_or_default()
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable<V> {
		&self.table
	}

	/// Navigates to a path.
	///
	/// Same-path navigation leaves the history stack untouched but still
	/// notifies subscribers; anything else pushes (or, with
	/// [`NavigateOptions::replace`], replaces) one history entry and then
	/// updates the router state before notifying.
	pub fn navigate(&self, to: &str, options: NavigateOptions) -> Result<(), RouterError> {
		navigate_impl(&self.history, &self.state, &self.subscribers, to, options)
	}

	/// Resolves and renders the view for the current path.
	///
	/// The first matching non-wildcard entry wins; the wildcard fallback is
	/// the entry of last resort. A matched redirect performs its navigation
	/// exactly once and yields `None` — the notification it triggers drives
	/// the next render pass, which resolves the destination. No match and
	/// no fallback also yields `None`: a deliberate empty render, not an
	/// error.
	pub fn active_view(&self) -> Option<V> {
		let path = self.current_path();
		let resolved = self
			.table
			.resolve(&path)
			.map(|(kind, params)| (kind.clone(), params));

		match resolved {
			Some((RouteKind::View(factory), params)) => Some(factory(&params)),
			Some((RouteKind::Redirect { to, replace }, _)) => {
				tracing::debug!(from = %path, to = %to, replace, "redirect entry matched");
				if let Err(err) = self.navigate(&to, NavigateOptions { replace }) {
					tracing::warn!(%err, "redirect navigation failed");
				}
				None
			}
			None => {
				tracing::warn!(%path, "no route matched and no fallback registered");
				None
			}
		}
	}

	/// Registers a change observer, invoked after every path update and
	/// every same-path render request.
	pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
		let id = {
			let mut subs = self.subscribers.borrow_mut();
			let id = subs.next_id;
			subs.next_id += 1;
			subs.entries.push((id, Rc::new(callback)));
			id
		};

		let weak = Rc::downgrade(&self.subscribers);
		Subscription {
			detach: Some(Box::new(move || {
				if let Some(subs) = weak.upgrade() {
					subs.borrow_mut().entries.retain(|(sid, _)| *sid != id);
				}
			})),
		}
	}

	/// Returns an imperative navigation handle for view code.
	pub fn navigator(&self) -> Navigator {
		Navigator {
			history: Rc::clone(&self.history),
			state: Rc::clone(&self.state),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<V> std::fmt::Debug for Router<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("path", &self.state.borrow().path)
			.field("table", &self.table)
			.finish()
	}
}
