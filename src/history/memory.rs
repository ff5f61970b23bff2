//! In-memory history stack for tests and non-browser hosts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::RouterError;
use crate::path::normalize;

use super::{HistoryBridge, ListenerGuard};

struct Inner {
	entries: Vec<String>,
	index: usize,
	listeners: Vec<(u64, Rc<dyn Fn(String)>)>,
	next_listener_id: u64,
}


/// A navigable history backed by a plain entry stack.
///
/// `back()` and `forward()` play the role of the browser's back/forward
/// buttons: they move the cursor and fire external-change callbacks, which
/// `push`/`replace` never do.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHistory {
	/// Creates a history positioned at the root path.
	pub fn new() -> Self {
		Self::with_initial("/")
	}

	/// Creates a history positioned at the given path.
	pub fn with_initial(path: &str) -> Self {
		Self {
			inner: Rc::new(RefCell::new(Inner {
				entries: vec![normalize(path)],
				index: 0,
				listeners: Vec::new(),
				next_listener_id: 0,
			})),
		}
	}

	/// Moves one entry back, notifying external-change listeners.
	///
	/// Returns `false` when already at the oldest entry.
	pub fn back(&self) -> bool {
		{
			let mut inner = self.inner.borrow_mut();
			if inner.index == 0 {
				return false;
			}
			inner.index -= 1;
		}
		self.notify_external();
		true
	}

	/// Moves one entry forward, notifying external-change listeners.
	///
	/// Returns `false` when already at the newest entry.
	pub fn forward(&self) -> bool {
		{
			let mut inner = self.inner.borrow_mut();
			if inner.index + 1 >= inner.entries.len() {
				return false;
			}
			inner.index += 1;
		}
		self.notify_external();
		true
	}

	/// Calls every listener with the current path. The borrow is released
	/// before any callback runs, so a listener may navigate this history.
	fn notify_external(&self) {
		let (path, listeners) = {
			let inner = self.inner.borrow();
			let listeners: Vec<Rc<dyn Fn(String)>> =
				inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
			(inner.entries[inner.index].clone(), listeners)
		};
		for listener in listeners {
			listener(path.clone());
		}
	}

	/// Returns the number of entries on the stack.
	pub fn len(&self) -> usize {
		self.inner.borrow().entries.len()
	}

	/// Returns `true` when the stack holds no entries.
	///
	/// Always `false` in practice: the stack is created with one entry.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().entries.is_empty()
	}

	/// Returns the cursor position within the stack.
	pub fn current_index(&self) -> usize {
		self.inner.borrow().index
	}
}

impl HistoryBridge for MemoryHistory {
	fn current_path(&self) -> String {
		let inner = self.inner.borrow();
		inner.entries[inner.index].clone()
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		let mut inner = self.inner.borrow_mut();
		let index = inner.index;
		// Pushing discards any forward entries, as the browser does.
		inner.entries.truncate(index + 1);
		inner.entries.push(normalize(path));
		inner.index += 1;
		Ok(())
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		let mut inner = self.inner.borrow_mut();
		let index = inner.index;
		inner.entries[index] = normalize(path);
		Ok(())
	}

	fn on_external_change(&self, callback: Rc<dyn Fn(String)>) -> ListenerGuard {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_listener_id;
			inner.next_listener_id += 1;
			inner.listeners.push((id, callback));
			id
		};

		let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
		ListenerGuard::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
			}
		})
	}
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &inner.entries)
			.field("index", &inner.index)
			.field("listeners", &inner.listeners.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	#[rstest]
	fn test_push_and_current_path() {
		let history = MemoryHistory::new();
		history.push("/dashboard/").unwrap();
		assert_eq!(history.current_path(), "/dashboard");
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_replace_keeps_stack_depth() {
		let history = MemoryHistory::with_initial("/login");
		history.replace("/register").unwrap();
		assert_eq!(history.current_path(), "/register");
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_push_truncates_forward_entries() {
		let history = MemoryHistory::new();
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.back();
		history.push("/c").unwrap();
		assert_eq!(history.len(), 3);
		assert_eq!(history.current_path(), "/c");
		assert!(!history.forward());
	}

	#[rstest]
	fn test_back_forward_notify_listeners() {
		let history = MemoryHistory::new();
		history.push("/dashboard").unwrap();

		let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
		let seen_cb = Rc::clone(&seen);
		let _guard = history.on_external_change(Rc::new(move |path| {
			seen_cb.borrow_mut().push(path);
		}));

		assert!(history.back());
		assert!(history.forward());
		assert_eq!(*seen.borrow(), vec!["/", "/dashboard"]);
	}

	#[rstest]
	fn test_push_does_not_notify_listeners() {
		let history = MemoryHistory::new();
		let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
		let seen_cb = Rc::clone(&seen);
		let _guard = history.on_external_change(Rc::new(move |path| {
			seen_cb.borrow_mut().push(path);
		}));

		history.push("/dashboard").unwrap();
		history.replace("/upload").unwrap();
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	fn test_dropped_guard_detaches_listener() {
		let history = MemoryHistory::new();
		history.push("/dashboard").unwrap();

		let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
		let seen_cb = Rc::clone(&seen);
		let guard = history.on_external_change(Rc::new(move |path| {
			seen_cb.borrow_mut().push(path);
		}));
		drop(guard);

		assert!(history.back());
		assert!(seen.borrow().is_empty());
	}

	#[rstest]
	fn test_back_at_oldest_entry() {
		let history = MemoryHistory::new();
		assert!(!history.back());
		assert_eq!(history.current_path(), "/");
	}
}
