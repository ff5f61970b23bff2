//! HistoryBridge: the single point of contact with the host's history stack.
//!
//! The router only ever talks to this trait, so the core stays independent
//! of the browser. [`MemoryHistory`] backs tests and server-side use;
//! `BrowserHistory` (wasm32 only) wraps the History API.

use std::rc::Rc;

use crate::error::RouterError;

mod memory;
pub use memory::MemoryHistory;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

/// Abstraction over a navigable history stack.
///
/// Implementations guarantee that `current_path()` immediately after
/// `push(p)` or `replace(p)` returns the normalized form of `p`, and that
/// neither call notifies the bridge's own external-change listeners.
pub trait HistoryBridge {
	/// Returns the current location as a normalized path.
	fn current_path(&self) -> String;

	/// Appends a new history entry without a reload.
	fn push(&self, path: &str) -> Result<(), RouterError>;

	/// Overwrites the current history entry without adding a new one.
	fn replace(&self, path: &str) -> Result<(), RouterError>;

	/// Registers a callback for externally triggered navigation
	/// (back/forward). The callback receives the new normalized path.
	///
	/// Dropping the returned guard detaches the callback.
	fn on_external_change(&self, callback: Rc<dyn Fn(String)>) -> ListenerGuard;
}

/// Scoped handle for an external-change subscription.
///
/// Detaches the underlying listener when dropped, so a remounted router
/// never leaks callbacks from a previous mount.
pub struct ListenerGuard {
	detach: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
	/// Wraps a detach action to run once on drop.
	pub fn new(detach: impl FnOnce() + 'static) -> Self {
		Self {
			detach: Some(Box::new(detach)),
		}
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl std::fmt::Debug for ListenerGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ListenerGuard")
			.field("attached", &self.detach.is_some())
			.finish()
	}
}
