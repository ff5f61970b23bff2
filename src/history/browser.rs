//! Browser history bridge over the History API (wasm32 only).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::error::RouterError;
use crate::path::normalize;

use super::{HistoryBridge, ListenerGuard};

fn js_error(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// [`HistoryBridge`] backed by `window.history`.
///
/// `push`/`replace` go through pushState/replaceState, which the browser
/// never reflects back as `popstate`, so the no-self-notification guarantee
/// holds for free. External back/forward arrives as `popstate` events.
pub struct BrowserHistory {
	window: web_sys::Window,
}

impl BrowserHistory {
	/// Binds to the host window's history facility.
	///
	/// # Errors
	///
	/// Returns [`RouterError::HistoryUnavailable`] when there is no window
	/// or the window exposes no history object. The router cannot degrade
	/// without one; location tracking is its sole responsibility.
	pub fn new() -> Result<Self, RouterError> {
		let window = web_sys::window()
			.ok_or_else(|| RouterError::HistoryUnavailable("no window object".to_string()))?;
		window
			.history()
			.map_err(|e| RouterError::HistoryUnavailable(js_error(e)))?;
		Ok(Self { window })
	}

	fn history(&self) -> Result<web_sys::History, RouterError> {
		self.window
			.history()
			.map_err(|e| RouterError::HistoryUnavailable(js_error(e)))
	}
}

impl HistoryBridge for BrowserHistory {
	fn current_path(&self) -> String {
		let raw = self
			.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string());
		normalize(&raw)
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		let next = normalize(path);
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(&next))
			.map_err(|e| RouterError::NavigationFailed(js_error(e)))
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		let next = normalize(path);
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(&next))
			.map_err(|e| RouterError::NavigationFailed(js_error(e)))
	}

	fn on_external_change(&self, callback: Rc<dyn Fn(String)>) -> ListenerGuard {
		let window = self.window.clone();
		let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |_event: web_sys::PopStateEvent| {
				let raw = web_sys::window()
					.and_then(|w| w.location().pathname().ok())
					.unwrap_or_else(|| "/".to_string());
				callback(normalize(&raw));
			},
		);

		if let Err(e) = self
			.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			tracing::warn!(error = %js_error(e), "failed to attach popstate listener");
		}

		// The guard owns the closure; dropping it removes the listener and
		// releases the callback instead of leaking it for the page lifetime.
		ListenerGuard::new(move || {
			let _ = window.remove_event_listener_with_callback(
				"popstate",
				closure.as_ref().unchecked_ref(),
			);
		})
	}
}
