//! # opm-pages
//!
//! Client-side plumbing for the OPM behavioral-analysis console: a
//! history-backed router plus the thin session-API and local-storage
//! contracts its screens consume.
//!
//! ## Routing
//!
//! Routes are registered once at startup against validated patterns
//! (`/dashboard`, `/session/:sessionId/comparison`, `*`), then a [`Router`]
//! tracks the host's history stack and resolves the active view:
//!
//! ```
//! use std::rc::Rc;
//! use opm_pages::{MemoryHistory, NavigateOptions, RouteTable, Router};
//!
//! # fn main() -> Result<(), opm_pages::RouterError> {
//! let table: RouteTable<&'static str> = RouteTable::builder()
//! 	.route("/login", || "login")?
//! 	.route("/dashboard", || "dashboard")?
//! 	.route_params("/session/:sessionId", |_| "command center")?
//! 	.redirect("*", "/login", true)?
//! 	.build();
//!
//! let router = Router::new(table, Rc::new(MemoryHistory::with_initial("/login")));
//! router.navigate("/dashboard", NavigateOptions::default())?;
//! assert_eq!(router.active_view(), Some("dashboard"));
//! # Ok(())
//! # }
//! ```
//!
//! The router is UI-framework-agnostic: views are an opaque type produced
//! by factories, and re-rendering is driven by explicit
//! [`Router::subscribe`] observers. On wasm32 the same router runs over
//! `BrowserHistory` (pushState/replaceState + `popstate`).

pub mod error;
pub mod history;
pub mod path;
pub mod pattern;
pub mod route;
pub mod router;
pub mod session;
pub mod storage;

pub use error::{PatternError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{HistoryBridge, ListenerGuard, MemoryHistory};
pub use path::{normalize, segments};
pub use pattern::{RouteParams, RoutePattern};
pub use route::{Route, RouteKind, RouteTable, RouteTableBuilder, ViewFactory};
pub use router::{NavigateOptions, Navigator, Router, Subscription};
pub use session::{
	AnalyzeAccepted, JobStatusResponse, SessionClient, SessionError, SessionStatus,
	resolve_api_bases,
};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageBackend;
pub use storage::{ConsoleStore, KeyValueBackend, MemoryBackend};
