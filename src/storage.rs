//! Local persistence for the console: remembered identifiers and
//! per-session display-name overrides.
//!
//! Everything here degrades silently: missing or corrupt stored JSON reads
//! back as empty, never as an error. The router has no knowledge of this
//! module; only screens touch it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key for the per-session person-name map.
pub const PERSON_NAMES_KEY: &str = "opm_person_names_by_session";
/// Storage key for the last submitted job identifier.
pub const JOB_ID_KEY: &str = "opm_job_id";
/// Storage key for the last known session identifier.
pub const SESSION_ID_KEY: &str = "opm_session_id";
/// Storage key for the last uploaded file name.
pub const LAST_UPLOAD_KEY: &str = "opm_last_upload";

/// A string key-value store.
pub trait KeyValueBackend {
	/// Reads a value.
	fn get(&self, key: &str) -> Option<String>;
	/// Writes a value.
	fn set(&self, key: &str, value: &str);
	/// Removes a value.
	fn remove(&self, key: &str);
}

/// In-memory backend for native targets and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
	inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
	/// Creates an empty backend.
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueBackend for MemoryBackend {
	fn get(&self, key: &str) -> Option<String> {
		self.inner.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.inner
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
	}

	fn remove(&self, key: &str) {
		self.inner.borrow_mut().remove(key);
	}
}

/// `window.localStorage` backend (wasm32 only).
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageBackend {
	storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageBackend {
	/// Binds to the window's local storage, if the host provides one.
	pub fn new() -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok()??;
		Some(Self { storage })
	}
}

#[cfg(target_arch = "wasm32")]
impl KeyValueBackend for LocalStorageBackend {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		// Quota or privacy-mode failures are non-fatal for the console.
		if self.storage.set_item(key, value).is_err() {
			tracing::warn!(%key, "local storage write failed");
		}
	}

	fn remove(&self, key: &str) {
		let _ = self.storage.remove_item(key);
	}
}

type NamesBySession = HashMap<String, HashMap<String, String>>;

/// Console-local persistence: remembered job/session identifiers and the
/// analyst's display-name overrides, keyed per session.
pub struct ConsoleStore<B: KeyValueBackend> {
	backend: B,
}

impl<B: KeyValueBackend> ConsoleStore<B> {
	/// Wraps a key-value backend.
	pub fn new(backend: B) -> Self {
		Self { backend }
	}

	/// Returns the remembered session identifier.
	pub fn session_id(&self) -> Option<String> {
		self.backend.get(SESSION_ID_KEY)
	}

	/// Remembers or forgets the session identifier.
	pub fn set_session_id(&self, session_id: Option<&str>) {
		match session_id {
			Some(id) => self.backend.set(SESSION_ID_KEY, id),
			None => self.backend.remove(SESSION_ID_KEY),
		}
	}

	/// Returns the remembered job identifier.
	pub fn job_id(&self) -> Option<String> {
		self.backend.get(JOB_ID_KEY)
	}

	/// Remembers or forgets the job identifier.
	pub fn set_job_id(&self, job_id: Option<&str>) {
		match job_id {
			Some(id) => self.backend.set(JOB_ID_KEY, id),
			None => self.backend.remove(JOB_ID_KEY),
		}
	}

	/// Returns the last uploaded file name.
	pub fn last_upload_name(&self) -> Option<String> {
		self.backend.get(LAST_UPLOAD_KEY)
	}

	/// Remembers the last uploaded file name.
	pub fn set_last_upload_name(&self, name: &str) {
		self.backend.set(LAST_UPLOAD_KEY, name);
	}

	/// Returns the display-name overrides for one session.
	pub fn person_names_for_session(&self, session_id: &str) -> HashMap<String, String> {
		self.read_all_names()
			.remove(session_id)
			.unwrap_or_default()
	}

	/// Saves the display-name overrides for one session.
	pub fn save_person_names_for_session(
		&self,
		session_id: &str,
		names: &HashMap<String, String>,
	) {
		let mut all = self.read_all_names();
		all.insert(session_id.to_string(), names.clone());
		match serde_json::to_string(&all) {
			Ok(encoded) => self.backend.set(PERSON_NAMES_KEY, &encoded),
			Err(err) => tracing::warn!(%err, "failed to encode person-name store"),
		}
	}

	fn read_all_names(&self) -> NamesBySession {
		let Some(raw) = self.backend.get(PERSON_NAMES_KEY) else {
			return NamesBySession::default();
		};
		// Corrupt stored JSON reads back as empty.
		serde_json::from_str(&raw).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn store() -> ConsoleStore<MemoryBackend> {
		ConsoleStore::new(MemoryBackend::new())
	}

	#[rstest]
	fn test_session_id_round_trip() {
		let store = store();
		assert_eq!(store.session_id(), None);

		store.set_session_id(Some("402-A"));
		assert_eq!(store.session_id().as_deref(), Some("402-A"));

		store.set_session_id(None);
		assert_eq!(store.session_id(), None);
	}

	#[rstest]
	fn test_person_names_round_trip() {
		let store = store();
		let mut names = HashMap::new();
		names.insert("person-1".to_string(), "Subject A".to_string());
		store.save_person_names_for_session("402-A", &names);

		assert_eq!(store.person_names_for_session("402-A"), names);
		assert!(store.person_names_for_session("other").is_empty());
	}

	#[rstest]
	fn test_names_for_different_sessions_do_not_collide() {
		let store = store();
		let mut a = HashMap::new();
		a.insert("p1".to_string(), "Alice".to_string());
		let mut b = HashMap::new();
		b.insert("p1".to_string(), "Bob".to_string());

		store.save_person_names_for_session("sess-a", &a);
		store.save_person_names_for_session("sess-b", &b);

		assert_eq!(store.person_names_for_session("sess-a"), a);
		assert_eq!(store.person_names_for_session("sess-b"), b);
	}

	#[rstest]
	fn test_corrupt_store_reads_as_empty() {
		let backend = MemoryBackend::new();
		backend.set(PERSON_NAMES_KEY, "not json at all");
		let store = ConsoleStore::new(backend);

		assert!(store.person_names_for_session("402-A").is_empty());

		// And a save repairs the key.
		let mut names = HashMap::new();
		names.insert("p1".to_string(), "Subject A".to_string());
		store.save_person_names_for_session("402-A", &names);
		assert_eq!(store.person_names_for_session("402-A"), names);
	}

	#[rstest]
	fn test_job_and_upload_keys() {
		let store = store();
		store.set_job_id(Some("job-17"));
		store.set_last_upload_name("interview.mp4");

		assert_eq!(store.job_id().as_deref(), Some("job-17"));
		assert_eq!(store.last_upload_name().as_deref(), Some("interview.mp4"));

		store.set_job_id(None);
		assert_eq!(store.job_id(), None);
	}
}
