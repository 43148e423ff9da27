//! Registration state holder
//!
//! Owns the session's in-memory form data and mirrors it to the local store.
//! Built once per wizard session and passed explicitly to whatever needs it.

use crate::error::RegisterResult;
use crate::models::FormData;
use crate::storage::LocalStore;

/// Session-scoped registration state over a local store
pub struct RegistrationStore<S: LocalStore> {
    store: S,
    key: String,
    form_data: Option<FormData>,
}

impl<S: LocalStore> RegistrationStore<S> {
    /// Create an unloaded holder; call [`load`](Self::load) before use
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            form_data: None,
        }
    }

    /// Adopt the persisted form data as the in-memory snapshot
    ///
    /// Absent, unreadable or corrupt data is treated as "no prior data".
    pub fn load(&mut self) -> &FormData {
        let data = self.read_persisted();
        tracing::debug!(keys = data.len(), "loaded registration data");
        self.form_data.insert(data)
    }

    pub fn is_loaded(&self) -> bool {
        self.form_data.is_some()
    }

    /// Current in-memory snapshot, `None` until loaded
    pub fn form_data(&self) -> Option<&FormData> {
        self.form_data.as_ref()
    }

    /// Replace the in-memory snapshot without persisting it
    pub fn set_form_data(&mut self, next: FormData) {
        self.form_data = Some(next);
    }

    /// Merge `partial` into the persisted data and adopt the result
    ///
    /// The merge starts from what is in the store right now, not from the
    /// in-memory snapshot, so writes made elsewhere since load survive.
    pub fn save_form_data(&mut self, partial: &FormData) -> RegisterResult<FormData> {
        let merged = self.read_persisted().merged(partial);
        self.store.set_item(&self.key, &merged.to_json()?)?;
        tracing::info!(keys = partial.len(), total = merged.len(), "saved registration data");

        self.form_data = Some(merged.clone());
        Ok(merged)
    }

    /// Persisted snapshot as currently stored
    pub fn persisted(&self) -> FormData {
        self.read_persisted()
    }

    /// Remove the persisted data and reset the in-memory snapshot
    pub fn clear(&mut self) -> RegisterResult<()> {
        self.store.remove_item(&self.key)?;
        self.form_data = Some(FormData::new());
        tracing::info!(key = %self.key, "cleared registration data");
        Ok(())
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_persisted(&self) -> FormData {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FormData::new(),
            Err(e) => {
                tracing::warn!(error = %e, "local store unreadable, starting empty");
                return FormData::new();
            }
        };

        FormData::parse(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "ignoring corrupt registration data");
            FormData::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    const KEY: &str = "registrationFormData";

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_unloaded_has_no_data() {
        let store = RegistrationStore::new(MemoryStore::new(), KEY);
        assert!(!store.is_loaded());
        assert!(store.form_data().is_none());
    }

    #[test]
    fn test_load_empty_store() {
        let mut store = RegistrationStore::new(MemoryStore::new(), KEY);
        assert!(store.load().is_empty());
        assert!(store.is_loaded());
    }

    #[test]
    fn test_load_adopts_persisted_data() {
        let memory = MemoryStore::with_item(KEY, r#"{"contact.first_name":"Ada"}"#);
        let mut store = RegistrationStore::new(memory, KEY);

        let loaded = store.load();
        assert_eq!(loaded.get("contact.first_name"), Some("Ada"));
    }

    #[test]
    fn test_load_corrupt_data_does_not_fail() {
        let memory = MemoryStore::with_item(KEY, "definitely not json");
        let mut store = RegistrationStore::new(memory, KEY);

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_set_form_data_is_not_persisted() {
        let mut store = RegistrationStore::new(MemoryStore::new(), KEY);
        store.load();

        store.set_form_data(data(&[("x", "1")]));
        store.set_form_data(data(&[("x", "2")]));

        assert_eq!(store.form_data().unwrap().get("x"), Some("2"));
        assert!(store.persisted().is_empty());
        assert_eq!(store.store().get_item(KEY).unwrap(), None);
    }

    #[test]
    fn test_save_merges_into_persisted_state() {
        let memory = MemoryStore::with_item(KEY, r#"{"a":"0","b":"keep"}"#);
        let mut store = RegistrationStore::new(memory, KEY);
        store.load();

        let merged = store.save_form_data(&data(&[("a", "1")])).unwrap();
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("keep"));

        // reload from storage
        let mut reloaded = RegistrationStore::new(MemoryStore::with_item(KEY, &merged.to_json().unwrap()), KEY);
        assert_eq!(reloaded.load(), &merged);
        assert_eq!(store.form_data(), Some(&merged));
    }

    #[test]
    fn test_save_reads_latest_persisted_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let mut first = RegistrationStore::new(FileStore::new(path.clone()), KEY);
        first.load();

        let mut second = RegistrationStore::new(FileStore::new(path.clone()), KEY);
        second.load();
        second.save_form_data(&data(&[("other.tab", "yes")])).unwrap();

        let merged = first.save_form_data(&data(&[("contact.email", "a@b.co")])).unwrap();
        assert_eq!(merged.get("other.tab"), Some("yes"));
        assert_eq!(merged.get("contact.email"), Some("a@b.co"));
    }

    #[test]
    fn test_save_over_corrupt_data_starts_fresh() {
        let memory = MemoryStore::with_item(KEY, "{broken");
        let mut store = RegistrationStore::new(memory, KEY);
        store.load();

        let merged = store.save_form_data(&data(&[("a", "1")])).unwrap();
        assert_eq!(merged, data(&[("a", "1")]));
    }

    #[test]
    fn test_clear() {
        let memory = MemoryStore::with_item(KEY, r#"{"a":"1"}"#);
        let mut store = RegistrationStore::new(memory, KEY);
        store.load();

        store.clear().unwrap();
        assert!(store.form_data().unwrap().is_empty());
        assert!(store.persisted().is_empty());
    }
}
