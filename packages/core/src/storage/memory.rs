// In-memory storage для тестов и non-WASM платформ

use crate::storage::models::MediaRecord;
use crate::storage::{KeyValueStore, MediaStore};
use crate::utils::error::{MomentsError, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

/// In-memory аналог object store с keyPath `id` и autoIncrement
pub struct MemoryMediaStore {
    records: RefCell<BTreeMap<u32, MediaRecord>>,
    next_id: Cell<u32>,
    failing: Cell<bool>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
            failing: Cell::new(false),
        }
    }

    /// Заставить все последующие операции завершаться ошибкой
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    fn check(&self, op: &str) -> Result<()> {
        if self.failing.get() {
            return Err(MomentsError::StorageError(format!("{} failed", op)));
        }
        Ok(())
    }
}

impl Default for MemoryMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaStore for MemoryMediaStore {
    async fn add(&self, record: &MediaRecord) -> Result<u32> {
        self.check("add")?;

        let id = match record.id {
            Some(id) => {
                if self.records.borrow().contains_key(&id) {
                    return Err(MomentsError::StorageError(format!(
                        "Key {} already exists in the object store",
                        id
                    )));
                }
                id
            }
            None => {
                let id = self.next_id.get();
                // генератор упёрся в u32::MAX и этот ключ уже занят
                if self.records.borrow().contains_key(&id) {
                    return Err(MomentsError::StorageError(
                        "Key generator is exhausted".to_string(),
                    ));
                }
                id
            }
        };
        // autoIncrement генератор никогда не уменьшается
        self.next_id.set(self.next_id.get().max(id.saturating_add(1)));

        let mut stored = record.clone();
        stored.id = Some(id);
        self.records.borrow_mut().insert(id, stored);
        Ok(id)
    }

    async fn get(&self, id: u32) -> Result<Option<MediaRecord>> {
        self.check("get")?;
        Ok(self.records.borrow().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<MediaRecord>> {
        self.check("getAll")?;
        Ok(self.records.borrow().values().cloned().collect())
    }

    async fn put(&self, record: &MediaRecord) -> Result<()> {
        self.check("put")?;
        let id = record
            .id
            .ok_or_else(|| MomentsError::StorageError("put requires a record id".to_string()))?;
        self.next_id.set(self.next_id.get().max(id.saturating_add(1)));
        self.records.borrow_mut().insert(id, record.clone());
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<()> {
        self.check("delete")?;
        self.records.borrow_mut().remove(&id);
        Ok(())
    }
}

/// In-memory аналог localStorage
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn photo(title: &str) -> MediaRecord {
        MediaRecord::new(title.to_string(), "data:image/png;base64,AA==".to_string(), None)
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let store = MemoryMediaStore::new();

        let first = block_on(store.add(&photo("a"))).unwrap();
        let second = block_on(store.add(&photo("b"))).unwrap();
        assert_eq!((first, second), (1, 2));

        // удалённый id не переиспользуется
        block_on(store.delete(second)).unwrap();
        let third = block_on(store.add(&photo("c"))).unwrap();
        assert_eq!(third, 3);
    }

    #[test]
    fn test_explicit_max_id() {
        let store = MemoryMediaStore::new();
        let mut record = photo("last");
        record.id = Some(u32::MAX);

        assert_eq!(block_on(store.add(&record)).unwrap(), u32::MAX);
        // следующий автоматический ключ взять негде
        assert!(block_on(store.add(&photo("next"))).is_err());
        assert_eq!(block_on(store.get(u32::MAX)).unwrap().unwrap().title, "last");

        block_on(store.put(&record)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_all_in_key_order() {
        let store = MemoryMediaStore::new();
        for title in ["a", "b", "c"] {
            block_on(store.add(&photo(title))).unwrap();
        }

        let titles: Vec<String> = block_on(store.get_all())
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryMediaStore::new();
        let id = block_on(store.add(&photo("old"))).unwrap();

        let mut record = block_on(store.get(id)).unwrap().unwrap();
        record.title = "new".to_string();
        block_on(store.put(&record)).unwrap();

        assert_eq!(block_on(store.get(id)).unwrap().unwrap().title, "new");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failing_store() {
        let store = MemoryMediaStore::new();
        store.set_failing(true);
        assert!(block_on(store.add(&photo("a"))).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_key_value_store() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get_item("stories").unwrap(), None);

        store.set_item("stories", "[]").unwrap();
        assert_eq!(store.get_item("stories").unwrap().as_deref(), Some("[]"));

        store.remove_item("stories").unwrap();
        assert!(store.keys().is_empty());
    }
}
