// Модуль хранилища (IndexedDB и localStorage для WASM, память для тестов)

#[cfg(target_arch = "wasm32")]
pub mod indexeddb;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod memory;
pub mod models;

use crate::storage::models::MediaRecord;
use crate::utils::error::Result;

#[cfg(target_arch = "wasm32")]
pub use indexeddb::IndexedDbStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use memory::{MemoryKeyValueStore, MemoryMediaStore};

/// Хранилище медиа-записей с автоинкрементными ключами
///
/// Все методы берут `&self`: реализации либо держат JS-хэндл, либо
/// используют внутреннюю мутабельность, поэтому сервис можно разделять
/// между обработчиками событий через `Rc` без `RefCell` поверх await.
#[allow(async_fn_in_trait)]
pub trait MediaStore {
    /// Добавить запись, вернуть назначенный id
    async fn add(&self, record: &MediaRecord) -> Result<u32>;

    async fn get(&self, id: u32) -> Result<Option<MediaRecord>>;

    /// Все записи в порядке ключей
    async fn get_all(&self) -> Result<Vec<MediaRecord>>;

    /// Перезаписать запись с тем же id
    async fn put(&self, record: &MediaRecord) -> Result<()>;

    async fn delete(&self, id: u32) -> Result<()>;
}

/// Плоское строковое хранилище ключ-значение (как `window.localStorage`)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&self, key: &str) -> Result<()>;
}
