// IndexedDB хранилище медиа-записей (только WASM)

use crate::storage::models::MediaRecord;
use crate::storage::MediaStore;
use crate::utils::error::{js_error, MomentsError, Result};
use crate::utils::logging;
use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Event, IdbDatabase, IdbObjectStore, IdbObjectStoreParameters, IdbOpenDbRequest, IdbRequest,
    IdbTransactionMode, IdbVersionChangeEvent,
};

/// Object store с keyPath `id` и autoIncrement внутри одной базы
#[derive(Clone)]
pub struct IndexedDbStore {
    db: IdbDatabase,
    store_name: String,
}

impl IndexedDbStore {
    /// Открыть базу, при апгрейде создать object store если его ещё нет
    pub async fn open(db_name: &str, version: u32, store_name: &str) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| MomentsError::StorageError("not running in a browser".to_string()))?;
        let factory = window
            .indexed_db()
            .map_err(|e| js_error("indexedDB is unavailable", e))?
            .ok_or_else(|| MomentsError::StorageError("indexedDB is not supported".to_string()))?;

        let open_request = factory
            .open_with_u32(db_name, version)
            .map_err(|e| js_error("Failed to open database", e))?;

        let upgrade_store = store_name.to_string();
        let on_upgrade = Closure::wrap(Box::new(move |event: IdbVersionChangeEvent| {
            if let Err(e) = create_store_if_missing(&event, &upgrade_store) {
                logging::error(&format!("Database upgrade failed: {}", e));
            }
        }) as Box<dyn FnMut(IdbVersionChangeEvent)>);
        open_request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));

        let opened = request_future(&open_request).await;
        // onupgradeneeded срабатывает до onsuccess, замыкание больше не нужно
        open_request.set_onupgradeneeded(None);
        drop(on_upgrade);

        let db: IdbDatabase = opened
            .map_err(|e| js_error("Database error", e))?
            .dyn_into()
            .map_err(|e| js_error("open() did not yield a database", e))?;

        tracing::debug!(db_name, version, store_name, "indexeddb opened");
        Ok(Self {
            db,
            store_name: store_name.to_string(),
        })
    }

    fn object_store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore> {
        let transaction = self
            .db
            .transaction_with_str_and_mode(&self.store_name, mode)
            .map_err(|e| js_error("Failed to start transaction", e))?;
        transaction
            .object_store(&self.store_name)
            .map_err(|e| js_error("Failed to open object store", e))
    }

    fn to_js(record: &MediaRecord) -> Result<JsValue> {
        // json_compatible: обычные JS-объекты вместо Map, иначе keyPath не работает
        Ok(record.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
    }
}

impl MediaStore for IndexedDbStore {
    async fn add(&self, record: &MediaRecord) -> Result<u32> {
        let value = Self::to_js(record)?;
        let request = self
            .object_store(IdbTransactionMode::Readwrite)?
            .add(&value)
            .map_err(|e| js_error("Error storing record", e))?;
        let key = request_future(&request)
            .await
            .map_err(|e| js_error("Error storing record", e))?;

        key.as_f64()
            .map(|k| k as u32)
            .ok_or_else(|| MomentsError::StorageError(format!("unexpected key {:?}", key)))
    }

    async fn get(&self, id: u32) -> Result<Option<MediaRecord>> {
        let request = self
            .object_store(IdbTransactionMode::Readonly)?
            .get(&JsValue::from(id))
            .map_err(|e| js_error("Error reading record", e))?;
        let value = request_future(&request)
            .await
            .map_err(|e| js_error("Error reading record", e))?;

        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_wasm_bindgen::from_value(value)?))
    }

    async fn get_all(&self) -> Result<Vec<MediaRecord>> {
        let request = self
            .object_store(IdbTransactionMode::Readonly)?
            .get_all()
            .map_err(|e| js_error("Error fetching records from the database", e))?;
        let value = request_future(&request)
            .await
            .map_err(|e| js_error("Error fetching records from the database", e))?;

        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    async fn put(&self, record: &MediaRecord) -> Result<()> {
        let value = Self::to_js(record)?;
        let request = self
            .object_store(IdbTransactionMode::Readwrite)?
            .put(&value)
            .map_err(|e| js_error("Error updating record", e))?;
        request_future(&request)
            .await
            .map_err(|e| js_error("Error updating record", e))?;
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<()> {
        let request = self
            .object_store(IdbTransactionMode::Readwrite)?
            .delete(&JsValue::from(id))
            .map_err(|e| js_error("Error deleting record", e))?;
        request_future(&request)
            .await
            .map_err(|e| js_error("Error deleting record", e))?;
        Ok(())
    }
}

fn create_store_if_missing(event: &IdbVersionChangeEvent, store_name: &str) -> Result<()> {
    let request: IdbOpenDbRequest = event
        .target()
        .ok_or_else(|| MomentsError::StorageError("upgrade event has no target".to_string()))?
        .dyn_into()
        .map_err(|e| js_error("upgrade target is not an open request", e.into()))?;
    let db: IdbDatabase = request
        .result()
        .map_err(|e| js_error("upgrade request has no result", e))?
        .dyn_into()
        .map_err(|e| js_error("upgrade result is not a database", e))?;

    if db.object_store_names().contains(store_name) {
        return Ok(());
    }

    let params = IdbObjectStoreParameters::new();
    params.set_key_path(&JsValue::from_str("id"));
    params.set_auto_increment(true);
    db.create_object_store_with_optional_parameters(store_name, &params)
        .map_err(|e| js_error("Failed to create object store", e))?;
    Ok(())
}

/// Превратить IdbRequest (onsuccess/onerror) в Future через Promise
/// Один обработчик на оба события: срабатывает ровно одно из них
fn request_future(request: &IdbRequest) -> JsFuture {
    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let settled = request.clone();
        let on_settled = Closure::once_into_js(move |event: Event| {
            settled.set_onsuccess(None);
            settled.set_onerror(None);

            if event.type_() == "success" {
                let value = settled.result().unwrap_or(JsValue::UNDEFINED);
                let _ = resolve.call1(&JsValue::NULL, &value);
                return;
            }
            let error = match settled.error() {
                Ok(Some(exception)) => JsValue::from(exception),
                _ => JsValue::from_str("unknown IndexedDB error"),
            };
            let _ = reject.call1(&JsValue::NULL, &error);
        });

        request.set_onsuccess(Some(on_settled.unchecked_ref()));
        request.set_onerror(Some(on_settled.unchecked_ref()));
    });
    JsFuture::from(promise)
}
