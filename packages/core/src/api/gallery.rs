// Галерея: синхронизация досок с object store

use crate::config::GalleryConfig;
use crate::state::gallery::{GalleryItem, GalleryState};
use crate::storage::models::MediaRecord;
use crate::storage::MediaStore;
use crate::utils::error::{MomentsError, Result};
use crate::utils::{logging, validation};
use std::cell::{Ref, RefCell};

/// Что странице нужно перерисовать после загрузки
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Новый элемент добавлен в конец доски
    Appended { board: String, item: GalleryItem },
    /// Все доски перечитаны из хранилища
    Reloaded,
}

/// Сервис одной страницы галереи
///
/// Состояние лежит в `RefCell` и заимствуется только между await-точками,
/// поэтому обработчики событий могут делить сервис через `Rc`.
pub struct GalleryService<S: MediaStore> {
    store: S,
    config: GalleryConfig,
    state: RefCell<GalleryState>,
}

impl<S: MediaStore> GalleryService<S> {
    pub fn new(store: S, config: GalleryConfig) -> Self {
        let state = GalleryState::new(config.board_ids());
        Self {
            store,
            config,
            state: RefCell::new(state),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn state(&self) -> Ref<'_, GalleryState> {
        self.state.borrow()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Перечитать все записи и пересобрать доски
    pub async fn load(&self) -> Result<()> {
        let records = self
            .store
            .get_all()
            .await
            .map_err(|e| report("Error fetching records from the database", e))?;

        tracing::debug!(count = records.len(), "gallery loaded");
        self.state.borrow_mut().replace_all(records);
        Ok(())
    }

    /// Сохранить новый файл (уже в виде data URL) с заголовком
    pub async fn upload(
        &self,
        board: &str,
        title: &str,
        src: Option<String>,
    ) -> Result<UploadOutcome> {
        let src = src
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MomentsError::ValidationError("No file selected".to_string()))?;
        let title = validation::upload_title(title)?;

        if !self.config.boards.iter().any(|b| b.gallery == board) {
            return Err(MomentsError::NotFound(format!("board {}", board)));
        }

        let gallery = self
            .config
            .tag_records_with_board
            .then(|| board.to_string());
        let mut record = MediaRecord::new(title, src, gallery);

        let id = self
            .store
            .add(&record)
            .await
            .map_err(|e| report("Error storing record", e))?;
        record.id = Some(id);
        tracing::debug!(id, board, "record stored");

        if self.config.reload_after_upload {
            self.load().await?;
            return Ok(UploadOutcome::Reloaded);
        }

        let item = GalleryItem {
            id,
            title: record.title.clone(),
            src: record.src.clone(),
        };
        let board = self
            .state
            .borrow_mut()
            .insert(record)
            .ok_or_else(|| MomentsError::NotFound(format!("board for record {}", id)))?;
        Ok(UploadOutcome::Appended { board, item })
    }

    /// Сохранить отредактированный заголовок (read-modify-write)
    pub async fn rename(&self, id: u32, title: &str) -> Result<()> {
        let mut record = self
            .store
            .get(id)
            .await
            .map_err(|e| report("Error reading record", e))?
            .ok_or_else(|| MomentsError::NotFound(format!("record {}", id)))?;

        record.title = title.to_string();
        self.store
            .put(&record)
            .await
            .map_err(|e| report("Error updating record", e))?;

        self.state.borrow_mut().rename(id, title);
        Ok(())
    }

    /// Удалить запись; из состояния убирается только после успеха в хранилище
    pub async fn delete(&self, id: u32) -> Result<Option<GalleryItem>> {
        self.store
            .delete(id)
            .await
            .map_err(|e| report("Error deleting record", e))?;

        tracing::debug!(id, "record deleted");
        Ok(self.state.borrow_mut().remove(id))
    }
}

fn report(context: &str, error: MomentsError) -> MomentsError {
    logging::error(&format!("{}: {}", context, error));
    error
}
