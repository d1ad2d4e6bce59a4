// Состояние галереи (то, что сейчас отрисовано на досках)

use crate::storage::models::MediaRecord;

/// Элемент галереи: картинка, редактируемый заголовок, кнопка удаления
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: u32,
    pub title: String,
    pub src: String,
}

/// Одна доска (контейнер галереи на странице)
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub items: Vec<GalleryItem>,
}

impl Board {
    pub fn new(id: String) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }
}

/// Все доски страницы в порядке конфигурации
#[derive(Debug, Clone)]
pub struct GalleryState {
    boards: Vec<Board>,
}

impl GalleryState {
    pub fn new(board_ids: Vec<String>) -> Self {
        Self {
            boards: board_ids.into_iter().map(Board::new).collect(),
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Записи без `gallery` попадают на первую доску
    fn resolve_board(&self, record: &MediaRecord) -> Option<usize> {
        match &record.gallery {
            Some(board) => self.boards.iter().position(|b| &b.id == board),
            None if self.boards.is_empty() => None,
            None => Some(0),
        }
    }

    /// Очистить все доски и заполнить заново в порядке хранилища
    pub fn replace_all(&mut self, records: Vec<MediaRecord>) {
        for board in &mut self.boards {
            board.items.clear();
        }
        for record in records {
            self.insert(record);
        }
    }

    /// Добавить запись в конец её доски
    ///
    /// Возвращает id доски, либо `None`, если доска не найдена или у записи
    /// ещё нет id.
    pub fn insert(&mut self, record: MediaRecord) -> Option<String> {
        let Some(id) = record.id else {
            tracing::debug!(title = %record.title, "skipping record without id");
            return None;
        };
        let Some(index) = self.resolve_board(&record) else {
            tracing::debug!(id, gallery = ?record.gallery, "skipping record for unknown board");
            return None;
        };

        let board = &mut self.boards[index];
        board.items.push(GalleryItem {
            id,
            title: record.title,
            src: record.src,
        });
        Some(board.id.clone())
    }

    pub fn rename(&mut self, id: u32, title: &str) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u32) -> Option<GalleryItem> {
        for board in &mut self.boards {
            if let Some(pos) = board.items.iter().position(|i| i.id == id) {
                return Some(board.items.remove(pos));
            }
        }
        None
    }

    pub fn item(&self, id: u32) -> Option<&GalleryItem> {
        self.boards
            .iter()
            .flat_map(|b| b.items.iter())
            .find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: u32) -> Option<&mut GalleryItem> {
        self.boards
            .iter_mut()
            .flat_map(|b| b.items.iter_mut())
            .find(|i| i.id == id)
    }

    pub fn items(&self, board_id: &str) -> &[GalleryItem] {
        self.boards
            .iter()
            .find(|b| b.id == board_id)
            .map(|b| b.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.boards.iter().map(|b| b.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, title: &str, gallery: Option<&str>) -> MediaRecord {
        MediaRecord {
            id: Some(id),
            title: title.to_string(),
            src: format!("data:image/png;base64,{}", id),
            gallery: gallery.map(str::to_string),
        }
    }

    fn two_boards() -> GalleryState {
        GalleryState::new(vec!["jim-message-gallery".into(), "other-message-gallery".into()])
    }

    #[test]
    fn test_records_without_board_go_to_first() {
        let mut state = GalleryState::new(vec!["gallery".into()]);
        assert_eq!(state.insert(record(1, "a", None)).as_deref(), Some("gallery"));
        assert_eq!(state.items("gallery").len(), 1);
    }

    #[test]
    fn test_replace_all_partitions_and_clears() {
        let mut state = two_boards();
        state.insert(record(99, "stale", Some("jim-message-gallery")));

        state.replace_all(vec![
            record(1, "j1", Some("jim-message-gallery")),
            record(2, "o1", Some("other-message-gallery")),
            record(3, "j2", Some("jim-message-gallery")),
            record(4, "lost", Some("removed-board")),
        ]);

        let jim: Vec<&str> = state
            .items("jim-message-gallery")
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(jim, vec!["j1", "j2"]);
        assert_eq!(state.items("other-message-gallery").len(), 1);
        assert_eq!(state.len(), 3);
        assert!(state.item(99).is_none());
    }

    #[test]
    fn test_rename_and_remove() {
        let mut state = two_boards();
        state.insert(record(1, "old", Some("other-message-gallery")));

        assert!(state.rename(1, "new"));
        assert!(!state.rename(2, "missing"));
        assert_eq!(state.item(1).unwrap().title, "new");

        let removed = state.remove(1).unwrap();
        assert_eq!(removed.title, "new");
        assert!(state.is_empty());
        assert!(state.remove(1).is_none());
    }

    #[test]
    fn test_record_without_id_is_skipped() {
        let mut state = GalleryState::new(vec!["gallery".into()]);
        let unsaved = MediaRecord::new("x".into(), "data:,".into(), None);
        assert!(state.insert(unsaved).is_none());
        assert!(state.is_empty());
    }
}
