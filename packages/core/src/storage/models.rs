// Модели данных для хранилища

use serde::{Deserialize, Serialize};

/// Фото или фото-сообщение в IndexedDB
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Назначается хранилищем (autoIncrement); нет до первой вставки
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub title: String,
    pub src: String, // data URL изображения
    /// id доски; только на странице сообщений
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<String>,
}

impl MediaRecord {
    pub fn new(title: String, src: String, gallery: Option<String>) -> Self {
        Self {
            id: None,
            title,
            src,
            gallery,
        }
    }
}

/// История в ленте (localStorage, ключ `stories`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub description: String,
    pub id: String, // Date.now() в виде строки
}

/// Комментарий к истории (localStorage, ключ `comments-<id>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_record_without_id_omits_key() {
        let record = MediaRecord::new("Sunset".into(), "data:image/png;base64,AA==".into(), None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("gallery").is_none());
        assert_eq!(json["title"], "Sunset");
    }

    #[test]
    fn test_media_record_reads_stored_shape() {
        let json = r#"{"title":"Hi","src":"data:,","gallery":"jim-message-gallery","id":7}"#;
        let record: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(7));
        assert_eq!(record.gallery.as_deref(), Some("jim-message-gallery"));
    }

    #[test]
    fn test_story_json_keys() {
        let json = r#"[{"title":"First date","description":"Coffee","id":"1700000000000"}]"#;
        let stories: Vec<Story> = serde_json::from_str(json).unwrap();
        assert_eq!(stories[0].id, "1700000000000");
        assert_eq!(stories[0].description, "Coffee");
    }
}
