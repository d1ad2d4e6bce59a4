//! Централизованная конфигурация для Moments Core
//!
//! Идентификаторы DOM-элементов, имена баз данных и ключей хранилища
//! определены здесь, чтобы не хардкодить их по всему проекту.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Глобальная конфигурация приложения (синглтон)
static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Одна форма загрузки и доска, куда попадают её записи
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// id формы `<form>`
    pub form: String,
    /// id `<input type="file">`
    pub file_input: String,
    /// id поля заголовка
    pub title_input: String,
    /// id контейнера галереи
    pub gallery: String,
}

impl BoardConfig {
    pub fn new(form: &str, file_input: &str, title_input: &str, gallery: &str) -> Self {
        Self {
            form: form.to_string(),
            file_input: file_input.to_string(),
            title_input: title_input.to_string(),
            gallery: gallery.to_string(),
        }
    }
}

/// Страница галереи (фото или сообщения)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    // ============================================
    // INDEXEDDB
    // ============================================

    /// Имя базы IndexedDB
    pub db_name: String,

    /// Версия схемы базы
    pub db_version: u32,

    /// Имя object store (keyPath `id`, autoIncrement)
    pub store_name: String,

    // ============================================
    // DOM
    // ============================================

    /// Формы загрузки; первая доска используется для записей без `gallery`
    pub boards: Vec<BoardConfig>,

    /// CSS-класс элемента галереи
    pub item_class: String,

    // ============================================
    // ПОВЕДЕНИЕ
    // ============================================

    /// Сохранять id доски в записи (страница с несколькими досками)
    pub tag_records_with_board: bool,

    /// После загрузки перечитать все записи вместо добавления одной
    pub reload_after_upload: bool,

    /// Текст alert при пустом файле или заголовке
    pub missing_input_alert: String,
}

impl GalleryConfig {
    /// Фотогалерея: одна доска, новые фото добавляются в конец
    pub fn photos() -> Self {
        Self {
            db_name: "photoGalleryDB".to_string(),
            db_version: 1,
            store_name: "photos".to_string(),
            boards: vec![BoardConfig::new(
                "upload-form",
                "photo-upload",
                "photo-title",
                "gallery",
            )],
            item_class: "gallery-item".to_string(),
            tag_records_with_board: false,
            reload_after_upload: false,
            missing_input_alert: "사진을 업로드하고 제목을 입력해 주세요.".to_string(),
        }
    }

    /// Галерея сообщений: две доски, после загрузки всё перерисовывается
    pub fn messages() -> Self {
        Self {
            db_name: "messageGalleryDB".to_string(),
            db_version: 2,
            store_name: "messages".to_string(),
            boards: vec![
                BoardConfig::new(
                    "message-upload-form-j",
                    "message-photo-upload-j",
                    "message-photo-title-j",
                    "jim-message-gallery",
                ),
                BoardConfig::new(
                    "message-upload-form-l",
                    "message-photo-upload-l",
                    "message-photo-title-l",
                    "other-message-gallery",
                ),
            ],
            item_class: "message-gallery-item".to_string(),
            tag_records_with_board: true,
            reload_after_upload: true,
            missing_input_alert: "Please upload a photo and enter a title.".to_string(),
        }
    }

    /// id всех досок в порядке объявления
    pub fn board_ids(&self) -> Vec<String> {
        self.boards.iter().map(|b| b.gallery.clone()).collect()
    }
}

/// Лента историй (localStorage)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Ключ со списком историй
    pub stories_key: String,

    /// Префикс ключа комментариев, полный ключ `<prefix><story id>`
    pub comments_key_prefix: String,

    pub story_form: String,
    pub title_input: String,
    pub description_input: String,
    pub container: String,

    /// Текст alert при пустом имени или комментарии
    pub missing_comment_alert: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            stories_key: "stories".to_string(),
            comments_key_prefix: "comments-".to_string(),
            story_form: "story-form".to_string(),
            title_input: "event-title".to_string(),
            description_input: "event-description".to_string(),
            container: "timeline".to_string(),
            missing_comment_alert: "Name and Comment are required!".to_string(),
        }
    }
}

impl TimelineConfig {
    /// Ключ localStorage для комментариев истории
    pub fn comments_key(&self, story_id: &str) -> String {
        format!("{}{}", self.comments_key_prefix, story_id)
    }
}

/// Основная структура конфигурации
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub photo_gallery: GalleryConfig,
    pub message_gallery: GalleryConfig,
    pub timeline: TimelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_gallery: GalleryConfig::photos(),
            message_gallery: GalleryConfig::messages(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl Config {
    /// Разобрать конфигурацию из JSON (переданного со страницы)
    pub fn from_json(json: &str) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Получить глобальный экземпляр конфигурации
    ///
    /// Автоматически инициализирует конфигурацию со значениями по умолчанию при первом вызове
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Config::default)
    }

    /// Инициализировать глобальную конфигурацию со значениями по умолчанию
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init() -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(Self::default())
            .map_err(|_| "Config already initialized")
    }

    /// Инициализировать глобальную конфигурацию с кастомным экземпляром
    ///
    /// # Errors
    ///
    /// Возвращает ошибку, если конфигурация уже была инициализирована
    pub fn init_with(config: Config) -> Result<(), &'static str> {
        GLOBAL_CONFIG
            .set(config)
            .map_err(|_| "Config already initialized")
    }

    /// Проверить, инициализирована ли глобальная конфигурация
    pub fn is_initialized() -> bool {
        GLOBAL_CONFIG.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.photo_gallery.db_name, "photoGalleryDB");
        assert_eq!(config.photo_gallery.db_version, 1);
        assert_eq!(config.message_gallery.db_name, "messageGalleryDB");
        assert_eq!(config.message_gallery.db_version, 2);
        assert_eq!(config.timeline.stories_key, "stories");
    }

    #[test]
    fn test_gallery_presets() {
        let photos = GalleryConfig::photos();
        assert_eq!(photos.board_ids(), vec!["gallery".to_string()]);
        assert!(!photos.reload_after_upload);
        assert!(!photos.tag_records_with_board);

        let messages = GalleryConfig::messages();
        assert_eq!(
            messages.board_ids(),
            vec![
                "jim-message-gallery".to_string(),
                "other-message-gallery".to_string()
            ]
        );
        assert!(messages.reload_after_upload);
        assert_eq!(messages.item_class, "message-gallery-item");
    }

    #[test]
    fn test_comments_key() {
        let timeline = TimelineConfig::default();
        assert_eq!(timeline.comments_key("1700000000000"), "comments-1700000000000");
    }

    #[test]
    fn test_from_json_roundtrip_override() {
        let mut config = Config::default();
        config.timeline.stories_key = "our-stories".to_string();
        let json = serde_json::to_string(&config).unwrap();

        let parsed = Config::from_json(&json).unwrap();
        assert_eq!(parsed.timeline.stories_key, "our-stories");
        assert!(Config::from_json("{").is_err());
    }
}
