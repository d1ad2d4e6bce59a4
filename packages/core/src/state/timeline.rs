// Лента историй с комментариями поверх key-value хранилища

use crate::config::TimelineConfig;
use crate::storage::models::{Comment, Story};
use crate::storage::KeyValueStore;
use crate::utils::error::{MomentsError, Result};
use crate::utils::{logging, validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Истории держатся в памяти и целиком перезаписываются при каждом изменении,
/// комментарии читаются из хранилища при каждом обращении.
pub struct Timeline<K: KeyValueStore> {
    store: K,
    config: TimelineConfig,
    stories: Vec<Story>,
}

impl<K: KeyValueStore> Timeline<K> {
    pub fn new(store: K, config: TimelineConfig) -> Self {
        Self {
            store,
            config,
            stories: Vec::new(),
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    // === Истории ===

    /// Прочитать список историй из хранилища
    pub fn load(&mut self) -> Result<&[Story]> {
        self.stories = self.read_list(&self.config.stories_key)?;
        tracing::debug!(count = self.stories.len(), "stories loaded");
        Ok(&self.stories)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Добавить историю; id = время создания в миллисекундах
    pub fn add_story(&mut self, title: &str, description: &str, now_ms: i64) -> Result<Story> {
        // два сабмита в одну миллисекунду не должны делить ключ комментариев
        let mut stamp = now_ms;
        while self.story(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let story = Story {
            title: title.to_string(),
            description: description.to_string(),
            id: stamp.to_string(),
        };
        self.stories.push(story.clone());
        self.save_stories()?;
        Ok(story)
    }

    pub fn update_story(&mut self, id: &str, title: &str, description: &str) -> Result<()> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| MomentsError::NotFound(format!("story {}", id)))?;

        story.title = title.to_string();
        story.description = description.to_string();
        self.save_stories()
    }

    /// Удалить историю вместе с её комментариями
    pub fn delete_story(&mut self, id: &str) -> Result<bool> {
        let before = self.stories.len();
        self.stories.retain(|s| s.id != id);

        self.store.remove_item(&self.config.comments_key(id))?;
        self.save_stories()?;
        Ok(self.stories.len() != before)
    }

    fn save_stories(&self) -> Result<()> {
        self.write_list(&self.config.stories_key, &self.stories)
    }

    // === Комментарии ===

    pub fn comments(&self, story_id: &str) -> Result<Vec<Comment>> {
        self.read_list(&self.config.comments_key(story_id))
    }

    pub fn add_comment(&self, story_id: &str, name: &str, message: &str) -> Result<Vec<Comment>> {
        validation::comment_fields(name, message)?;

        let mut comments = self.comments(story_id)?;
        comments.push(Comment {
            name: name.to_string(),
            message: message.to_string(),
        });
        self.write_list(&self.config.comments_key(story_id), &comments)?;
        Ok(comments)
    }

    pub fn update_comment(
        &self,
        story_id: &str,
        index: usize,
        name: &str,
        message: &str,
    ) -> Result<Vec<Comment>> {
        validation::comment_fields(name, message)?;

        let mut comments = self.comments(story_id)?;
        let comment = comments.get_mut(index).ok_or_else(|| {
            MomentsError::NotFound(format!("comment {} of story {}", index, story_id))
        })?;
        comment.name = name.to_string();
        comment.message = message.to_string();

        self.write_list(&self.config.comments_key(story_id), &comments)?;
        Ok(comments)
    }

    /// Индекс за пределами списка ничего не меняет
    pub fn delete_comment(&self, story_id: &str, index: usize) -> Result<Vec<Comment>> {
        let mut comments = self.comments(story_id)?;
        if index >= comments.len() {
            tracing::debug!(story_id, index, "comment index out of range");
            return Ok(comments);
        }

        comments.remove(index);
        self.write_list(&self.config.comments_key(story_id), &comments)?;
        Ok(comments)
    }

    // === Сериализация ===

    /// Нет ключа → пустой список; битый JSON логируется и тоже считается пустым
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(list) => Ok(list.unwrap_or_default()),
            Err(e) => {
                logging::error(&format!("Ignoring malformed {}: {}", key, e));
                Ok(Vec::new())
            }
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, list: &[T]) -> Result<()> {
        let json = serde_json::to_string(list)?;
        self.store.set_item(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn timeline() -> Timeline<MemoryKeyValueStore> {
        Timeline::new(MemoryKeyValueStore::new(), TimelineConfig::default())
    }

    #[test]
    fn test_same_millisecond_ids_are_bumped() {
        let mut t = timeline();
        let a = t.add_story("a", "", 1000).unwrap();
        let b = t.add_story("b", "", 1000).unwrap();
        assert_eq!(a.id, "1000");
        assert_eq!(b.id, "1001");
    }

    #[test]
    fn test_null_and_malformed_lists_are_empty() {
        let mut t = timeline();
        t.store().set_item("stories", "null").unwrap();
        assert!(t.load().unwrap().is_empty());

        t.store().set_item("stories", "{not json").unwrap();
        assert!(t.load().unwrap().is_empty());
    }

    #[test]
    fn test_empty_title_is_stored() {
        let mut t = timeline();
        let story = t.add_story("", "only a description", 1000).unwrap();
        assert_eq!(story.title, "");

        let raw = t.store().get_item("stories").unwrap().unwrap();
        let stored: Vec<Story> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![story]);
    }

    /// Комментарии пишутся по ключу даже без загруженной истории
    #[test]
    fn test_comment_without_loaded_story() {
        let t = timeline();
        let comments = t.add_comment("123", "Jim", "hi").unwrap();
        assert_eq!(comments.len(), 1);
        assert!(t.store().get_item("comments-123").unwrap().is_some());
    }
}
