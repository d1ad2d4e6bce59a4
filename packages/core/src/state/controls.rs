// Кнопки страниц: класс кнопки + data-атрибуты → действие
//
// Обработчики висят на контейнерах (доска, лента), а не на каждом элементе,
// поэтому перерисовка не создаёт новых замыканий.

pub const GALLERY_DELETE: &str = "delete-button";

pub const STORY_EDIT: &str = "edit-moment";
pub const STORY_DELETE: &str = "delete-moment";
pub const STORY_SAVE: &str = "save-moment";
pub const STORY_CANCEL: &str = "cancel-moment";

pub const COMMENT_EDIT: &str = "edit-comment";
pub const COMMENT_DELETE: &str = "delete-comment";
pub const COMMENT_EDIT_DELETE: &str = "delete-comment-edit";
pub const COMMENT_EDIT_CANCEL: &str = "cancel-comment-edit";

pub const COMMENT_FORM: &str = "comment-form";
pub const COMMENT_EDIT_FORM: &str = "edit-comment-form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryControl {
    Edit,
    Delete,
    Save,
    Cancel,
}

impl StoryControl {
    pub fn from_class(class_name: &str) -> Option<Self> {
        class_name.split_whitespace().find_map(|class| match class {
            STORY_EDIT => Some(Self::Edit),
            STORY_DELETE => Some(Self::Delete),
            STORY_SAVE => Some(Self::Save),
            STORY_CANCEL => Some(Self::Cancel),
            _ => None,
        })
    }
}

/// Действие над комментарием; индекс берётся из `data-comment-index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentControl {
    Edit(usize),
    Delete(usize),
    CancelEdit,
}

impl CommentControl {
    pub fn parse(class_name: &str, index: Option<&str>) -> Option<Self> {
        let index = index.and_then(|raw| raw.trim().parse::<usize>().ok());
        class_name.split_whitespace().find_map(|class| match class {
            COMMENT_EDIT => index.map(Self::Edit),
            COMMENT_DELETE | COMMENT_EDIT_DELETE => index.map(Self::Delete),
            COMMENT_EDIT_CANCEL => Some(Self::CancelEdit),
            _ => None,
        })
    }
}

/// Какая из форм внутри ленты отправлена
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineForm {
    AddComment,
    EditComment(usize),
}

impl TimelineForm {
    pub fn parse(class_name: &str, index: Option<&str>) -> Option<Self> {
        class_name.split_whitespace().find_map(|class| match class {
            COMMENT_FORM => Some(Self::AddComment),
            COMMENT_EDIT_FORM => index
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .map(Self::EditComment),
            _ => None,
        })
    }
}

/// `data-id` элемента галереи
pub fn item_id(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|raw| raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_buttons() {
        assert_eq!(StoryControl::from_class("edit-moment"), Some(StoryControl::Edit));
        assert_eq!(StoryControl::from_class("save-moment"), Some(StoryControl::Save));
        assert_eq!(StoryControl::from_class("x cancel-moment"), Some(StoryControl::Cancel));
        assert_eq!(StoryControl::from_class("delete-comment"), None);
    }

    #[test]
    fn test_comment_buttons_need_index() {
        assert_eq!(
            CommentControl::parse("edit-comment", Some("2")),
            Some(CommentControl::Edit(2))
        );
        assert_eq!(
            CommentControl::parse("delete-comment-edit", Some("0")),
            Some(CommentControl::Delete(0))
        );
        assert_eq!(CommentControl::parse("delete-comment", None), None);
        assert_eq!(CommentControl::parse("edit-comment", Some("-1")), None);

        // отмена не зависит от индекса
        assert_eq!(
            CommentControl::parse("cancel-comment-edit", None),
            Some(CommentControl::CancelEdit)
        );
    }

    #[test]
    fn test_forms() {
        assert_eq!(TimelineForm::parse("comment-form", None), Some(TimelineForm::AddComment));
        assert_eq!(
            TimelineForm::parse("edit-comment-form", Some("4")),
            Some(TimelineForm::EditComment(4))
        );
        assert_eq!(TimelineForm::parse("edit-comment-form", Some("x")), None);
        assert_eq!(TimelineForm::parse("story-form", None), None);
    }

    #[test]
    fn test_item_id() {
        assert_eq!(item_id(Some("17")), Some(17));
        assert_eq!(item_id(Some("")), None);
        assert_eq!(item_id(None), None);
    }
}
