// Страница ленты: истории, режим редактирования, комментарии

use crate::config::TimelineConfig;
use crate::state::controls::{self, CommentControl, StoryControl, TimelineForm};
use crate::state::timeline::Timeline;
use crate::storage::models::{Comment, Story};
use crate::storage::LocalStorage;
use crate::utils::error::{dom_error, MomentsError, Result};
use crate::utils::logging;
use crate::utils::time::current_timestamp_millis;
use crate::wasm::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

/// Элементы одной истории, которые переключаются в режиме редактирования
struct StoryView {
    id: String,
    root: Element,
    title: HtmlElement,
    description: HtmlElement,
    edit: HtmlElement,
    save: HtmlElement,
    cancel: HtmlElement,
}

impl StoryView {
    /// Собрать view по корню `.event` уже отрисованной истории
    fn from_root(root: Element) -> Result<Self> {
        let id = dom::data_attr(&root, "id")
            .ok_or_else(|| MomentsError::NotFound("data-id of story".to_string()))?;
        Ok(Self {
            id,
            title: dom::query(&root, ":scope > h3")?,
            description: dom::query(&root, ":scope > p")?,
            edit: dom::query(&root, &format!(".{}", controls::STORY_EDIT))?,
            save: dom::query(&root, &format!(".{}", controls::STORY_SAVE))?,
            cancel: dom::query(&root, &format!(".{}", controls::STORY_CANCEL))?,
            root,
        })
    }

    fn set_editing(&self, editing: bool) -> Result<()> {
        let editable = if editing { "true" } else { "false" };
        self.title.set_content_editable(editable);
        self.description.set_content_editable(editable);

        dom::set_visible(&self.edit, !editing)?;
        dom::set_visible(&self.save, editing)?;
        dom::set_visible(&self.cancel, editing)
    }

    fn show(&self, story: &Story) {
        self.title.set_text_content(Some(&story.title));
        self.description.set_text_content(Some(&story.description));
    }
}

pub struct TimelinePage {
    timeline: RefCell<Timeline<LocalStorage>>,
    document: Document,
    container: Element,
}

impl TimelinePage {
    pub fn start(config: TimelineConfig) -> Result<Rc<Self>> {
        let document = dom::document()?;
        let container: Element = dom::by_id(&document, &config.container)?;
        let story_form: HtmlFormElement = dom::by_id(&document, &config.story_form)?;

        let mut timeline = Timeline::new(LocalStorage::from_window()?, config);
        let stories = timeline.load()?.to_vec();

        let page = Rc::new(Self {
            timeline: RefCell::new(timeline),
            document,
            container,
        });

        for story in &stories {
            page.render_story(story)?;
        }

        let submit_page = Rc::clone(&page);
        dom::on(&story_form, "submit", move |event: Event| {
            event.prevent_default();
            if let Err(e) = submit_page.add_story() {
                submit_page.report(e);
            }
        })?;

        // кнопки и формы всех историй обрабатываются на контейнере ленты
        let click_page = Rc::clone(&page);
        dom::on(&page.container, "click", move |event: Event| {
            if let Err(e) = click_page.on_click(&event) {
                click_page.report(e);
            }
        })?;

        let form_page = Rc::clone(&page);
        dom::on(&page.container, "submit", move |event: Event| {
            if let Err(e) = form_page.on_submit(&event) {
                form_page.report(e);
            }
        })?;

        Ok(page)
    }

    fn on_click(&self, event: &Event) -> Result<()> {
        let Some(button) = dom::event_element(event).and_then(|t| dom::closest(&t, "button")) else {
            return Ok(());
        };
        let class_name = button.class_name();

        if let Some(control) = StoryControl::from_class(&class_name) {
            let root = dom::closest(&button, ".event")
                .ok_or_else(|| MomentsError::NotFound("story of button".to_string()))?;
            return self.story_control(control, StoryView::from_root(root)?);
        }

        let index = dom::data_attr(&button, "comment-index");
        let Some(control) = CommentControl::parse(&class_name, index.as_deref()) else {
            return Ok(());
        };
        let story_id = dom::data_attr(&button, "story-id")
            .ok_or_else(|| MomentsError::NotFound("data-story-id of comment".to_string()))?;
        match control {
            CommentControl::Edit(index) => {
                let item: HtmlElement = dom::closest(&button, ".comment-item")
                    .ok_or_else(|| MomentsError::NotFound("comment item".to_string()))?
                    .dyn_into()
                    .map_err(|e| dom_error("comment item has unexpected type", e.into()))?;
                self.edit_comment(&story_id, index, &item)
            }
            CommentControl::Delete(index) => self.delete_comment(&story_id, index),
            CommentControl::CancelEdit => self.render_comments(&story_id),
        }
    }

    fn on_submit(&self, event: &Event) -> Result<()> {
        let Some(form) = dom::event_element(event) else {
            return Ok(());
        };
        let index = dom::data_attr(&form, "comment-index");
        let Some(kind) = TimelineForm::parse(&form.class_name(), index.as_deref()) else {
            return Ok(());
        };
        event.prevent_default();

        let form: HtmlFormElement = form
            .dyn_into()
            .map_err(|e| dom_error("submitted element is not a form", e.into()))?;
        let story_id = dom::closest(&form, ".event")
            .and_then(|root| dom::data_attr(&root, "id"))
            .ok_or_else(|| MomentsError::NotFound("story of form".to_string()))?;

        match kind {
            TimelineForm::AddComment => self.add_comment(&story_id, &form),
            TimelineForm::EditComment(index) => self.update_comment(&story_id, index, &form),
        }
    }

    fn story_control(&self, control: StoryControl, view: StoryView) -> Result<()> {
        match control {
            StoryControl::Edit => view.set_editing(true),
            StoryControl::Delete => {
                self.timeline.borrow_mut().delete_story(&view.id)?;
                view.root.remove();
                Ok(())
            }
            StoryControl::Save => self.save_story(&view),
            StoryControl::Cancel => {
                // вернуть последние сохранённые значения
                if let Some(story) = self.timeline.borrow().story(&view.id) {
                    view.show(story);
                }
                view.set_editing(false)
            }
        }
    }

    fn config(&self) -> TimelineConfig {
        self.timeline.borrow().config().clone()
    }

    fn add_story(&self) -> Result<()> {
        let config = self.config();
        let title_input: HtmlInputElement = dom::by_id(&self.document, &config.title_input)?;
        let description_input: HtmlTextAreaElement =
            dom::by_id(&self.document, &config.description_input)?;

        let story = self.timeline.borrow_mut().add_story(
            &title_input.value(),
            &description_input.value(),
            current_timestamp_millis(),
        )?;
        self.render_story(&story)?;

        title_input.set_value("");
        description_input.set_value("");
        Ok(())
    }

    fn render_story(&self, story: &Story) -> Result<()> {
        let doc = &self.document;

        let root: HtmlElement = dom::create(doc, "div")?;
        root.set_class_name("event");
        dom::set_data(&root, "id", &story.id)?;

        let title = dom::create_with_text(doc, "h3", None, &story.title)?;
        let description = dom::create_with_text(doc, "p", None, &story.description)?;

        let buttons = dom::create_with_text(doc, "div", Some("button-container"), "")?;
        let edit = self.story_button(controls::STORY_EDIT, "🖋", &story.id)?;
        let delete = self.story_button(controls::STORY_DELETE, "🗑", &story.id)?;
        let save = self.story_button(controls::STORY_SAVE, "☑", &story.id)?;
        let cancel = self.story_button(controls::STORY_CANCEL, "☒", &story.id)?;
        for button in [&edit, &delete, &save, &cancel] {
            dom::append(&buttons, button)?;
        }

        let comments = dom::create_with_text(doc, "div", Some("comments"), "")?;
        let list = dom::create_with_text(doc, "div", Some("comment-list"), "")?;
        list.set_id(&format!("event-{}-comments", story.id));
        let form = self.comment_form(&story.id)?;
        dom::append(&comments, &list)?;
        dom::append(&comments, &form)?;

        for child in [&title, &description, &buttons, &comments] {
            dom::append(&root, child)?;
        }

        let view = StoryView {
            id: story.id.clone(),
            root: root.into(),
            title,
            description,
            edit,
            save,
            cancel,
        };
        view.set_editing(false)?;

        dom::append(&self.container, &view.root)?;
        self.render_comments(&story.id)
    }

    fn story_button(&self, class: &str, label: &str, story_id: &str) -> Result<HtmlElement> {
        let button = dom::create_with_text(&self.document, "button", Some(class), label)?;
        dom::set_data(&button, "id", story_id)?;
        Ok(button)
    }

    fn comment_form(&self, story_id: &str) -> Result<HtmlFormElement> {
        let doc = &self.document;
        let form: HtmlFormElement = dom::create(doc, "form")?;
        form.set_class_name(controls::COMMENT_FORM);
        form.set_id(&format!("event-{}-form", story_id));

        let name: HtmlInputElement = dom::create(doc, "input")?;
        name.set_type("text");
        name.set_placeholder("Your Name");
        name.set_class_name("comment-name");
        name.set_required(true);

        let message: HtmlTextAreaElement = dom::create(doc, "textarea")?;
        message.set_placeholder("Your Comment");
        message.set_class_name("comment-message");
        message.set_required(true);

        let submit = dom::create_with_text(doc, "button", None, "Add Comment")?;
        dom::set_attribute(&submit, "type", "submit")?;

        dom::append(&form, &name)?;
        dom::append(&form, &message)?;
        dom::append(&form, &submit)?;
        Ok(form)
    }

    fn save_story(&self, view: &StoryView) -> Result<()> {
        let title = view.title.text_content().unwrap_or_default();
        let description = view.description.text_content().unwrap_or_default();
        self.timeline
            .borrow_mut()
            .update_story(&view.id, &title, &description)?;
        view.set_editing(false)
    }

    // === Комментарии ===

    fn add_comment(&self, story_id: &str, form: &HtmlFormElement) -> Result<()> {
        let name: HtmlInputElement = dom::query(form, ".comment-name")?;
        let message: HtmlTextAreaElement = dom::query(form, ".comment-message")?;

        self.timeline
            .borrow()
            .add_comment(story_id, &name.value(), &message.value())?;
        self.render_comments(story_id)?;
        form.reset();
        Ok(())
    }

    fn update_comment(&self, story_id: &str, index: usize, form: &HtmlFormElement) -> Result<()> {
        let name: HtmlInputElement = dom::query(form, ".comment-name-edit")?;
        let message: HtmlTextAreaElement = dom::query(form, ".comment-message-edit")?;

        self.timeline
            .borrow()
            .update_comment(story_id, index, &name.value(), &message.value())?;
        self.render_comments(story_id)
    }

    fn delete_comment(&self, story_id: &str, index: usize) -> Result<()> {
        self.timeline.borrow().delete_comment(story_id, index)?;
        self.render_comments(story_id)
    }

    /// Перерисовать список комментариев истории из хранилища
    fn render_comments(&self, story_id: &str) -> Result<()> {
        let list: Element = dom::by_id(&self.document, &format!("event-{}-comments", story_id))?;
        let comments = self.timeline.borrow().comments(story_id)?;

        dom::clear_children(&list);
        for (index, comment) in comments.iter().enumerate() {
            let item = self.render_comment(story_id, index, comment)?;
            dom::append(&list, &item)?;
        }
        Ok(())
    }

    fn render_comment(&self, story_id: &str, index: usize, comment: &Comment) -> Result<HtmlElement> {
        let doc = &self.document;
        let item = dom::create_with_text(doc, "div", Some("comment-item"), "")?;

        let text = dom::create_with_text(doc, "p", None, "")?;
        let name = dom::create_with_text(doc, "strong", None, &format!("{}:", comment.name))?;
        dom::append(&text, &name)?;
        text.append_with_str_1(&format!(" {}", comment.message))
            .map_err(|e| dom_error("Failed to append text", e))?;

        let buttons = dom::create_with_text(doc, "div", Some("button-container"), "")?;
        let edit = self.comment_button(controls::COMMENT_EDIT, "🖋", story_id, index)?;
        let delete = self.comment_button(controls::COMMENT_DELETE, "🗑", story_id, index)?;
        dom::append(&buttons, &edit)?;
        dom::append(&buttons, &delete)?;

        dom::append(&item, &text)?;
        dom::append(&item, &buttons)?;
        Ok(item)
    }

    fn comment_button(
        &self,
        class: &str,
        label: &str,
        story_id: &str,
        index: usize,
    ) -> Result<HtmlElement> {
        let button = dom::create_with_text(&self.document, "button", Some(class), label)?;
        dom::set_data(&button, "storyId", story_id)?;
        dom::set_data(&button, "commentIndex", &index.to_string())?;
        Ok(button)
    }

    /// Заменить комментарий формой редактирования
    fn edit_comment(&self, story_id: &str, index: usize, item: &HtmlElement) -> Result<()> {
        let comments = self.timeline.borrow().comments(story_id)?;
        let comment = comments.get(index).ok_or_else(|| {
            MomentsError::NotFound(format!("comment {} of story {}", index, story_id))
        })?;

        let doc = &self.document;
        let form: HtmlFormElement = dom::create(doc, "form")?;
        form.set_class_name(controls::COMMENT_EDIT_FORM);
        dom::set_data(&form, "commentIndex", &index.to_string())?;

        let name: HtmlInputElement = dom::create(doc, "input")?;
        name.set_type("text");
        name.set_class_name("comment-name-edit");
        name.set_value(&comment.name);
        name.set_required(true);

        let message: HtmlTextAreaElement = dom::create(doc, "textarea")?;
        message.set_class_name("comment-message-edit");
        message.set_value(&comment.message);
        message.set_required(true);

        let buttons = dom::create_with_text(doc, "div", Some("button-container"), "")?;
        let delete = self.comment_button(controls::COMMENT_EDIT_DELETE, "🗑", story_id, index)?;
        dom::set_attribute(&delete, "type", "button")?;
        let save = self.comment_button("save-comment-edit", "☑", story_id, index)?;
        dom::set_attribute(&save, "type", "submit")?;
        let cancel = self.comment_button(controls::COMMENT_EDIT_CANCEL, "☒", story_id, index)?;
        dom::set_attribute(&cancel, "type", "button")?;
        for button in [&delete, &save, &cancel] {
            dom::append(&buttons, button)?;
        }

        dom::append(&form, &name)?;
        dom::append(&form, &message)?;
        dom::append(&form, &buttons)?;

        dom::clear_children(item);
        dom::append(item, &form)
    }

    /// Ошибки ввода показываются через alert, остальное уходит в консоль
    fn report(&self, error: MomentsError) {
        if error.is_validation() {
            dom::alert(&self.config().missing_comment_alert);
        } else {
            logging::error(&error.to_string());
        }
    }
}
