// Страница галереи: формы загрузки, доски, inline-редактирование заголовков

use crate::api::gallery::{GalleryService, UploadOutcome};
use crate::config::{BoardConfig, GalleryConfig};
use crate::state::controls;
use crate::state::gallery::GalleryItem;
use crate::storage::IndexedDbStore;
use crate::utils::error::{MomentsError, Result};
use crate::utils::logging;
use crate::wasm::{dom, file};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, HtmlInputElement};

pub struct GalleryPage {
    service: GalleryService<IndexedDbStore>,
    document: Document,
}

impl GalleryPage {
    /// Открыть базу, повесить обработчики форм и отрисовать сохранённые записи
    pub async fn start(config: GalleryConfig) -> Result<Rc<Self>> {
        let document = dom::document()?;
        let store = IndexedDbStore::open(&config.db_name, config.db_version, &config.store_name)
            .await
            .map_err(|e| {
                logging::error(&format!("Database error: {}", e));
                e
            })?;

        let page = Rc::new(Self {
            service: GalleryService::new(store, config),
            document,
        });

        for board in page.service.config().boards.clone() {
            page.bind_board(&board.gallery)?;
            page.bind_form(board)?;
        }
        page.reload().await?;
        Ok(page)
    }

    fn bind_form(self: &Rc<Self>, board: BoardConfig) -> Result<()> {
        let form: Element = dom::by_id(&self.document, &board.form)?;
        let page = Rc::clone(self);
        dom::on(&form, "submit", move |event: Event| {
            event.prevent_default();
            let page = Rc::clone(&page);
            let board = board.clone();
            spawn_local(async move {
                if let Err(e) = page.upload(&board).await {
                    page.report(e);
                }
            });
        })
    }

    /// Удаление и правка заголовков ловятся на контейнере доски один раз
    fn bind_board(self: &Rc<Self>, board_id: &str) -> Result<()> {
        let Some(container) = self.document.get_element_by_id(board_id) else {
            return Ok(());
        };

        let page = Rc::clone(self);
        let delete_selector = format!(".{}", controls::GALLERY_DELETE);
        dom::on(&container, "click", move |event: Event| {
            let button = dom::event_element(&event).and_then(|t| dom::closest(&t, &delete_selector));
            let Some((id, element)) = button.and_then(|b| page.item_of(&b)) else {
                return;
            };
            let page = Rc::clone(&page);
            spawn_local(async move {
                match page.service.delete(id).await {
                    Ok(_) => element.remove(),
                    Err(e) => page.report(e),
                }
            });
        })?;

        let page = Rc::clone(self);
        dom::on(&container, "input", move |event: Event| {
            let Some(title) = dom::event_element(&event).and_then(|t| dom::closest(&t, "h3")) else {
                return;
            };
            let Some((id, _)) = page.item_of(&title) else {
                return;
            };
            let text = title.text_content().unwrap_or_default();
            let page = Rc::clone(&page);
            spawn_local(async move {
                if let Err(e) = page.service.rename(id, &text).await {
                    page.report(e);
                }
            });
        })
    }

    /// Элемент галереи, внутри которого находится `inner`, и его `data-id`
    fn item_of(&self, inner: &Element) -> Option<(u32, Element)> {
        let item = dom::closest(inner, &format!(".{}", self.service.config().item_class))?;
        let id = controls::item_id(dom::data_attr(&item, "id").as_deref())?;
        Some((id, item))
    }

    async fn upload(self: &Rc<Self>, board: &BoardConfig) -> Result<()> {
        let file_input: HtmlInputElement = dom::by_id(&self.document, &board.file_input)?;
        let title_input: HtmlInputElement = dom::by_id(&self.document, &board.title_input)?;

        let title = title_input.value();
        let selected = file::selected_file(&file_input);
        let Some(selected) = selected.filter(|_| !title.trim().is_empty()) else {
            return Err(MomentsError::ValidationError("file and title are required".to_string()));
        };

        let src = file::read_as_data_url(&selected).await?;
        file_input.set_value("");
        title_input.set_value("");

        match self.service.upload(&board.gallery, &title, Some(src)).await? {
            UploadOutcome::Appended { board, item } => self.render_item(&board, &item),
            UploadOutcome::Reloaded => self.render_all(),
        }
    }

    async fn reload(self: &Rc<Self>) -> Result<()> {
        self.service.load().await?;
        self.render_all()
    }

    /// Очистить доски и отрисовать состояние целиком
    fn render_all(&self) -> Result<()> {
        let boards: Vec<(String, Vec<GalleryItem>)> = self
            .service
            .state()
            .boards()
            .iter()
            .map(|b| (b.id.clone(), b.items.clone()))
            .collect();

        for (board_id, items) in boards {
            // доски может не быть на этой странице
            let Some(container) = self.document.get_element_by_id(&board_id) else {
                continue;
            };
            dom::clear_children(&container);
            for item in &items {
                self.render_item(&board_id, item)?;
            }
        }
        Ok(())
    }

    fn render_item(&self, board_id: &str, item: &GalleryItem) -> Result<()> {
        let Some(container) = self.document.get_element_by_id(board_id) else {
            return Ok(());
        };

        let element: HtmlElement = dom::create(&self.document, "div")?;
        element.set_class_name(&self.service.config().item_class);
        dom::set_data(&element, "id", &item.id.to_string())?;
        dom::set_style(&element, "position", "relative")?;

        let img: HtmlImageElement = dom::create(&self.document, "img")?;
        img.set_src(&item.src);
        img.set_alt(&item.title);

        let title = dom::create_with_text(&self.document, "h3", None, &item.title)?;
        title.set_content_editable("true");

        let delete = dom::create_with_text(
            &self.document,
            "button",
            Some(controls::GALLERY_DELETE),
            "🗑",
        )?;
        dom::set_style(&delete, "position", "absolute")?;
        dom::set_style(&delete, "top", "10px")?;
        dom::set_style(&delete, "right", "10px")?;

        dom::append(&element, &img)?;
        dom::append(&element, &title)?;
        dom::append(&element, &delete)?;
        dom::append(&container, &element)
    }

    /// Ошибки ввода показываются пользователю, остальное уходит в консоль
    fn report(&self, error: MomentsError) {
        if error.is_validation() {
            dom::alert(&self.service.config().missing_input_alert);
        } else {
            logging::error(&error.to_string());
        }
    }
}
