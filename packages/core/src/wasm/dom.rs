// Помощники для работы с DOM
//
// Пользовательский текст всегда вставляется через textContent/value.

use crate::utils::error::{dom_error, MomentsError, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| MomentsError::DomError("not running in a browser".to_string()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| MomentsError::DomError("window has no document".to_string()))
}

/// `document.getElementById` с приведением типа
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| MomentsError::NotFound(format!("element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|e| dom_error(&format!("#{} has unexpected type", id), e.into()))
}

/// Первый потомок по CSS-селектору
pub fn query<T: JsCast>(root: &Element, selector: &str) -> Result<T> {
    root.query_selector(selector)
        .map_err(|e| dom_error(&format!("bad selector {}", selector), e))?
        .ok_or_else(|| MomentsError::NotFound(format!("element {}", selector)))?
        .dyn_into::<T>()
        .map_err(|e| dom_error(&format!("{} has unexpected type", selector), e.into()))
}

pub fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(|e| dom_error(&format!("Failed to create <{}>", tag), e))?
        .dyn_into::<T>()
        .map_err(|e| dom_error(&format!("<{}> has unexpected type", tag), e.into()))
}

/// Элемент с классом и текстом
pub fn create_with_text(
    document: &Document,
    tag: &str,
    class: Option<&str>,
    text: &str,
) -> Result<HtmlElement> {
    let element: HtmlElement = create(document, tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    element.set_text_content(Some(text));
    Ok(element)
}

pub fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map_err(|e| dom_error("Failed to append child", e))?;
    Ok(())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<()> {
    element
        .style()
        .set_property(property, value)
        .map_err(|e| dom_error(&format!("Failed to set {}", property), e))
}

/// display: inline / none
pub fn set_visible(element: &HtmlElement, visible: bool) -> Result<()> {
    set_style(element, "display", if visible { "inline" } else { "none" })
}

pub fn set_data(element: &HtmlElement, key: &str, value: &str) -> Result<()> {
    element
        .dataset()
        .set(key, value)
        .map_err(|e| dom_error(&format!("Failed to set data-{}", key), e))
}

pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<()> {
    element
        .set_attribute(name, value)
        .map_err(|e| dom_error(&format!("Failed to set {}", name), e))
}

pub fn clear_children(element: &Element) {
    while let Some(child) = element.first_child() {
        let _ = element.remove_child(&child);
    }
}

pub fn alert(message: &str) {
    if let Ok(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Элемент, на котором произошло событие
pub fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// `element.closest(selector)`; ошибка селектора считается промахом
pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub fn data_attr(element: &Element, key: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", key))
}

/// Повесить обработчик; замыкание живёт вместе со страницей, поэтому
/// вешать только на элементы, которые не перерисовываются
pub fn on<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| dom_error(&format!("Failed to listen for {}", event), e))?;
    closure.forget();
    Ok(())
}
