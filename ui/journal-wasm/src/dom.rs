//! DOM element bindings.
//!
//! All fields are resolved once at startup; a missing id fails the start.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlTextAreaElement};

fn doc() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn create_element(tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc().create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Element with plain text content; the text is never parsed as HTML.
pub fn text_element(tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = create_element(tag, class)?;
    set_text(&el, text);
    Ok(el)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn clear(el: &Element) {
    el.set_text_content(None);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.toggle_attribute_with_force("hidden", hidden);
}

// ── Elements struct ──

/// Every element the journal page touches. Clone-friendly: the handles are
/// references into the JS heap.
#[derive(Clone)]
pub struct Elements {
    pub mode_notice: Element,

    // Connect screen
    pub connect_view: Element,
    pub connect_btn: HtmlButtonElement,
    pub connect_message: Element,

    // Initialize screen
    pub init_view: Element,
    pub init_btn: HtmlButtonElement,
    pub init_message: Element,

    // Ready screen
    pub ready_view: Element,
    pub welcome: Element,
    pub disconnect_btn: HtmlButtonElement,
    pub entry_input: HtmlTextAreaElement,
    pub char_count: Element,
    pub submit_btn: HtmlButtonElement,
    pub form_message: Element,
    pub entries_loading: Element,
    pub entries_list: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

macro_rules! get_textarea {
    ($id:expr) => {
        by_id_typed::<HtmlTextAreaElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing textarea #{}", $id)))?
    };
}

impl Elements {
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            mode_notice: get_el!("modeNotice"),

            connect_view: get_el!("connectView"),
            connect_btn: get_button!("connectBtn"),
            connect_message: get_el!("connectMessage"),

            init_view: get_el!("initView"),
            init_btn: get_button!("initBtn"),
            init_message: get_el!("initMessage"),

            ready_view: get_el!("readyView"),
            welcome: get_el!("welcome"),
            disconnect_btn: get_button!("disconnectBtn"),
            entry_input: get_textarea!("entryInput"),
            char_count: get_el!("charCount"),
            submit_btn: get_button!("submitBtn"),
            form_message: get_el!("formMessage"),
            entries_loading: get_el!("entriesLoading"),
            entries_list: get_el!("entriesList"),
        })
    }
}
