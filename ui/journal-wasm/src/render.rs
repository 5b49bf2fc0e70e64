//! Rendering from journal state. Nothing here changes the state.

use cj_api_types::DiaryEntry;
use cj_diary_core::display;
use cj_diary_core::form;
use cj_diary_core::{ChainMode, Journal, Screen};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::{self, Elements};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// Show the view for the current screen and refresh header and buttons.
pub fn render(els: &Elements, journal: &Journal) {
    let screen = journal.screen();
    dom::set_hidden(&els.connect_view, screen != Screen::Disconnected);
    dom::set_hidden(&els.init_view, screen != Screen::AwaitingInit);
    dom::set_hidden(&els.ready_view, screen != Screen::Ready);
    dom::set_hidden(&els.mode_notice, journal.mode() != ChainMode::Simulated);

    match journal.wallet().account() {
        Some(account) => dom::set_text(&els.welcome, &display::welcome(&account.address)),
        None => dom::clear(&els.welcome),
    }
    render_busy(els, journal.is_busy());
}

pub fn render_busy(els: &Elements, busy: bool) {
    els.submit_btn.set_disabled(busy);
    els.submit_btn.set_text_content(Some(form::submit_label(busy)));
    els.init_btn.set_disabled(busy);
    els.init_btn.set_text_content(Some(form::initialize_label(busy)));
}

pub fn render_counter(els: &Elements) {
    dom::set_text(&els.char_count, &form::char_counter(&els.entry_input.value()));
}

pub fn render_loading(els: &Elements, loading: bool) {
    dom::set_hidden(&els.entries_loading, !loading);
    dom::set_hidden(&els.entries_list, loading);
}

pub fn render_entries(els: &Elements, entries: &[DiaryEntry]) -> Result<(), JsValue> {
    let list = &els.entries_list;
    dom::clear(list);

    if entries.is_empty() {
        let empty = dom::create_element("div", "entries-empty")?;
        let title = dom::text_element("p", "entries-empty-title", "No diary entries yet")?;
        let hint = dom::text_element(
            "p",
            "entries-empty-hint",
            "Start writing your first entry above!",
        )?;
        empty.append_child(&title)?;
        empty.append_child(&hint)?;
        list.append_child(&empty)?;
        return Ok(());
    }

    for entry in entries {
        let card = entry_card(entry)?;
        list.append_child(&card)?;
    }
    Ok(())
}

fn entry_card(entry: &DiaryEntry) -> Result<Element, JsValue> {
    let card = dom::create_element("article", "entry")?;

    let header = dom::create_element("header", "entry-header")?;
    let title = dom::text_element("h3", "entry-title", &display::entry_title(entry))?;
    let tag = dom::text_element("span", "entry-tag", "Immutable")?;
    let date = display::format_entry_date(entry.timestamp, &chrono::Local)
        .unwrap_or_else(|| entry.timestamp.to_string());
    let time = dom::text_element("time", "entry-date", &date)?;
    header.append_child(&title)?;
    header.append_child(&tag)?;
    header.append_child(&time)?;
    card.append_child(&header)?;

    let content = dom::text_element("p", "entry-content", &entry.content)?;
    card.append_child(&content)?;

    if let Some(hash) = &entry.transaction_hash {
        let tx = dom::text_element("p", "entry-tx", &display::transaction_label(hash))?;
        tx.set_attribute("title", hash)?;
        card.append_child(&tx)?;
    }
    Ok(card)
}

pub fn show_message(el: &Element, text: &str, tone: Tone) {
    dom::set_text(el, text);
    dom::toggle_class(el, "success", tone == Tone::Success);
    dom::toggle_class(el, "error", tone == Tone::Error);
    dom::set_hidden(el, false);
}

pub fn clear_message(el: &Element) {
    dom::clear(el);
    dom::set_hidden(el, true);
}
