//! ChainJournal WASM front-end.
//!
//! Binds the page to a [`Journal`]: a wallet session and a diary session on
//! top of either the injected `window.aptos` wallet or a simulated chain.

pub mod dom;
pub mod events;
pub mod injected;
pub mod journal_ops;
pub mod logging;
pub mod platform;
pub mod render;
pub mod storage;

use cj_diary_core::Journal;
use std::rc::Rc;
use tracing::info;
use wasm_bindgen::prelude::*;

/// What every event handler needs. Cheap to clone.
#[derive(Clone)]
pub struct App {
    pub els: dom::Elements,
    pub journal: Rc<Journal>,
}

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let store = platform::open_store();
    let config = platform::load_config(&*store);
    let chain = platform::select_chain(&config);

    let app = App {
        els: dom::Elements::bind()?,
        journal: Rc::new(Journal::new(chain, store)),
    };

    let screen = app.journal.start();
    info!("starting on {:?}", screen);

    render::render(&app.els, &app.journal);
    render::render_counter(&app.els);
    render::render_loading(&app.els, false);
    events::bind_events(&app)?;
    Ok(())
}
