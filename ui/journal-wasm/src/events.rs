//! Event binding.
//!
//! Async handlers are spawned on the browser event loop with
//! `wasm_bindgen_futures::spawn_local`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::App;
use crate::journal_ops;
use crate::render;

/// Attach an async click handler.
macro_rules! on_click_async {
    ($el:expr, $app:expr, $handler:path) => {{
        let app = $app.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&app).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Attach a sync handler for `$event`.
macro_rules! on_event {
    ($el:expr, $event:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        $el.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after startup.
pub fn bind_events(app: &App) -> Result<(), JsValue> {
    on_click_async!(app.els.connect_btn, app, journal_ops::on_connect);
    on_click_async!(app.els.init_btn, app, journal_ops::on_initialize);
    on_click_async!(app.els.submit_btn, app, journal_ops::on_submit);

    {
        let app2 = app.clone();
        on_event!(app.els.disconnect_btn, "click", move |_: web_sys::Event| {
            journal_ops::on_disconnect(&app2);
        });
    }
    {
        let app2 = app.clone();
        on_event!(app.els.entry_input, "input", move |_: web_sys::Event| {
            render::render_counter(&app2.els);
        });
    }
    Ok(())
}
