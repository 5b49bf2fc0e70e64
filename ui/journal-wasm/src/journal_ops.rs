//! Click handlers. Each one calls a single [`Journal`] operation and
//! re-renders from the resulting state.
//!
//! [`Journal`]: cj_diary_core::Journal

use cj_diary_core::form::{ADDED_MESSAGE, FAILED_MESSAGE};
use cj_diary_core::{Screen, SubmitError};
use tracing::{debug, warn};

use crate::App;
use crate::render::{self, Tone};

pub async fn on_connect(app: &App) {
    render::clear_message(&app.els.connect_message);
    if let Err(err) = app.journal.connect().await {
        render::show_message(
            &app.els.connect_message,
            &format!("Failed to connect wallet: {err}"),
            Tone::Error,
        );
    }
    render::render(&app.els, &app.journal);
}

pub async fn on_initialize(app: &App) {
    render::clear_message(&app.els.init_message);
    render::render_busy(&app.els, true);
    render::render_loading(&app.els, true);

    match app.journal.initialize().await {
        Ok(Screen::Ready) => show_entries(app),
        Ok(screen) => debug!("initialize ended on {:?}", screen),
        Err(err) => render::show_message(
            &app.els.init_message,
            &format!("Failed to initialize diary: {err}"),
            Tone::Error,
        ),
    }
    render::render_loading(&app.els, false);
    render::render(&app.els, &app.journal);
}

pub async fn on_submit(app: &App) {
    let input = app.els.entry_input.value();
    render::clear_message(&app.els.form_message);
    render::render_busy(&app.els, true);

    match app.journal.submit_entry(&input).await {
        Ok(_) => {
            app.els.entry_input.set_value("");
            render::show_message(&app.els.form_message, ADDED_MESSAGE, Tone::Success);
            show_entries(app);
        }
        Err(SubmitError::Busy) => debug!("submit ignored, an entry is still being added"),
        Err(err @ SubmitError::Invalid(_)) => {
            render::show_message(&app.els.form_message, &err.to_string(), Tone::Error)
        }
        Err(SubmitError::Failed(cause)) => {
            debug!("entry not added: {}", cause);
            render::show_message(&app.els.form_message, FAILED_MESSAGE, Tone::Error);
        }
    }
    render::render_counter(&app.els);
    render::render_busy(&app.els, app.journal.is_busy());
}

pub fn on_disconnect(app: &App) {
    app.journal.disconnect();
    render::clear_message(&app.els.form_message);
    render::render(&app.els, &app.journal);
}

fn show_entries(app: &App) {
    if let Err(err) = render::render_entries(&app.els, &app.journal.diary().entries()) {
        warn!("failed to render diary entries: {:?}", err);
    }
}
