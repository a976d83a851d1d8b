//! Browser host for the todo list.
//!
//! # Overview
//! Supplies the two host halves the core asks for: `FetchTransport` executes
//! requests with `window.fetch`, and `DomView` renders into the page. The
//! entry point finds the page's form, select and list, builds the
//! `TodoApp`, wires the form submit, and starts the initial load.
//!
//! Expected markup: a `<form>` holding `#todo` (text input) and `#user-todo`
//! (select), and a `#todo-list` list. An optional `data-api-base` attribute
//! on `<body>` points the client at another service.

mod console_log;
mod transport;
mod view;

use std::rc::{Rc, Weak};

use log::{info, warn, LevelFilter};
use todo_client_core::{ClientConfig, RowEvent, TodoApp, TodoClient};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

pub use transport::FetchTransport;
pub use view::DomView;

type App = TodoApp<FetchTransport, DomView>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init(LevelFilter::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let list = element_by_id(&document, "todo-list")?;
    let select: HtmlSelectElement = element_by_id(&document, "user-todo")?.dyn_into()?;
    let title: HtmlInputElement = element_by_id(&document, "todo")?.dyn_into()?;
    let form: HtmlFormElement = document
        .query_selector("form")?
        .ok_or_else(|| JsValue::from_str("missing <form>"))?
        .dyn_into()?;

    let base_url = document
        .body()
        .and_then(|body| body.get_attribute("data-api-base"));
    let config = ClientConfig::with_base_url(base_url.as_deref());
    info!("using task service at {}", config.base_url);
    let client = TodoClient::new(&config);

    let app = Rc::new_cyclic(|weak: &Weak<App>| {
        let view = DomView::new(
            window.clone(),
            document.clone(),
            list,
            select.clone(),
            dispatcher(weak.clone()),
        );
        TodoApp::new(client, FetchTransport, view)
    });

    attach_submit(&form, title, select, Rc::clone(&app))?;
    spawn_local(async move { app.start().await });
    Ok(())
}

fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Runs each row event as its own task. Events after the app is gone are
/// dropped.
fn dispatcher(app: Weak<App>) -> impl Fn(RowEvent) + 'static {
    move |event| match app.upgrade() {
        Some(app) => spawn_local(async move { app.handle(event).await }),
        None => warn!("dropped {event:?}: app is gone"),
    }
}

fn attach_submit(
    form: &HtmlFormElement,
    title: HtmlInputElement,
    user: HtmlSelectElement,
    app: Rc<App>,
) -> Result<(), JsValue> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let app = Rc::clone(&app);
        let title = title.value();
        let user = user.value();
        spawn_local(async move { app.submit(&title, &user).await });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // The form lives as long as the page.
    on_submit.forget();
    Ok(())
}
