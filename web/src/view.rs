//! DOM rendering of the user select and the todo list.
//!
//! # Design
//! Rows are tracked in a key-to-row map instead of being found again through
//! `data-id` lookups. Keys come from the store, so two todos with the same
//! server id still get separate rows. Each row owns the closures behind its listeners, so
//! removing a row detaches and frees them together with the element.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::error;
use todo_client_core::{RowEvent, RowKey, SyncState, Todo, TodoView, User};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, Window,
};

type Listener = Closure<dyn FnMut(Event)>;

/// Handles of one rendered todo.
struct TodoRow {
    item: Element,
    checkbox: HtmlInputElement,
    delete: HtmlButtonElement,
    on_change: Listener,
    on_click: Listener,
}

impl TodoRow {
    /// Remove the listeners and the element. The closures drop with `self`.
    fn detach(self) {
        if let Err(err) = self
            .checkbox
            .remove_event_listener_with_callback("change", self.on_change.as_ref().unchecked_ref())
        {
            error!("failed to detach change listener: {err:?}");
        }
        if let Err(err) = self
            .delete
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
        {
            error!("failed to detach click listener: {err:?}");
        }
        self.item.remove();
    }
}

pub struct DomView {
    window: Window,
    document: Document,
    list: Element,
    select: HtmlSelectElement,
    rows: RefCell<HashMap<RowKey, TodoRow>>,
    dispatch: Rc<dyn Fn(RowEvent)>,
}

impl DomView {
    /// `dispatch` receives every checkbox change and delete click.
    pub fn new(
        window: Window,
        document: Document,
        list: Element,
        select: HtmlSelectElement,
        dispatch: impl Fn(RowEvent) + 'static,
    ) -> Self {
        Self {
            window,
            document,
            list,
            select,
            rows: RefCell::new(HashMap::new()),
            dispatch: Rc::new(dispatch),
        }
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T, JsValue> {
        Ok(self.document.create_element(tag)?.dyn_into::<T>()?)
    }

    fn paragraph(&self, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
        let p = self.document.create_element("p")?;
        p.set_class_name(class);
        p.set_text_content(text);
        Ok(p)
    }

    fn build_row(
        &self,
        key: RowKey,
        todo: &Todo,
        user_name: Option<&str>,
    ) -> Result<TodoRow, JsValue> {
        let item = self.document.create_element("li")?;
        item.set_class_name("todo-item");
        item.set_attribute("data-id", &todo.id.to_string())?;

        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name("todo-wrapper");

        let checkbox: HtmlInputElement = self.create("input")?;
        checkbox.set_type("checkbox");
        checkbox.set_class_name("completed");
        checkbox.set_checked(todo.completed);

        let delete: HtmlButtonElement = self.create("button")?;
        delete.set_type("button");
        delete.set_class_name("delete");
        delete.set_text_content(Some("\u{00d7}"));
        delete.set_attribute("aria-label", "Delete todo")?;

        wrapper.append_child(&checkbox)?;
        let user_p: Element = self.paragraph("username", user_name)?;
        let text_p: Element = self.paragraph("todo-text", Some(&todo.title))?;
        wrapper.append_child(&user_p)?;
        wrapper.append_child(&text_p)?;
        wrapper.append_child(&delete)?;
        item.append_child(&wrapper)?;

        let on_change = {
            let dispatch = Rc::clone(&self.dispatch);
            let input = checkbox.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                dispatch(RowEvent::Toggled {
                    key,
                    completed: input.checked(),
                });
            })
        };
        let on_click = {
            let dispatch = Rc::clone(&self.dispatch);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                dispatch(RowEvent::DeleteRequested { key });
            })
        };
        checkbox.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        delete.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        Ok(TodoRow {
            item,
            checkbox,
            delete,
            on_change,
            on_click,
        })
    }

    fn try_add_user_option(&self, user: &User) -> Result<(), JsValue> {
        let option = HtmlOptionElement::new_with_text_and_value(&user.name, &user.id.to_string())?;
        self.select.append_child(&option)?;
        Ok(())
    }

    fn try_show_completion(
        &self,
        key: RowKey,
        completed: bool,
        state: SyncState,
    ) -> Result<(), JsValue> {
        let rows = self.rows.borrow();
        let Some(row) = rows.get(&key) else {
            return Ok(());
        };
        row.checkbox.set_checked(completed);
        row.checkbox.set_disabled(state == SyncState::Pending);
        let classes = row.item.class_list();
        classes.toggle_with_force("pending", state == SyncState::Pending)?;
        classes.toggle_with_force("failed", state == SyncState::Failed)?;
        Ok(())
    }
}

impl TodoView for DomView {
    fn add_user_option(&self, user: &User) {
        if let Err(err) = self.try_add_user_option(user) {
            error!("failed to add option for user {}: {err:?}", user.id);
        }
    }

    fn render_todo_row(&self, key: RowKey, todo: &Todo, user_name: Option<&str>) {
        let row = match self.build_row(key, todo, user_name) {
            Ok(row) => row,
            Err(err) => {
                error!("failed to build row for todo {}: {err:?}", todo.id);
                return;
            }
        };
        if let Err(err) = self.list.prepend_with_node_1(&row.item) {
            error!("failed to insert row for todo {}: {err:?}", todo.id);
            row.detach();
            return;
        }
        let previous = self.rows.borrow_mut().insert(key, row);
        if let Some(previous) = previous {
            previous.detach();
        }
    }

    fn remove_todo_row(&self, key: RowKey) {
        let row = self.rows.borrow_mut().remove(&key);
        if let Some(row) = row {
            row.detach();
        }
    }

    fn show_completion(&self, key: RowKey, completed: bool, state: SyncState) {
        if let Err(err) = self.try_show_completion(key, completed, state) {
            error!("failed to update row {key:?}: {err:?}");
        }
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            error!("alert failed ({message}): {err:?}");
        }
    }
}
