//! Browser-backed environment: `window.location`, `popstate` and a window global

use page_params_core::{NavigationCallback, PageEnvironment};
use page_params_shared::{ParameterStore, ParamsError, ParamsResult};
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

const POPSTATE: &str = "popstate";

type PopStateHandler = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

/// Convert an error into a JS `Error` so it surfaces in the console when thrown
pub fn to_js_error(err: ParamsError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn environment_error(context: &str, err: JsValue) -> ParamsError {
    ParamsError::Environment {
        message: format!("{context}: {err:?}"),
    }
}

pub struct BrowserEnvironment {
    window: Window,
    global_name: String,
    listeners: RefCell<Vec<PopStateHandler>>,
}

impl BrowserEnvironment {
    pub fn new(global_name: impl Into<String>) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;

        Ok(Self {
            window,
            global_name: global_name.into(),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    /// Delete the published global from `window`
    pub fn withdraw(&self) -> ParamsResult<()> {
        js_sys::Reflect::delete_property(&self.window, &JsValue::from_str(&self.global_name))
            .map_err(|e| environment_error("Failed to remove window global", e))?;
        Ok(())
    }
}

impl PageEnvironment for BrowserEnvironment {
    fn current_query(&self) -> ParamsResult<String> {
        let search = self
            .window
            .location()
            .search()
            .map_err(|e| environment_error("Failed to read location.search", e))?;

        Ok(search.strip_prefix('?').unwrap_or(&search).to_string())
    }

    fn on_navigation_change(&self, mut callback: NavigationCallback) -> ParamsResult<()> {
        // Returning Err throws into the browser, which reports it as uncaught
        let handler = Closure::wrap(Box::new(move |_event: Event| {
            callback().map_err(to_js_error)
        }) as Box<dyn FnMut(Event) -> Result<(), JsValue>>);

        self.window
            .add_event_listener_with_callback(POPSTATE, handler.as_ref().unchecked_ref())
            .map_err(|e| environment_error("Failed to subscribe to popstate", e))?;

        self.listeners.borrow_mut().push(handler);
        Ok(())
    }

    fn publish(&self, store: &ParameterStore) -> ParamsResult<()> {
        // json_compatible gives a plain object instead of a Map
        let value = store
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ParamsError::Environment {
                message: format!("Failed to convert parameters: {e}"),
            })?;

        js_sys::Reflect::set(&self.window, &JsValue::from_str(&self.global_name), &value)
            .map_err(|e| environment_error("Failed to publish parameters", e))?;

        log::debug!(
            "Published {} parameter(s) to window.{}",
            store.len(),
            self.global_name
        );
        Ok(())
    }
}

impl Drop for BrowserEnvironment {
    fn drop(&mut self) {
        for handler in self.listeners.get_mut().drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(POPSTATE, handler.as_ref().unchecked_ref());
        }
    }
}
