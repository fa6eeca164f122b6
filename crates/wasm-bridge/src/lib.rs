//! WASM Bridge crate for page-params
//! Publishes the current page's query parameters as `window.parameters`
//! and refreshes them on every `popstate`.

use page_params_core::{ParameterSync, QueryStringParser};
use page_params_shared::ParserConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub mod browser;

pub use browser::{to_js_error, BrowserEnvironment};

thread_local! {
    static PAGE_PARAMS: RefCell<Option<ParameterSync<BrowserEnvironment>>> = const { RefCell::new(None) };
}

fn init_logging(config: &ParserConfig) -> Result<(), JsValue> {
    let level = config.level_filter().map_err(to_js_error)?;
    // Already initialised on reconfigure; only the level changes then
    let _ = console_log::init_with_level(log::Level::Trace);
    log::set_max_level(level);
    Ok(())
}

fn install(config: ParserConfig) -> Result<(), JsValue> {
    init_logging(&config)?;

    let global_name = config.global_name.clone();
    let env = Rc::new(BrowserEnvironment::new(global_name.clone())?);
    let sync = ParameterSync::attach(env, QueryStringParser::new(config)).map_err(to_js_error)?;

    // Dropping the previous sync detaches its popstate listener
    let previous = PAGE_PARAMS.with(|slot| slot.borrow_mut().replace(sync));
    if let Some(previous) = previous {
        if previous.environment().global_name() != global_name {
            previous.environment().withdraw().map_err(to_js_error)?;
        }
    }

    log::info!("Page parameters installed as window.{global_name}");
    refresh_parameters()
}

/// Initialize the WASM module: parse once and follow history navigation
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    install(ParserConfig::default())
}

/// Reinstall with a JSON configuration, e.g. `{"globalName":"query","decodeErrors":"skipPair"}`
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = ParserConfig::from_json(config_json).map_err(to_js_error)?;
    install(config)
}

/// Re-parse the current address now
#[wasm_bindgen]
pub fn refresh_parameters() -> Result<(), JsValue> {
    PAGE_PARAMS.with(|slot| {
        let slot = slot.borrow();
        let sync = slot
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Page parameters not installed"))?;
        sync.refresh().map_err(to_js_error)
    })
}

#[wasm_bindgen]
pub fn get_parameter(key: &str) -> Option<String> {
    PAGE_PARAMS.with(|slot| slot.borrow().as_ref().and_then(|sync| sync.get(key)))
}

/// Current parameters as a JSON object string
#[wasm_bindgen]
pub fn parameters_json() -> String {
    PAGE_PARAMS.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|sync| sync.snapshot().to_json())
            .unwrap_or_else(|| "{}".to_string())
    })
}
