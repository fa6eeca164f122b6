//! Host environment the parser reads its address from and reports back to

use page_params_shared::{ParameterStore, ParamsError, ParamsResult};
use std::cell::RefCell;

use crate::parser::query_from_address;

/// Invoked whenever the host reports a history navigation
pub type NavigationCallback = Box<dyn FnMut() -> ParamsResult<()>>;

/// Provider of the current address and of navigation notifications.
///
/// An `Err` returned from a navigation callback belongs to the environment,
/// which reports it the way it reports any other unhandled error.
pub trait PageEnvironment {
    /// Query portion of the current address, without the leading `?`
    fn current_query(&self) -> ParamsResult<String>;

    fn on_navigation_change(&self, callback: NavigationCallback) -> ParamsResult<()>;

    /// Make a freshly parsed store visible to other page code
    fn publish(&self, _store: &ParameterStore) -> ParamsResult<()> {
        Ok(())
    }
}

/// In-memory environment for native callers and tests
#[derive(Default)]
pub struct MemoryEnvironment {
    address: RefCell<String>,
    listeners: RefCell<Vec<NavigationCallback>>,
    reported: RefCell<Vec<ParamsError>>,
    published: RefCell<Vec<ParameterStore>>,
}

impl MemoryEnvironment {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: RefCell::new(address.into()),
            ..Self::default()
        }
    }

    pub fn address(&self) -> String {
        self.address.borrow().clone()
    }

    /// Change the address without notifying anyone, like `history.replaceState`
    pub fn set_address(&self, address: impl Into<String>) {
        *self.address.borrow_mut() = address.into();
    }

    /// Change the address and notify every listener, like a back/forward navigation.
    /// Errors returned by listeners are recorded, not propagated.
    pub fn navigate(&self, address: impl Into<String>) {
        self.set_address(address);

        // Listeners may subscribe again while running
        let mut running = std::mem::take(&mut *self.listeners.borrow_mut());
        for callback in running.iter_mut() {
            if let Err(err) = callback() {
                log::warn!("Unhandled navigation error: {err}");
                self.reported.borrow_mut().push(err);
            }
        }

        let mut listeners = self.listeners.borrow_mut();
        running.append(&mut listeners);
        *listeners = running;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn reported_errors(&self) -> Vec<ParamsError> {
        self.reported.borrow().clone()
    }

    pub fn published(&self) -> Vec<ParameterStore> {
        self.published.borrow().clone()
    }

    pub fn last_published(&self) -> Option<ParameterStore> {
        self.published.borrow().last().cloned()
    }
}

impl PageEnvironment for MemoryEnvironment {
    fn current_query(&self) -> ParamsResult<String> {
        Ok(query_from_address(&self.address.borrow()).to_string())
    }

    fn on_navigation_change(&self, callback: NavigationCallback) -> ParamsResult<()> {
        self.listeners.borrow_mut().push(callback);
        Ok(())
    }

    fn publish(&self, store: &ParameterStore) -> ParamsResult<()> {
        self.published.borrow_mut().push(store.clone());
        Ok(())
    }
}
