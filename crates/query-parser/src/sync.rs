//! Keeps a [`ParameterStore`] in step with the environment's current address

use page_params_shared::{ParameterStore, ParamsResult};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::environment::PageEnvironment;
use crate::parser::QueryStringParser;

struct SyncState<E> {
    env: Rc<E>,
    parser: QueryStringParser,
    store: RefCell<ParameterStore>,
}

impl<E: PageEnvironment> SyncState<E> {
    fn refresh(&self) -> ParamsResult<()> {
        let query = self.env.current_query()?;

        let mut fresh = ParameterStore::new();
        let outcome = self.parser.parse_into(&query, &mut fresh);
        if let Err(err) = &outcome {
            log::warn!("Query parse stopped early with {} parameter(s): {err}", fresh.len());
        }

        // Partial results are published too
        let published = self.env.publish(&fresh);
        *self.store.borrow_mut() = fresh;

        outcome?;
        published
    }
}

/// Owns the parsed parameters and re-parses on every navigation.
///
/// Single-threaded: the store lives behind `Rc<RefCell<..>>` and is only
/// written by [`ParameterSync::refresh`], either called directly or from the
/// navigation callback.
pub struct ParameterSync<E: PageEnvironment> {
    state: Rc<SyncState<E>>,
}

impl<E: PageEnvironment + 'static> ParameterSync<E> {
    /// Subscribe to navigation changes. Does not parse; call [`refresh`](Self::refresh)
    /// for the initial load. The subscription stays active even if that first parse fails.
    pub fn attach(env: Rc<E>, parser: QueryStringParser) -> ParamsResult<Self> {
        let state = Rc::new(SyncState {
            env: env.clone(),
            parser,
            store: RefCell::new(ParameterStore::new()),
        });

        let weak: Weak<SyncState<E>> = Rc::downgrade(&state);
        env.on_navigation_change(Box::new(move || match weak.upgrade() {
            Some(state) => state.refresh(),
            None => Ok(()),
        }))?;

        log::info!("Query parameter sync attached");
        Ok(Self { state })
    }
}

impl<E: PageEnvironment> ParameterSync<E> {
    /// Replace the store with the parameters of the current address
    pub fn refresh(&self) -> ParamsResult<()> {
        self.state.refresh()
    }

    pub fn snapshot(&self) -> ParameterStore {
        self.state.store.borrow().clone()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.state.store.borrow().get(key).map(str::to_string)
    }

    pub fn parser(&self) -> &QueryStringParser {
        &self.state.parser
    }

    pub fn environment(&self) -> &Rc<E> {
        &self.state.env
    }
}
