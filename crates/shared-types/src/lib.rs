//! Shared types for page-params
//!
//! This crate contains the types shared between the query parser and the
//! wasm bridge: the parameter store, the error taxonomy and configuration.

pub mod config;
pub mod errors;
pub mod store;

pub use config::{DecodeErrorPolicy, ParserConfig, DEFAULT_GLOBAL_NAME};
pub use errors::{DecodeError, ParamsError, ParamsResult};
pub use store::ParameterStore;
