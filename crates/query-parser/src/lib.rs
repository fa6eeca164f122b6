//! Query string parsing for page-params
//!
//! Reads the query portion of the current address into a flat
//! [`ParameterStore`] and keeps it in step with history navigation.

pub mod decode;
pub mod environment;
pub mod parser;
pub mod sync;

pub use decode::decode_component;
pub use environment::{MemoryEnvironment, NavigationCallback, PageEnvironment};
pub use parser::{query_from_address, tokens, QueryStringParser, RawPair};
pub use sync::ParameterSync;

pub use page_params_shared::{
    DecodeError, DecodeErrorPolicy, ParameterStore, ParamsError, ParamsResult, ParserConfig,
};
