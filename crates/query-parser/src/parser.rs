use once_cell::sync::Lazy;
use page_params_shared::{
    DecodeError, DecodeErrorPolicy, ParameterStore, ParamsError, ParamsResult, ParserConfig,
};
use regex::Regex;

use crate::decode::decode_component;

/// A key run of anything but `&` and `=`, an optional `=`, then a value run of anything but `&`
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^&=]+)=?([^&]*)").expect("token pattern is valid"));

/// One `key=value` token as it appears in the query, before decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPair<'a> {
    pub token: &'a str,
    pub key: &'a str,
    pub value: &'a str,
}

impl RawPair<'_> {
    /// Decode key then value
    pub fn decode(&self) -> Result<(String, String), DecodeError> {
        let key = decode_component(self.key)?;
        let value = decode_component(self.value)?;
        Ok((key, value))
    }
}

/// Scan `query` left to right for `key=value` tokens.
///
/// Empty segments produce nothing and a missing `=` gives an empty value.
pub fn tokens(query: &str) -> impl Iterator<Item = RawPair<'_>> {
    TOKEN.captures_iter(query).filter_map(|caps| {
        let token = caps.get(0)?.as_str();
        let key = caps.get(1)?.as_str();
        let value = caps.get(2).map_or("", |m| m.as_str());
        Some(RawPair { token, key, value })
    })
}

/// The query portion of an address: after the first `?`, before any `#`.
pub fn query_from_address(address: &str) -> &str {
    let without_fragment = address.split_once('#').map_or(address, |(rest, _)| rest);
    without_fragment.split_once('?').map_or("", |(_, query)| query)
}

/// Turns a query string into a [`ParameterStore`]
#[derive(Debug, Clone, Default)]
pub struct QueryStringParser {
    config: ParserConfig,
}

impl QueryStringParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Clear `store` and fill it from `query`, returning how many pairs were inserted.
    ///
    /// Repeated keys keep their last value. Under [`DecodeErrorPolicy::Abort`] the
    /// first undecodable pair ends the parse with an error and the pairs before it
    /// stay in the store.
    pub fn parse_into(&self, query: &str, store: &mut ParameterStore) -> ParamsResult<usize> {
        store.clear();
        let mut inserted = 0;

        for pair in tokens(query) {
            match pair.decode() {
                Ok((key, value)) => {
                    store.insert(key, value);
                    inserted += 1;
                }
                Err(source) => {
                    let err = ParamsError::Decode {
                        token: pair.token.to_string(),
                        source,
                    };
                    match self.config.decode_errors {
                        DecodeErrorPolicy::Abort => return Err(err),
                        DecodeErrorPolicy::SkipPair => log::warn!("Skipping query pair: {err}"),
                    }
                }
            }
        }

        log::debug!("Parsed {inserted} query pair(s) into {} parameter(s)", store.len());
        Ok(inserted)
    }

    pub fn parse(&self, query: &str) -> ParamsResult<ParameterStore> {
        let mut store = ParameterStore::new();
        self.parse_into(query, &mut store)?;
        Ok(store)
    }
}
