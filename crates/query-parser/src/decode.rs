//! Decoding of a single key or value taken from a query string

use page_params_shared::DecodeError;
use percent_encoding::percent_decode_str;

/// Decode one query-string component.
///
/// `+` becomes a space first, then every `%XY` escape is decoded. The decoded
/// bytes must form valid UTF-8. A `%` that is not followed by two hex digits is
/// rejected instead of being passed through.
pub fn decode_component(raw: &str) -> Result<String, DecodeError> {
    let spaced = raw.replace('+', " ");
    check_escapes(&spaced)?;

    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8 {
            input: raw.to_string(),
        })
}

fn check_escapes(input: &str) -> Result<(), DecodeError> {
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }

        match bytes.get(i + 1..i + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
            _ => {
                // '%' is ASCII so `i` is a char boundary
                return Err(DecodeError::MalformedEscape {
                    offset: i,
                    sequence: input[i..].chars().take(3).collect(),
                });
            }
        }
    }

    Ok(())
}
