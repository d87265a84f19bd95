//! The text boundary for binary values.
//!
//! Everything that leaves the crate as text (stored record fields, the displayed key) is
//! standard-alphabet, padded base64 on one line.  Decoding is strict: non-canonical input,
//! missing padding, stray characters, and values of the wrong length for their role are all
//! rejected rather than repaired.
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::Error;

pub(crate) fn encode(bytes: impl AsRef<[u8]>) -> String {
	STANDARD.encode(bytes)
}

pub(crate) fn decode(element: &str, text: &str) -> Result<Vec<u8>, Error> {
	STANDARD
		.decode(text)
		.map_err(|e| Error::decoding(element, e.to_string()))
}

/// Decode a field that has exactly one valid length.
pub(crate) fn decode_exact<const N: usize>(element: &str, text: &str) -> Result<[u8; N], Error> {
	let bytes = decode(element, text)?;

	<[u8; N]>::try_from(bytes.as_slice()).map_err(|_| wrong_length(element, N, bytes.len()))
}

pub(crate) fn wrong_length(element: &str, expected: usize, actual: usize) -> Error {
	Error::decoding(element, format!("expected {expected} bytes, got {actual}"))
}
