use rand::{TryRngCore, rngs::OsRng};
use secrecy::{ExposeSecret as _, SecretBox, SecretString};
use zeroize::Zeroizing;

use super::{Error, encoding};

/// Length of a submission key, in bytes.
pub const KEY_LEN: usize = 32;

/// The one-time AES-256 key protecting a single submission.
///
/// The bytes live in a [`SecretBox`], so they are wiped when the key is dropped and never show
/// up in `Debug` output.  A key is deliberately not `Clone`: the holder of the exported text
/// form is the only party meant to be able to recreate it.
#[derive(Debug)]
pub struct Key(SecretBox<[u8; KEY_LEN]>);

impl Key {
	pub fn expose_secret(&self) -> &[u8; KEY_LEN] {
		self.0.expose_secret()
	}

	/// Encode the key for handing to a recipient.
	///
	/// The result is standard, padded base64 on a single line, and the same key always
	/// produces the same text.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn export(&self) -> SecretString {
		encoding::encode(self.expose_secret()).into()
	}

	/// Rebuild a key from the text produced by [`Key::export`].
	///
	/// Leading and trailing whitespace is ignored, as keys tend to get pasted around.
	///
	/// # Errors
	///
	/// [`Error::Decoding`] if the text is not canonical base64, or does not decode to exactly
	/// [`KEY_LEN`] bytes.  Any 256-bit value is otherwise accepted.
	#[tracing::instrument(level = "debug", skip(encoded))]
	pub fn import(encoded: &str) -> Result<Self, Error> {
		let bytes = Zeroizing::new(encoding::decode("key", encoded.trim())?);

		Key::try_from(bytes.as_slice())
	}
}

impl From<Box<[u8; KEY_LEN]>> for Key {
	fn from(k: Box<[u8; KEY_LEN]>) -> Self {
		Key(k.into())
	}
}

impl TryFrom<&[u8]> for Key {
	type Error = Error;

	fn try_from(b: &[u8]) -> Result<Self, Error> {
		if b.len() != KEY_LEN {
			return Err(encoding::wrong_length("key", KEY_LEN, b.len()));
		}

		let mut k = Box::new([0u8; KEY_LEN]);
		k.copy_from_slice(b);

		Ok(k.into())
	}
}

/// Create a fresh key for a single submission.
///
/// The key material comes straight from the operating system's CSPRNG.
///
/// # Errors
///
/// [`Error::Entropy`] if the OS cannot supply randomness; no weaker source is substituted.
#[tracing::instrument(level = "debug")]
pub fn generate_key() -> Result<Key, Error> {
	generate_key_from(&mut OsRng)
}

pub(crate) fn generate_key_from(rng: &mut impl TryRngCore) -> Result<Key, Error> {
	let mut k = Box::new([0u8; KEY_LEN]);

	rng.try_fill_bytes(&mut k[..])
		.map_err(|e| Error::entropy(e.to_string()))?;

	Ok(k.into())
}
