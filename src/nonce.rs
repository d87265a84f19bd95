use rand::{TryRngCore, rngs::OsRng};

use super::{Error, encoding};

/// Length of an AES-GCM nonce, in bytes.
pub const NONCE_LEN: usize = 12;

/// The 96-bit value that makes each encryption under a key unique.
///
/// Nonces are not secret, and travel alongside the ciphertext they were used for.  They
/// *must* never repeat under the same key, which is why the only way to make a new one is
/// [`Nonce::generate`]; the other constructors rebuild a nonce that was already used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
	/// Draw a fresh nonce from the operating system's CSPRNG.
	///
	/// # Errors
	///
	/// [`Error::Entropy`] if the OS cannot supply randomness.  There is no fallback source.
	pub fn generate() -> Result<Self, Error> {
		Self::generate_from(&mut OsRng)
	}

	pub(crate) fn generate_from(rng: &mut impl TryRngCore) -> Result<Self, Error> {
		let mut n = [0u8; NONCE_LEN];

		rng.try_fill_bytes(&mut n)
			.map_err(|e| Error::entropy(e.to_string()))?;

		Ok(Self(n))
	}

	pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
		&self.0
	}

	pub fn to_base64(&self) -> String {
		encoding::encode(self.0)
	}

	/// Rebuild a nonce from its stored text form.
	///
	/// # Errors
	///
	/// [`Error::Decoding`] unless `text` is valid base64 of exactly [`NONCE_LEN`] bytes.
	pub fn from_base64(text: &str) -> Result<Self, Error> {
		encoding::decode_exact::<NONCE_LEN>("iv", text).map(Self)
	}
}

impl From<[u8; NONCE_LEN]> for Nonce {
	fn from(n: [u8; NONCE_LEN]) -> Self {
		Self(n)
	}
}

impl TryFrom<&[u8]> for Nonce {
	type Error = Error;

	fn try_from(b: &[u8]) -> Result<Self, Error> {
		<[u8; NONCE_LEN]>::try_from(b)
			.map(Self)
			.map_err(|_| encoding::wrong_length("iv", NONCE_LEN, b.len()))
	}
}

impl std::fmt::Display for Nonce {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for b in &self.0 {
			f.write_fmt(format_args!("{b:02x}"))?;
		}

		Ok(())
	}
}
