//! Authenticated encryption with AES-256-GCM.
//!
//! Each call is independent: it builds a cipher from the key it is given, uses it once, and
//! keeps nothing.  Encryption draws a fresh [`Nonce`] from the OS CSPRNG every time, so any
//! number of calls may run in parallel, on any number of threads, against the same key.
//!
//! Decryption fails closed.  If the authentication tag does not verify, the caller gets
//! [`Error::Authentication`] and no plaintext, whatever the reason (wrong key, a flipped bit in
//! the ciphertext, a nonce from another record, a different context).
use aes_gcm::{
	Aes256Gcm, KeyInit as _,
	aead::{Aead as _, Payload},
};
use rand::{TryRngCore, rngs::OsRng};
use std::fmt::Debug;

use super::{Error, Key, Nonce};

/// Length of the authentication tag appended to every ciphertext, in bytes.
pub const TAG_LEN: usize = 16;

/// The output of an encryption: the ciphertext (with its tag) and the nonce that produced it.
///
/// The two are only useful together, so they are kept together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
	pub nonce: Nonce,
	pub ciphertext: Vec<u8>,
}

impl Ciphertext {
	pub fn new(nonce: Nonce, ciphertext: Vec<u8>) -> Self {
		Self { nonce, ciphertext }
	}
}

/// Encrypt `plaintext` under `key`, with a freshly generated nonce.
///
/// # Example
///
/// ```rust
/// # fn main() -> Result<(), sealed_drop::Error> {
/// let key = sealed_drop::generate_key()?;
///
/// let sealed = sealed_drop::encrypt(b"Hello, world!", &key)?;
/// assert_eq!(b"Hello, world!".to_vec(), sealed_drop::decrypt(&sealed, &key)?);
///
/// // Some other key gets nowhere
/// let other = sealed_drop::generate_key()?;
/// assert!(matches!(
///     sealed_drop::decrypt(&sealed, &other),
///     Err(sealed_drop::Error::Authentication)
/// ));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`Error::Entropy`] if no nonce could be generated, or [`Error::Encryption`] if the
/// plaintext is beyond what AES-GCM can encrypt under one nonce.
pub fn encrypt(plaintext: impl AsRef<[u8]>, key: &Key) -> Result<Ciphertext, Error> {
	encrypt_with_context(plaintext, b"", key)
}

/// Decrypt a [`Ciphertext`] produced by [`encrypt`].
///
/// # Errors
///
/// [`Error::Authentication`] if the ciphertext does not verify under `key`.
pub fn decrypt(ciphertext: &Ciphertext, key: &Key) -> Result<Vec<u8>, Error> {
	decrypt_with_context(ciphertext, b"", key)
}

/// Encrypt `plaintext`, binding `ctx` as associated data.
///
/// The same context has to be supplied to [`decrypt_with_context`].  An empty context is
/// exactly the unbound scheme used by [`encrypt`].
#[tracing::instrument(level = "debug", skip(plaintext, key))]
pub fn encrypt_with_context(
	plaintext: impl AsRef<[u8]>,
	ctx: impl AsRef<[u8]> + Debug,
	key: &Key,
) -> Result<Ciphertext, Error> {
	encrypt_with_rng(&mut OsRng, plaintext, ctx, key)
}

pub(crate) fn encrypt_with_rng(
	rng: &mut impl TryRngCore,
	plaintext: impl AsRef<[u8]>,
	ctx: impl AsRef<[u8]>,
	key: &Key,
) -> Result<Ciphertext, Error> {
	let cipher = Aes256Gcm::new(key.expose_secret().into());
	let nonce = Nonce::generate_from(rng)?;

	let ciphertext = cipher
		.encrypt(
			nonce.as_bytes().into(),
			Payload {
				msg: plaintext.as_ref(),
				aad: ctx.as_ref(),
			},
		)
		.map_err(|_| Error::Encryption)?;
	tracing::debug!(%nonce, len = ciphertext.len(), "Encrypted");

	Ok(Ciphertext::new(nonce, ciphertext))
}

/// Decrypt a [`Ciphertext`], checking that it was encrypted with the context `ctx`.
#[tracing::instrument(level = "debug", skip(ciphertext, key))]
pub fn decrypt_with_context(
	ciphertext: &Ciphertext,
	ctx: impl AsRef<[u8]> + Debug,
	key: &Key,
) -> Result<Vec<u8>, Error> {
	if ciphertext.ciphertext.len() < TAG_LEN {
		tracing::debug!(len = ciphertext.ciphertext.len(), "Ciphertext shorter than tag");
		return Err(Error::Authentication);
	}

	tracing::debug!(nonce = %ciphertext.nonce, "Decrypting");

	let cipher = Aes256Gcm::new(key.expose_secret().into());
	cipher
		.decrypt(
			ciphertext.nonce.as_bytes().into(),
			Payload {
				msg: &ciphertext.ciphertext,
				aad: ctx.as_ref(),
			},
		)
		.map_err(|_| Error::Authentication)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		generate_key,
		test_util::{BrokenRng, flip_bit, init},
	};
	use rand::Rng as _;
	use std::collections::HashSet;

	#[test]
	fn simple_round_trip() {
		init();
		let key = generate_key().unwrap();

		let ciphertext = encrypt(b"hello, world!", &key).unwrap();

		assert_eq!(
			b"hello, world!".to_vec(),
			decrypt(&ciphertext, &key).expect("decryption failed")
		);
	}

	#[test]
	fn random_round_trips() {
		init();
		let mut rng = rand::rng();

		for _ in 0..64 {
			let key = generate_key().unwrap();
			let len = rng.random_range(0..4096);
			let mut plaintext = vec![0u8; len];
			rng.fill(&mut plaintext[..]);

			let ciphertext = encrypt(&plaintext, &key).unwrap();
			assert_eq!(plaintext.len() + TAG_LEN, ciphertext.ciphertext.len());
			assert_eq!(plaintext, decrypt(&ciphertext, &key).unwrap());
		}
	}

	#[test]
	fn empty_plaintext() {
		init();
		let key = generate_key().unwrap();

		let ciphertext = encrypt(b"", &key).unwrap();

		assert_eq!(TAG_LEN, ciphertext.ciphertext.len());
		assert!(decrypt(&ciphertext, &key).unwrap().is_empty());
	}

	#[test]
	fn wrong_key() {
		init();
		let key = generate_key().unwrap();
		let other_key = generate_key().unwrap();

		let ciphertext = encrypt(b"hello, world!", &key).unwrap();

		let result = decrypt(&ciphertext, &other_key);
		assert!(matches!(result, Err(Error::Authentication)));
	}

	#[test]
	fn ciphertext_bit_flips() {
		init();
		let mut rng = rand::rng();
		let key = generate_key().unwrap();
		let ciphertext = encrypt(b"attack at dawn, bring snacks", &key).unwrap();

		for _ in 0..500 {
			let mut tampered = ciphertext.clone();
			let bit = rng.random_range(0..tampered.ciphertext.len() * 8);
			flip_bit(&mut tampered.ciphertext, bit);

			let result = decrypt(&tampered, &key);
			assert!(
				matches!(result, Err(Error::Authentication)),
				"flipping bit {bit} went unnoticed"
			);
		}
	}

	#[test]
	fn nonce_bit_flips() {
		init();
		let mut rng = rand::rng();
		let key = generate_key().unwrap();
		let ciphertext = encrypt(b"attack at dawn, bring snacks", &key).unwrap();

		for _ in 0..500 {
			let mut nonce = *ciphertext.nonce.as_bytes();
			let bit = rng.random_range(0..nonce.len() * 8);
			flip_bit(&mut nonce, bit);
			let tampered = Ciphertext::new(nonce.into(), ciphertext.ciphertext.clone());

			let result = decrypt(&tampered, &key);
			assert!(
				matches!(result, Err(Error::Authentication)),
				"flipping nonce bit {bit} went unnoticed"
			);
		}
	}

	#[test]
	fn truncated_ciphertext() {
		init();
		let key = generate_key().unwrap();
		let mut ciphertext = encrypt(b"hello, world!", &key).unwrap();

		ciphertext.ciphertext.pop();
		assert!(matches!(decrypt(&ciphertext, &key), Err(Error::Authentication)));

		ciphertext.ciphertext.truncate(TAG_LEN - 1);
		assert!(matches!(decrypt(&ciphertext, &key), Err(Error::Authentication)));
	}

	#[test]
	fn nonces_never_repeat() {
		init();
		let key = generate_key().unwrap();
		let mut seen = HashSet::new();

		for _ in 0..10_000 {
			let ciphertext = encrypt(b"same old thing", &key).unwrap();
			assert!(seen.insert(ciphertext.nonce), "nonce reused");
		}
	}

	#[test]
	fn context_matters() {
		init();
		let key = generate_key().unwrap();

		let ciphertext = encrypt_with_context(b"hello, world!", b"context", &key).unwrap();

		let result = decrypt_with_context(&ciphertext, b"a different context", &key);
		assert!(matches!(result, Err(Error::Authentication)));

		let result = decrypt(&ciphertext, &key);
		assert!(matches!(result, Err(Error::Authentication)));

		assert_eq!(
			b"hello, world!".to_vec(),
			decrypt_with_context(&ciphertext, b"context", &key).unwrap()
		);
	}

	#[test]
	fn empty_context_is_unbound() {
		init();
		let key = generate_key().unwrap();

		let ciphertext = encrypt(b"hello, world!", &key).unwrap();

		assert_eq!(
			b"hello, world!".to_vec(),
			decrypt_with_context(&ciphertext, b"", &key).unwrap()
		);
	}

	#[test]
	fn imported_key_is_the_same_key() {
		init();
		let key = generate_key().unwrap();
		let imported = Key::import(secrecy::ExposeSecret::expose_secret(&key.export())).unwrap();

		let one = encrypt(b"forwards", &key).unwrap();
		let two = encrypt(b"backwards", &imported).unwrap();

		assert_eq!(b"forwards".to_vec(), decrypt(&one, &imported).unwrap());
		assert_eq!(b"backwards".to_vec(), decrypt(&two, &key).unwrap());
	}

	#[test]
	fn parallel_submissions() {
		init();

		std::thread::scope(|s| {
			let handles: Vec<_> = (0..8u8)
				.map(|i| {
					s.spawn(move || {
						let key = generate_key().unwrap();
						let plaintext = vec![i; 1024];
						let ciphertext = encrypt(&plaintext, &key).unwrap();
						(plaintext, decrypt(&ciphertext, &key).unwrap())
					})
				})
				.collect();

			for h in handles {
				let (plaintext, decrypted) = h.join().unwrap();
				assert_eq!(plaintext, decrypted);
			}
		});
	}

	#[test]
	fn shared_key_across_threads() {
		init();
		let key = generate_key().unwrap();

		let nonces: HashSet<Nonce> = std::thread::scope(|s| {
			let handles: Vec<_> = (0..4)
				.map(|_| {
					s.spawn(|| {
						(0..250)
							.map(|_| encrypt(b"shared", &key).unwrap().nonce)
							.collect::<Vec<_>>()
					})
				})
				.collect();

			handles
				.into_iter()
				.flat_map(|h| h.join().unwrap())
				.collect()
		});

		assert_eq!(1000, nonces.len());
	}

	#[test]
	fn entropy_failure_reaches_caller() {
		init();
		let key = Key::from(Box::new([5u8; crate::KEY_LEN]));
		let result = encrypt_with_rng(&mut BrokenRng, "nothing to hide", b"", &key);

		assert!(matches!(result, Err(Error::Entropy { .. })));
	}
}
