use secrecy::{ExposeSecret as _, SecretBox};
use sha2::{Digest as _, Sha256};

use super::{Config, Error};

/// The local check that stands between an operator and the submission form.
///
/// This is access control for the form, nothing more: it does not feed into any key, and
/// it protects none of the stored data.  What it does do is produce an [`Access`], which
/// creating a submission requires.
///
/// Only a SHA-256 digest of the password is retained.
#[derive(Debug)]
pub struct PasswordGate {
	digest: SecretBox<[u8; 32]>,
}

/// Proof that a [`PasswordGate`] was passed.
///
/// There is no way to make one other than [`PasswordGate::check`].
#[derive(Debug)]
pub struct Access {
	_private: (),
}

impl PasswordGate {
	/// Set up the gate with the password that opens it.
	///
	/// # Errors
	///
	/// [`Error::WeakPassword`] if `password` has fewer than `config.min_password_length`
	/// characters.
	#[tracing::instrument(level = "debug", skip(password))]
	pub fn new(password: impl AsRef<str>, config: &Config) -> Result<Self, Error> {
		let password = password.as_ref();

		if password.chars().count() < config.min_password_length {
			return Err(Error::weak_password(config.min_password_length));
		}

		Ok(Self {
			digest: Box::new(digest(password)).into(),
		})
	}

	/// Check a password attempt.
	///
	/// # Errors
	///
	/// [`Error::AccessDenied`] if `attempt` is not the gate's password.
	#[tracing::instrument(level = "debug", skip(self, attempt))]
	pub fn check(&self, attempt: impl AsRef<str>) -> Result<Access, Error> {
		let attempt = digest(attempt.as_ref());

		if constant_time_eq::constant_time_eq_32(self.digest.expose_secret(), &attempt) {
			Ok(Access { _private: () })
		} else {
			tracing::debug!("Password rejected");
			Err(Error::AccessDenied)
		}
	}
}

fn digest(password: &str) -> [u8; 32] {
	Sha256::digest(password.as_bytes()).into()
}
