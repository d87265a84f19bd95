//! Write-once, read-with-the-key encrypted submissions.
//!
//! A sender fills in a [`Payload`], and it is encrypted on the spot under a key that has never
//! been used before and will never be used again.  Only the ciphertext and its nonce are
//! stored, in a [`SubmissionRecord`].  The key is handed back exactly once, as a base64
//! string, and it is up to the sender to get it to whoever should read the submission.  With
//! that string, the recipient can [`open`] the record; without it, nobody can.
//!
//! Encryption is AES-256-GCM with a random 96-bit nonce, so a record that has been tampered
//! with, or a key that isn't the right one, fails with [`Error::Authentication`] instead of
//! producing garbage.  The two cases are deliberately indistinguishable.
//!
//! # Layers
//!
//! At the bottom there is the key handling ([`generate_key`], [`Key::export`],
//! [`Key::import`]) and the cipher ([`encrypt`], [`decrypt`], and their `_with_context`
//! variants, which bind associated data).  On top of that, [`seal`] and [`open`] handle a
//! whole submission, and a [`SubmissionDesk`] runs those against a [`SubmissionStore`].
//!
//! Creating a submission requires an [`Access`], which only a [`PasswordGate`] hands out.  The
//! gate is a plain local check on who gets to use the form; it has nothing to do with the
//! encryption, and knowing the password gets you no closer to reading anything.
//!
//! # Binding records
//!
//! By default the ciphertext is not tied to the id of the record it is stored under, which
//! keeps records readable by any plain AES-GCM implementation, but means someone with write
//! access to the store can move one submission's ciphertext under another's id without
//! detection.  Setting [`Config::record_binding`] to [`RecordBinding::RecordId`] binds the id
//! as associated data, and such a swap then fails to open.
mod cipher;
mod config;
mod desk;
mod encoding;
mod error;
mod gate;
mod key;
mod nonce;
mod payload;
mod store;
mod submission;

#[cfg(test)]
mod test_util;

pub use ::secrecy;

pub use cipher::{
	Ciphertext, TAG_LEN, decrypt, decrypt_with_context, encrypt, encrypt_with_context,
};
pub use config::{Config, RecordBinding};
pub use desk::SubmissionDesk;
pub use error::Error;
pub use gate::{Access, PasswordGate};
pub use key::{KEY_LEN, Key, generate_key};
pub use nonce::{NONCE_LEN, Nonce};
pub use payload::Payload;
pub use store::{MemoryStore, SubmissionStore};
pub use submission::{Sealed, SubmissionRecord, open, seal};
