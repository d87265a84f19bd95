use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{
	Access, Ciphertext, Config, Error, Key, Nonce, Payload, cipher, encoding, generate_key,
};

/// One stored submission: an id, and the ciphertext and nonce that belong to it.
///
/// Records are written once and never changed.  Serialized, a record is the object
/// `{"id": ..., "encryptedData": ..., "iv": ...}`, with the ciphertext (tag included) and the
/// nonce in standard base64.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRecord", into = "WireRecord")]
pub struct SubmissionRecord {
	id: String,
	ciphertext: Ciphertext,
}

impl SubmissionRecord {
	pub fn new(id: impl Into<String>, ciphertext: Ciphertext) -> Self {
		Self {
			id: id.into(),
			ciphertext,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn ciphertext(&self) -> &Ciphertext {
		&self.ciphertext
	}

	/// Rebuild a record from its stored text fields.
	///
	/// # Errors
	///
	/// [`Error::Decoding`] if `encrypted_data` is not valid base64, or `iv` is not valid base64
	/// of exactly [`NONCE_LEN`](super::NONCE_LEN) bytes.
	pub fn from_wire(
		id: impl Into<String>,
		encrypted_data: &str,
		iv: &str,
	) -> Result<Self, Error> {
		let nonce = Nonce::from_base64(iv)?;
		let ciphertext = encoding::decode("encryptedData", encrypted_data)?;

		Ok(Self::new(id, Ciphertext::new(nonce, ciphertext)))
	}
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRecord {
	id: String,
	encrypted_data: String,
	iv: String,
}

impl From<SubmissionRecord> for WireRecord {
	fn from(r: SubmissionRecord) -> Self {
		Self {
			encrypted_data: encoding::encode(&r.ciphertext.ciphertext),
			iv: r.ciphertext.nonce.to_base64(),
			id: r.id,
		}
	}
}

impl TryFrom<WireRecord> for SubmissionRecord {
	type Error = Error;

	fn try_from(w: WireRecord) -> Result<Self, Error> {
		Self::from_wire(w.id, &w.encrypted_data, &w.iv)
	}
}

/// A freshly sealed submission.
///
/// `record` is what gets stored.  `key` is the only way to ever read it again: show it to
/// the sender once, and then let it go.
#[derive(Debug)]
pub struct Sealed {
	pub record: SubmissionRecord,
	pub key: SecretString,
}

/// Encrypt a payload under a brand new key.
///
/// The key never outlives this call in any form other than the returned text.
///
/// # Example
///
/// ```rust
/// use secrecy::ExposeSecret as _;
/// use sealed_drop::{Config, PasswordGate, Payload};
/// # fn main() -> Result<(), sealed_drop::Error> {
/// let config = Config::default();
/// let gate = PasswordGate::new("open sesame", &config)?;
///
/// let access = gate.check("open sesame")?;
/// let payload = Payload::new("Alice", "hello", None);
/// let sealed = sealed_drop::seal(&access, &payload, &config)?;
///
/// // ... store sealed.record, show sealed.key to the sender ...
///
/// let opened = sealed_drop::open(&sealed.record, sealed.key.expose_secret(), &config)?;
/// assert_eq!(payload, opened);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`Error::MissingField`] for an incomplete payload, [`Error::Entropy`] if no key or nonce
/// could be generated, or [`Error::Encryption`] / [`Error::Serialization`] if the payload
/// cannot be turned into a ciphertext.
#[tracing::instrument(level = "debug", skip_all)]
pub fn seal(_access: &Access, payload: &Payload, config: &Config) -> Result<Sealed, Error> {
	payload.validate(config)?;

	let id = Uuid::new_v4().to_string();
	let plaintext = Zeroizing::new(payload.to_bytes()?);

	let key = generate_key()?;
	let ciphertext = cipher::encrypt_with_context(
		plaintext.as_slice(),
		config.record_binding.context(&id),
		&key,
	)?;
	let exported = key.export();
	drop(key);

	tracing::debug!(%id, binding = ?config.record_binding, "Sealed submission");

	Ok(Sealed {
		record: SubmissionRecord::new(id, ciphertext),
		key: exported,
	})
}

/// Decrypt and parse a stored submission with the key its sender was given.
///
/// # Errors
///
/// * [`Error::Decoding`] if `encoded_key` is not a well-formed key.
/// * [`Error::Authentication`] if the key is not the record's key, or the record has been
///   altered.
/// * [`Error::Serialization`] if the record decrypts, but not to a payload.
#[tracing::instrument(level = "debug", skip(record, encoded_key), fields(id = record.id()))]
pub fn open(
	record: &SubmissionRecord,
	encoded_key: &str,
	config: &Config,
) -> Result<Payload, Error> {
	let key = Key::import(encoded_key)?;
	let plaintext = Zeroizing::new(cipher::decrypt_with_context(
		record.ciphertext(),
		config.record_binding.context(record.id()),
		&key,
	)?);

	Payload::from_bytes(&plaintext)
}
