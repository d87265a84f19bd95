use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use super::{Config, Error};

/// What a sender actually submits, before it is encrypted.
///
/// On the wire this is a JSON object with the fields `name`, `message`, `signature` and
/// `submittedAt`, in that order.  The signature is whatever opaque text the capturing side
/// produced (typically an image data URL), or `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
	pub name: String,
	pub message: String,
	pub signature: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

impl Payload {
	/// Assemble a payload, stamped with the current time.
	///
	/// Timestamps are kept to millisecond precision.
	pub fn new(
		name: impl Into<String>,
		message: impl Into<String>,
		signature: Option<String>,
	) -> Self {
		Self {
			name: name.into(),
			message: message.into(),
			signature,
			submitted_at: Utc::now().trunc_subsecs(3),
		}
	}

	/// Check that the sender filled in everything that has to be filled in.
	///
	/// # Errors
	///
	/// [`Error::MissingField`] naming the first blank field.  A signature is only required
	/// when `config.require_signature` is set, but one that is present must not be blank.
	pub fn validate(&self, config: &Config) -> Result<(), Error> {
		if self.name.trim().is_empty() {
			return Err(Error::missing_field("name"));
		}

		if self.message.trim().is_empty() {
			return Err(Error::missing_field("message"));
		}

		if self.signature.as_deref().map_or(config.require_signature, |s| s.trim().is_empty()) {
			return Err(Error::missing_field("signature"));
		}

		Ok(())
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
		serde_json::to_vec(self).map_err(Error::Serialization)
	}

	/// Parse decrypted bytes back into a payload.
	///
	/// # Errors
	///
	/// [`Error::Serialization`] if the bytes are not a payload object.
	pub fn from_bytes(b: &[u8]) -> Result<Self, Error> {
		serde_json::from_slice(b).map_err(Error::Serialization)
	}
}
