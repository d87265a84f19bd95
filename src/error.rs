#[derive(Debug, thiserror::Error, thiserror_ext::Construct)]
#[non_exhaustive]
pub enum Error {
	#[error("system randomness unavailable: {reason}")]
	Entropy { reason: String },

	#[error("failed to decode {element}: {reason}")]
	Decoding { element: String, reason: String },

	/// The ciphertext did not verify.  A wrong key and altered data both end up here.
	#[error("failed to decrypt ciphertext")]
	Authentication,

	#[error("failed to encrypt plaintext")]
	Encryption,

	#[error("decrypted payload is malformed: {0}")]
	Serialization(#[source] serde_json::Error),

	#[error("required field {field} is empty")]
	MissingField { field: String },

	#[error("password must be at least {min_length} characters long")]
	WeakPassword { min_length: usize },

	#[error("incorrect password")]
	AccessDenied,

	#[error("a submission with id {id} already exists")]
	DuplicateSubmission { id: String },

	#[error("no submission with id {id}")]
	UnknownSubmission { id: String },
}
