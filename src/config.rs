/// How a submission's ciphertext is tied to the record it is stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordBinding {
	/// No associated data.  Records can be opened by anything that speaks plain AES-256-GCM,
	/// but a ciphertext/iv pair copied under a different id still opens.
	#[default]
	Unbound,

	/// The record id is bound as associated data, so a ciphertext/iv pair moved to another
	/// record fails authentication.  Both sealing and opening must use this mode.
	RecordId,
}

impl RecordBinding {
	pub(crate) fn context(&self, id: &str) -> Vec<u8> {
		match self {
			RecordBinding::Unbound => Vec::new(),
			RecordBinding::RecordId => {
				let mut ctx: Vec<u8> = b"sealed-drop::record::".to_vec();
				ctx.extend_from_slice(id.as_bytes());
				ctx
			}
		}
	}
}

/// Knobs for the submission lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	pub record_binding: RecordBinding,

	/// Shortest password a [`PasswordGate`](super::PasswordGate) will accept.
	pub min_password_length: usize,

	/// Refuse to seal a payload that has no signature.
	pub require_signature: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			record_binding: RecordBinding::default(),
			min_password_length: 4,
			require_signature: false,
		}
	}
}
