use secrecy::SecretString;

use super::{Access, Config, Error, Payload, SubmissionRecord, SubmissionStore, open, seal};

/// Takes submissions in, and hands them back out to whoever holds the right key.
///
/// The desk never sees a key except for the duration of a single [`submit`](Self::submit) or
/// [`reveal`](Self::reveal) call.
#[derive(Debug)]
pub struct SubmissionDesk<S> {
	store: S,
	config: Config,
}

impl<S: SubmissionStore> SubmissionDesk<S> {
	pub fn new(store: S, config: Config) -> Self {
		Self { store, config }
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Seal a payload, store the result, and return the key for the sender.
	///
	/// # Errors
	///
	/// Anything [`seal`] or [`SubmissionStore::append`] can fail with.  Nothing is stored on
	/// failure.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn submit(&self, access: &Access, payload: Payload) -> Result<SecretString, Error> {
		let sealed = seal(access, &payload, &self.config)?;
		let id = sealed.record.id().to_string();

		self.store.append(sealed.record)?;
		tracing::debug!(%id, "Stored submission");

		Ok(sealed.key)
	}

	/// All submissions, most recent first.
	pub fn submissions(&self) -> Vec<SubmissionRecord> {
		let mut records = self.store.list();
		records.reverse();
		records
	}

	/// Open the submission `id` with the key its sender was given.
	///
	/// # Errors
	///
	/// [`Error::UnknownSubmission`] if there is no such submission, otherwise anything
	/// [`open`] can fail with.
	#[tracing::instrument(level = "debug", skip(self, encoded_key))]
	pub fn reveal(&self, id: &str, encoded_key: &str) -> Result<Payload, Error> {
		let record = self
			.store
			.get(id)
			.ok_or_else(|| Error::unknown_submission(id))?;

		open(&record, encoded_key, &self.config)
	}
}
