use parking_lot::RwLock;

use super::{Error, SubmissionRecord, submission::WireRecord};

/// Somewhere to keep [`SubmissionRecord`]s.
///
/// Stores are append-only: a record, once added, is returned unchanged for as long as the
/// store keeps it.
pub trait SubmissionStore {
	/// Add a new record.
	///
	/// # Errors
	///
	/// [`Error::DuplicateSubmission`] if a record with the same id is already stored.
	fn append(&self, record: SubmissionRecord) -> Result<(), Error>;

	fn get(&self, id: &str) -> Option<SubmissionRecord>;

	/// Every stored record, oldest first.
	fn list(&self) -> Vec<SubmissionRecord>;
}

/// A [`SubmissionStore`] that lives in memory, and can be saved to (and loaded from) a JSON
/// array of records.
#[derive(Debug, Default)]
pub struct MemoryStore {
	records: RwLock<Vec<SubmissionRecord>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Load a store from the JSON produced by [`MemoryStore::to_json`].
	///
	/// # Errors
	///
	/// * [`Error::Serialization`] if the JSON is not an array of `{id, encryptedData, iv}`
	///   objects.
	/// * [`Error::Decoding`] if a record's `encryptedData` or `iv` does not decode.
	/// * [`Error::DuplicateSubmission`] if an id appears twice.
	#[tracing::instrument(level = "debug", skip(json))]
	pub fn from_json(json: &str) -> Result<Self, Error> {
		let records: Vec<WireRecord> = serde_json::from_str(json).map_err(Error::Serialization)?;

		let store = Self::new();
		for record in records {
			store.append(record.try_into()?)?;
		}
		tracing::debug!(count = store.len(), "Loaded submissions");

		Ok(store)
	}

	pub fn to_json(&self) -> Result<String, Error> {
		serde_json::to_string(&*self.records.read()).map_err(Error::Serialization)
	}

	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}
}

impl SubmissionStore for MemoryStore {
	#[tracing::instrument(level = "debug", skip(self, record), fields(id = record.id()))]
	fn append(&self, record: SubmissionRecord) -> Result<(), Error> {
		let mut records = self.records.write();

		if records.iter().any(|r| r.id() == record.id()) {
			return Err(Error::duplicate_submission(record.id()));
		}

		records.push(record);
		Ok(())
	}

	fn get(&self, id: &str) -> Option<SubmissionRecord> {
		self.records.read().iter().find(|r| r.id() == id).cloned()
	}

	fn list(&self) -> Vec<SubmissionRecord> {
		self.records.read().clone()
	}
}
