use super::{
	BlockCipherCodec, Ciphertext, Error, Key, KeyId, Record, RecordSource, key_id, pad,
	response::Response,
};

/// The record-holding side: a fixed list of records, each encrypted on its own.
///
/// All the encryption happens in [`RecordStore::new`], which doesn't hand back a store until
/// every record has been encrypted.  After that the store never changes, so it can be shared
/// between as many readers (and threads) as you like without any locking.
///
/// Encryption is deterministic (see [`BlockCipherCodec`] for why that isn't great): building two
/// stores from the same records and the same key produces exactly the same ciphertexts, and
/// equal records produce equal ciphertexts.
///
/// # Example
///
/// ```rust
/// use sealed_records::{Error, RecordSource, RecordStore, RetrievalClient};
/// # fn main() -> Result<(), Error> {
///
/// let key = sealed_records::generate_key();
///
/// let store = RecordStore::new([100, 200, 300, 400, 500], &key)?;
/// assert_eq!(5, store.len());
///
/// // Whoever holds the store sees only ciphertext
/// let ciphertext = store.fetch(4)?;
/// assert_eq!(16, ciphertext.len());
///
/// // Whoever holds the key can get the record back
/// let client = RetrievalClient::new(&key);
/// assert_eq!(500, client.retrieve::<i32>(&store, 4)?);
///
/// // There's nothing past the end
/// let result = store.fetch(5);
/// assert!(matches!(result, Err(Error::IndexOutOfRange { index: 5, len: 5 })));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RecordStore {
	key_id: KeyId,
	ciphertexts: Vec<Ciphertext>,
}

impl RecordStore {
	/// Encrypt `records`, in order, under `key`.
	///
	/// # Errors
	///
	/// Will return [`Error::InvalidLength`] in the (should-be-impossible) event that a padded
	/// record isn't block aligned.
	#[tracing::instrument(level = "debug", skip(records, key))]
	pub fn new<R: Record>(records: impl IntoIterator<Item = R>, key: &Key) -> Result<Self, Error> {
		let codec = BlockCipherCodec::from(key);
		let key_id = key_id(key);

		let ciphertexts = records
			.into_iter()
			.map(|record| codec.encrypt(pad(record.encode())))
			.collect::<Result<Vec<_>, _>>()?;

		tracing::debug!(%key_id, records = ciphertexts.len(), "Record store built");

		Ok(Self {
			key_id,
			ciphertexts,
		})
	}

	pub fn len(&self) -> usize {
		self.ciphertexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ciphertexts.is_empty()
	}

	/// Produce the encoded response to a fetch for `index`, ready to go over the wire.
	///
	/// Out-of-range requests aren't an error here; they're answered with a response that tells
	/// the requester so, which [`RemoteRecordSource`](super::RemoteRecordSource) turns back into
	/// [`Error::IndexOutOfRange`].
	///
	/// # Errors
	///
	/// Will return [`Error::FrameEncoding`] in the (extremely unlikely) event something goes
	/// horribly wrong.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn respond(&self, index: i64) -> Result<Vec<u8>, Error> {
		Response {
			index,
			len: self.len(),
			ciphertext: self.get(index).cloned(),
		}
		.to_bytes()
	}

	fn get(&self, index: i64) -> Option<&Ciphertext> {
		usize::try_from(index)
			.ok()
			.and_then(|i| self.ciphertexts.get(i))
	}
}

impl RecordSource for RecordStore {
	#[tracing::instrument(level = "debug", skip(self))]
	fn fetch(&self, index: i64) -> Result<Ciphertext, Error> {
		if let Some(ct) = self.get(index) {
			tracing::debug!(key_id=%self.key_id, index, "Fetched ciphertext");
			Ok(ct.clone())
		} else {
			tracing::debug!(index, len = self.len(), "Index out of range");
			Err(Error::index_out_of_range(index, self.len()))
		}
	}
}
