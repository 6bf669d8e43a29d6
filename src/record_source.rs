use super::{Ciphertext, Error};

/// Anything that will hand over the ciphertext at a given position.
///
/// This is the one boundary between the side of the world that holds the records and the side
/// that wants to read them.  A [`RecordStore`](super::RecordStore) is a source in its own right;
/// a [`RemoteRecordSource`](super::RemoteRecordSource) fetches across some transport instead.
pub trait RecordSource {
	/// Fetch the ciphertext stored at `index`.
	///
	/// Fetching the same index from the same source always produces the same ciphertext.
	///
	/// # Errors
	///
	/// Will return one of the following:
	/// * [`Error::IndexOutOfRange`] if `index` is negative, or not less than the number of
	///   records in the source.
	/// * [`Error::Retrieval`] if the source could not be reached.
	/// * [`Error::InvalidFrame`] or [`Error::FrameDecoding`] if the source sent back something
	///   that didn't make sense.
	fn fetch(&self, index: i64) -> Result<Ciphertext, Error>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
	fn fetch(&self, index: i64) -> Result<Ciphertext, Error> {
		(**self).fetch(index)
	}
}

impl<S: RecordSource + ?Sized> RecordSource for std::sync::Arc<S> {
	fn fetch(&self, index: i64) -> Result<Ciphertext, Error> {
		(**self).fetch(index)
	}
}
