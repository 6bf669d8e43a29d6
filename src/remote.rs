use std::fmt::Debug;

use super::{Ciphertext, Error, RecordSource, response::Response};

/// A [`RecordSource`] on the far side of some transport.
///
/// The transport is any function that takes an index, gets it to the record holder somehow,
/// and returns the bytes that [`RecordStore::respond`](super::RecordStore::respond) produced for
/// it.  Everything about *how* the bytes travel, including timeouts and cancellation, belongs to
/// the transport; all this does is make sense of what comes back.
///
/// # Example
///
/// ```rust
/// use sealed_records::{Error, RecordStore, RemoteRecordSource, RetrievalClient};
/// # fn main() -> Result<(), Error> {
///
/// let key = sealed_records::generate_key();
/// let store = RecordStore::new([100, 200, 300], &key)?;
///
/// // A "transport" that just calls straight into the store
/// let remote = RemoteRecordSource::new(|index| {
///     store.respond(index).map_err(std::io::Error::other)
/// });
///
/// let client = RetrievalClient::new(&key);
/// assert_eq!(300, client.retrieve::<u32>(&remote, 2)?);
///
/// let result = client.retrieve::<u32>(&remote, 3);
/// assert!(matches!(result, Err(Error::IndexOutOfRange { index: 3, len: 3 })));
/// # Ok(())
/// # }
/// ```
pub struct RemoteRecordSource<T> {
	transport: T,
}

impl<T> Debug for RemoteRecordSource<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		f.debug_struct("RemoteRecordSource").finish_non_exhaustive()
	}
}

impl<T> RemoteRecordSource<T> {
	pub fn new(transport: T) -> Self
	where
		T: Fn(i64) -> std::io::Result<Vec<u8>>,
	{
		Self { transport }
	}
}

impl<T> RecordSource for RemoteRecordSource<T>
where
	T: Fn(i64) -> std::io::Result<Vec<u8>>,
{
	#[tracing::instrument(level = "debug", skip(self))]
	fn fetch(&self, index: i64) -> Result<Ciphertext, Error> {
		let bytes = (self.transport)(index).map_err(|e| {
			tracing::debug!(error=%e, kind=?e.kind(), "Transport failed");
			Error::retrieval(e.to_string())
		})?;

		let response = Response::try_from(&bytes[..])?;

		if response.index != index {
			tracing::debug!(requested = index, received = response.index, "Index mismatch");
			return Err(Error::invalid_frame(format!(
				"asked for index {index}, got a response for {}",
				response.index
			)));
		}

		response
			.ciphertext
			.ok_or_else(|| Error::index_out_of_range(index, response.len))
	}
}
