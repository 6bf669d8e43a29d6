//! A store of individually-encrypted records, readable one position at a time by anyone holding
//! the key.
//!
//! The record holder builds a [`RecordStore`] from a list of records and a shared [`Key`].  Each
//! record is encoded, padded out to the cipher's block size, and encrypted, all up front.  From
//! then on, the store will hand out the ciphertext at any position it's asked for, and a
//! [`RetrievalClient`] holding the same key can turn that ciphertext back into the record.
//!
//! ```rust
//! use sealed_records::{Error, RecordStore, RetrievalClient};
//! # fn main() -> Result<(), Error> {
//!
//! let key = sealed_records::generate_key();
//!
//! let store = RecordStore::new([100, 200, 300, 400, 500, 600, 700, 800, 900, 1000], &key)?;
//! let client = RetrievalClient::new(&key);
//!
//! assert_eq!(700, client.retrieve::<i64>(&store, 6)?);
//!
//! // A client with some other key gets nowhere
//! let nosy = RetrievalClient::new(&sealed_records::generate_key());
//! let result = nosy.retrieve::<i64>(&store, 6);
//! assert!(matches!(result, Err(Error::Padding | Error::Decoding(_))));
//! # Ok(())
//! # }
//! ```
//!
//! # Things This Does Not Do
//!
//! This is a *toy*.  In particular:
//!
//! * Records are encrypted with AES-128, one block at a time, with no IV and no chaining.  Equal
//!   records have equal ciphertexts, and equal 16-byte chunks of records have equal ciphertext
//!   blocks.  There's no integrity protection either.  See [`BlockCipherCodec`] for the gory
//!   details.
//!
//! * Whoever holds the [`RecordStore`] sees which position every request is for.  Despite
//!   appearances, this is *not* private information retrieval; only the record contents are
//!   hidden.
//!
//! * Getting the key from the record holder to the record readers is left as an exercise for the
//!   reader.
//!
//! # Fetching From Afar
//!
//! A [`RetrievalClient`] will read from anything that implements [`RecordSource`].  If the
//! [`RecordStore`] lives somewhere else, the store can encode its answers with
//! [`RecordStore::respond`], and a [`RemoteRecordSource`] on the other end will turn them back
//! into ciphertexts (or errors).  Transport failures come out as [`Error::Retrieval`], so they
//! can't be confused with asking for a record that doesn't exist.
mod ciphertext;
mod client;
mod codec;
mod error;
mod padding;
mod record;
mod record_source;
mod record_store;
mod remote;
mod response;

pub use ciphertext::Ciphertext;
pub use client::RetrievalClient;
pub use codec::{BlockCipherCodec, decrypt, encrypt};
pub use error::Error;
pub use padding::{BLOCK_SIZE, pad, unpad};
pub use record::Record;
pub use record_source::RecordSource;
pub use record_store::RecordStore;
pub use remote::RemoteRecordSource;

mod key;
mod key_id;

pub use key::{KEY_SIZE, Key, generate_key};
use key_id::{KeyId, key_id};

#[cfg(test)]
mod test_util;
