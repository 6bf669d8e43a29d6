use rand::Rng;

use super::{BlockCipherCodec, Error, Key, Record, RecordSource, unpad};

/// The record-reading side: holds the shared key, and turns fetched ciphertexts back into records.
///
/// Note that whoever answers the fetch sees which index was asked for.  Only the contents of the
/// records are protected, not which one you're interested in.
#[derive(Clone, Debug)]
pub struct RetrievalClient {
	codec: BlockCipherCodec,
}

impl RetrievalClient {
	/// Create a new [`RetrievalClient`] that decrypts with `key`.
	#[tracing::instrument(level = "debug", skip(key))]
	pub fn new(key: &Key) -> Self {
		Self {
			codec: BlockCipherCodec::from(key),
		}
	}

	/// Fetch the record at `index` from `source`, and decrypt it.
	///
	/// # Errors
	///
	/// Will return one of the following:
	/// * Whatever [`RecordSource::fetch`] returned, if the fetch failed.
	/// * [`Error::Padding`] if the decrypted ciphertext wasn't validly padded.  This almost always
	///   means the source's records were encrypted with a different key.
	/// * [`Error::Decoding`] if the unpadded plaintext isn't a valid `R`, which also usually means
	///   a different key, or that the ciphertext was tampered with.
	#[tracing::instrument(level = "debug", skip(self, source))]
	pub fn retrieve<R: Record>(&self, source: &impl RecordSource, index: i64) -> Result<R, Error> {
		let ciphertext = source.fetch(index)?;
		let padded = self.codec.decrypt(&ciphertext)?;
		let plaintext = unpad(&padded).inspect_err(|_| {
			tracing::debug!(index, "Padding check failed");
		})?;

		R::decode(plaintext)
	}

	/// Pick an index in `0..len` at random, and [`retrieve`](Self::retrieve) it.
	///
	/// The randomness here is purely for the caller's convenience; the source still sees exactly
	/// which index was chosen.
	///
	/// # Errors
	///
	/// Anything [`retrieve`](Self::retrieve) can return, plus [`Error::IndexOutOfRange`] if
	/// `len` is zero.
	#[tracing::instrument(level = "debug", skip(self, source, rng))]
	pub fn retrieve_random<R: Record>(
		&self,
		source: &impl RecordSource,
		len: usize,
		rng: &mut impl Rng,
	) -> Result<(i64, R), Error> {
		if len == 0 {
			return Err(Error::index_out_of_range(0, len));
		}

		let index = rng.random_range(0..len) as i64;
		tracing::debug!(index, "Chose random index");

		Ok((index, self.retrieve(source, index)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		BLOCK_SIZE, Ciphertext, RecordStore, decrypt, encrypt, generate_key, pad,
		test_util::init,
	};

	const RECORDS: [i64; 10] = [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];

	#[test]
	fn single_record_round_trip() {
		init();

		let key = generate_key();

		let encoded = 500i64.encode();
		assert_eq!(b"500".to_vec(), encoded);

		let padded = pad(&encoded);
		assert_eq!(BLOCK_SIZE, padded.len());

		let ciphertext = encrypt(key.expose_secret(), &padded).unwrap();
		let decrypted = decrypt(key.expose_secret(), &ciphertext).unwrap();
		assert_eq!(padded, decrypted);

		let unpadded = unpad(&decrypted).unwrap();
		assert_eq!(b"500", unpadded);
		assert_eq!(500, i64::decode(unpadded).unwrap());
	}

	#[test]
	fn every_index_retrieves_its_record() {
		init();

		let key = generate_key();
		let store = RecordStore::new(RECORDS, &key).unwrap();
		let client = RetrievalClient::new(&key);

		for _ in 0..3 {
			for (i, expected) in RECORDS.iter().enumerate() {
				assert_eq!(*expected, client.retrieve::<i64>(&store, i as i64).unwrap());
			}
		}
	}

	#[test]
	fn fetch_errors_pass_straight_through() {
		init();

		let key = generate_key();
		let store = RecordStore::new(RECORDS, &key).unwrap();
		let client = RetrievalClient::new(&key);

		let result = client.retrieve::<i64>(&store, -1);
		assert!(matches!(result, Err(Error::IndexOutOfRange { index: -1, len: 10 })));

		let result = client.retrieve::<i64>(&store, 10);
		assert!(matches!(result, Err(Error::IndexOutOfRange { index: 10, len: 10 })));

		assert_eq!(1000, client.retrieve::<i64>(&store, 9).unwrap());
	}

	#[test]
	fn wrong_key_never_yields_a_record() {
		init();

		let store = RecordStore::new(RECORDS, &generate_key()).unwrap();
		let ciphertext = store.fetch(4).unwrap();

		let mut rejected = 0;

		for _ in 0..2000 {
			let wrong_client = RetrievalClient::new(&generate_key());

			match wrong_client.retrieve::<i64>(&store, 4) {
				Err(Error::Padding | Error::Decoding(_)) => rejected += 1,
				Err(e) => panic!("unexpected error {e:?}"),
				Ok(v) => assert_ne!(500, v, "wrong key recovered the real record"),
			}

			// And the same thing the long way around
			let padded = decrypt(generate_key().expose_secret(), &ciphertext).unwrap();
			if let Ok(plaintext) = unpad(&padded) {
				assert_ne!(b"500", plaintext);
			}
		}

		// A wrong key passes the padding check about one time in 256, but then has to decrypt to
		// fifteen decimal digits as well, which doesn't happen
		assert_eq!(2000, rejected);
	}

	#[test]
	fn tampered_ciphertext_is_rejected() {
		init();

		let key = generate_key();
		let store = RecordStore::new(RECORDS, &key).unwrap();
		let client = RetrievalClient::new(&key);

		let mut bytes = store.fetch(0).unwrap().into_bytes();
		bytes[0] ^= 0x01;
		let tampered = Ciphertext::from(bytes);

		let result = client.retrieve::<i64>(&SingleCiphertext(tampered), 0);
		assert!(matches!(result, Err(Error::Padding | Error::Decoding(_))));
	}

	#[test]
	fn misaligned_ciphertext_is_rejected() {
		init();

		let client = RetrievalClient::new(&generate_key());

		let result = client.retrieve::<i64>(&SingleCiphertext(vec![0u8; 15].into()), 0);
		assert!(matches!(result, Err(Error::InvalidLength { len: 15, .. })));
	}

	#[test]
	fn random_retrieval() {
		init();

		let key = generate_key();
		let store = RecordStore::new(RECORDS, &key).unwrap();
		let client = RetrievalClient::new(&key);
		let mut rng = rand::rng();

		for _ in 0..50 {
			let (index, value) = client
				.retrieve_random::<i64>(&store, store.len(), &mut rng)
				.unwrap();

			assert!((0..10).contains(&index));
			assert_eq!(RECORDS[index as usize], value);
		}
	}

	#[test]
	fn random_retrieval_from_nothing() {
		init();

		let key = generate_key();
		let store = RecordStore::new(Vec::<i64>::new(), &key).unwrap();
		let client = RetrievalClient::new(&key);

		let result = client.retrieve_random::<i64>(&store, store.len(), &mut rand::rng());
		assert!(matches!(result, Err(Error::IndexOutOfRange { len: 0, .. })));
	}

	#[test]
	fn shared_between_threads() {
		init();

		let key = generate_key();
		let store = RecordStore::new(RECORDS, &key).unwrap();

		std::thread::scope(|s| {
			for t in 0..4 {
				let store = &store;
				let client = RetrievalClient::new(&key);

				s.spawn(move || {
					for i in (t..10).step_by(4) {
						assert_eq!(RECORDS[i], client.retrieve::<i64>(store, i as i64).unwrap());
					}
				});
			}
		});
	}

	struct SingleCiphertext(Ciphertext);

	impl RecordSource for SingleCiphertext {
		fn fetch(&self, _index: i64) -> Result<Ciphertext, Error> {
			Ok(self.0.clone())
		}
	}
}
