use aes::{
	Aes128,
	cipher::{BlockDecrypt as _, BlockEncrypt as _, KeyInit as _, generic_array::GenericArray},
};

use super::{BLOCK_SIZE, Ciphertext, Error, Key, KeyId, key_id};

/// AES-128, applied to each block of the input on its own.
///
/// There is no IV, no nonce, and no chaining: block *i* of the output depends only on block *i*
/// of the input and the key.  That makes encryption deterministic, which the
/// [`RecordStore`](super::RecordStore) relies on, but it also means that **identical plaintext
/// blocks produce identical ciphertext blocks**, wherever they appear.  Anyone who can see the
/// ciphertexts can tell which records (or which parts of records) are equal.  There is also no
/// integrity protection; tampering is only caught if it happens to break the padding or the
/// record encoding.
///
/// Do not use this for anything you care about.  A real system wants an AEAD with a fresh nonce
/// per message.
///
/// # Example
///
/// ```rust
/// use sealed_records::{BlockCipherCodec, Error, generate_key, pad, unpad};
/// # fn main() -> Result<(), Error> {
/// let codec = BlockCipherCodec::new(generate_key().expose_secret())?;
///
/// let ciphertext = codec.encrypt(pad(b"500"))?;
/// assert_eq!(16, ciphertext.len());
///
/// let padded = codec.decrypt(&ciphertext)?;
/// assert_eq!(b"500", unpad(&padded)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BlockCipherCodec {
	cipher: Aes128,
	key_id: KeyId,
}

impl std::fmt::Debug for BlockCipherCodec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		f.debug_struct("BlockCipherCodec")
			.field("key_id", &self.key_id.to_string())
			.finish()
	}
}

impl From<&Key> for BlockCipherCodec {
	fn from(key: &Key) -> Self {
		let key_id = key_id(key);
		tracing::debug!(%key_id, "Creating block cipher codec");

		Self {
			cipher: Aes128::new(key.expose_secret().into()),
			key_id,
		}
	}
}

impl BlockCipherCodec {
	/// Create a codec that encrypts and decrypts under the given key.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidKey`] if the key isn't exactly [`KEY_SIZE`](super::KEY_SIZE) bytes.
	#[tracing::instrument(level = "debug", skip(key))]
	pub fn new(key: impl AsRef<[u8]>) -> Result<Self, Error> {
		Ok(Self::from(&Key::try_from(key.as_ref())?))
	}

	/// Encrypt block-aligned (ie already padded) plaintext.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidLength`] unless the plaintext is a positive multiple of
	/// [`BLOCK_SIZE`] bytes long.
	#[tracing::instrument(level = "trace", skip(plaintext))]
	pub fn encrypt(&self, plaintext: impl AsRef<[u8]>) -> Result<Ciphertext, Error> {
		let mut buf = block_aligned(plaintext.as_ref())?;

		for block in buf.chunks_exact_mut(BLOCK_SIZE) {
			self.cipher.encrypt_block(GenericArray::from_mut_slice(block));
		}

		Ok(Ciphertext::from(buf))
	}

	/// Decrypt a ciphertext back to its padded plaintext.
	///
	/// Decrypting with the wrong key "works", in that it produces a block-aligned pile of
	/// garbage.  Spotting that is the job of [`unpad`](super::unpad) and record decoding.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidLength`] unless the ciphertext is a positive multiple of
	/// [`BLOCK_SIZE`] bytes long.
	#[tracing::instrument(level = "trace", skip(ciphertext))]
	pub fn decrypt(&self, ciphertext: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
		let mut buf = block_aligned(ciphertext.as_ref())?;

		for block in buf.chunks_exact_mut(BLOCK_SIZE) {
			self.cipher.decrypt_block(GenericArray::from_mut_slice(block));
		}

		Ok(buf)
	}
}

fn block_aligned(data: &[u8]) -> Result<Vec<u8>, Error> {
	if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
		tracing::debug!(len = data.len(), "Input is not block aligned");
		return Err(Error::invalid_length(data.len(), BLOCK_SIZE));
	}

	Ok(data.to_vec())
}

/// Encrypt block-aligned plaintext under a raw key, in one shot.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for a key of the wrong length, or [`Error::InvalidLength`] for
/// plaintext that isn't block aligned.
pub fn encrypt(key: impl AsRef<[u8]>, plaintext: impl AsRef<[u8]>) -> Result<Ciphertext, Error> {
	BlockCipherCodec::new(key)?.encrypt(plaintext)
}

/// Decrypt a ciphertext under a raw key, in one shot.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] for a key of the wrong length, or [`Error::InvalidLength`] for
/// a ciphertext that isn't block aligned.
pub fn decrypt(key: impl AsRef<[u8]>, ciphertext: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
	BlockCipherCodec::new(key)?.decrypt(ciphertext)
}
