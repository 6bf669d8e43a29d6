use super::BLOCK_SIZE;

/// An encrypted record, exactly as long as the padded plaintext it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.0
	}

	#[allow(clippy::len_without_is_empty)] // a ciphertext is never empty
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// The individual cipher blocks, in order.
	///
	/// Handy for seeing just how much the lack of chaining gives away.
	pub fn blocks(&self) -> impl Iterator<Item = &[u8]> {
		self.0.chunks(BLOCK_SIZE)
	}
}

impl From<Vec<u8>> for Ciphertext {
	fn from(v: Vec<u8>) -> Self {
		Self(v)
	}
}

impl AsRef<[u8]> for Ciphertext {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl std::fmt::Display for Ciphertext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for b in &self.0 {
			f.write_fmt(format_args!("{b:02x}"))?;
		}

		Ok(())
	}
}
