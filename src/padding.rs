//! Reversible block padding.
//!
//! Every pad byte holds the number of pad bytes added, and at least one byte is always added,
//! so input that is already block-aligned gains a whole extra block.  This is the same scheme as
//! PKCS#7.

use super::Error;

/// Size, in bytes, of a single cipher block.
pub const BLOCK_SIZE: usize = 16;

/// Pad `data` out to the next multiple of [`BLOCK_SIZE`].
///
/// The output is always strictly longer than the input.
pub fn pad(data: impl AsRef<[u8]>) -> Vec<u8> {
	let data = data.as_ref();
	let n = BLOCK_SIZE - (data.len() % BLOCK_SIZE);

	let mut padded = Vec::with_capacity(data.len() + n);
	padded.extend_from_slice(data);
	padded.resize(data.len() + n, n as u8);

	padded
}

/// Strip padding previously added by [`pad`].
///
/// # Errors
///
/// Returns [`Error::Padding`] if `data` is empty, not block aligned, or doesn't end in a valid run
/// of padding bytes.  Decrypting with the wrong key almost always ends up here.  The error
/// deliberately says nothing about *what* was wrong with the padding.
pub fn unpad(data: &[u8]) -> Result<&[u8], Error> {
	if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
		return Err(Error::Padding);
	}

	let tail: &[u8; BLOCK_SIZE] = data[data.len() - BLOCK_SIZE..]
		.try_into()
		.map_err(|_| Error::Padding)?;
	let last = tail[BLOCK_SIZE - 1];
	let n = last as usize;
	let in_range = (1..=BLOCK_SIZE).contains(&n);

	// Bytes before the padding are compared against themselves, so the whole final block is
	// always examined no matter where (or whether) a bad byte turns up
	let pad_start = BLOCK_SIZE - n.min(BLOCK_SIZE);
	let mut expected = *tail;
	for b in &mut expected[pad_start..] {
		*b = last;
	}

	if in_range & constant_time_eq::constant_time_eq_n(&expected, tail) {
		Ok(&data[..data.len() - n])
	} else {
		Err(Error::Padding)
	}
}
