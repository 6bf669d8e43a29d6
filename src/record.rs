use super::Error;

/// A value that can be kept in a [`RecordStore`](super::RecordStore).
///
/// Encoding must be reversible: `R::decode(&r.encode())` gives back exactly `r`.  Decoding must
/// reject anything that isn't the canonical encoding of some value, so that garbage produced by
/// decrypting with the wrong key isn't mistaken for a real record.
pub trait Record: Sized {
	/// The canonical byte representation of this value.
	fn encode(&self) -> Vec<u8>;

	/// Turn a canonical byte representation back into a value.
	///
	/// # Errors
	///
	/// Returns [`Error::Decoding`] if `bytes` is not the canonical encoding of any value.
	fn decode(bytes: &[u8]) -> Result<Self, Error>;
}

// Integers are stored as their decimal representation
macro_rules! decimal_record {
	($($t:ty),+) => {
		$(
			impl Record for $t {
				fn encode(&self) -> Vec<u8> {
					self.to_string().into_bytes()
				}

				fn decode(bytes: &[u8]) -> Result<Self, Error> {
					decode_decimal(bytes)
				}
			}
		)+
	};
}

decimal_record!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

fn decode_decimal<T>(bytes: &[u8]) -> Result<T, Error>
where
	T: std::str::FromStr + ToString,
	T::Err: std::fmt::Display,
{
	let s = std::str::from_utf8(bytes).map_err(|_| Error::decoding("not UTF-8"))?;
	let value: T = s
		.parse()
		.map_err(|e| Error::decoding(format!("not a decimal integer: {e}")))?;

	// Rules out "+5", "007", "-0" and friends
	if value.to_string() != s {
		return Err(Error::decoding("not a canonical decimal integer"));
	}

	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_util::init;

	#[test]
	fn integers_encode_as_decimal() {
		init();

		assert_eq!(b"500".to_vec(), 500i64.encode());
		assert_eq!(b"-42".to_vec(), (-42i32).encode());
		assert_eq!(b"0".to_vec(), 0u8.encode());
	}

	#[test]
	fn integers_decode() {
		init();

		assert_eq!(500i64, i64::decode(b"500").unwrap());
		assert_eq!(-42i32, i32::decode(b"-42").unwrap());
		assert_eq!(u64::MAX, u64::decode(u64::MAX.to_string().as_bytes()).unwrap());
		assert_eq!(i64::MIN, i64::decode(i64::MIN.to_string().as_bytes()).unwrap());
	}

	#[test]
	fn garbage_is_rejected() {
		init();

		for bad in [&b""[..], b"abc", b"5 ", b" 5", b"5.0", b"\xff\xfe", b"1e3"] {
			let result = i64::decode(bad);
			assert!(matches!(result, Err(Error::Decoding(_))), "{bad:?} decoded");
		}
	}

	#[test]
	fn non_canonical_forms_are_rejected() {
		init();

		for bad in [&b"+5"[..], b"007", b"-0", b"00"] {
			let result = i64::decode(bad);
			assert!(matches!(result, Err(Error::Decoding(_))), "{bad:?} decoded");
		}
	}

	#[test]
	fn out_of_range_values_are_rejected() {
		init();

		assert!(matches!(u8::decode(b"256"), Err(Error::Decoding(_))));
		assert!(matches!(u32::decode(b"-1"), Err(Error::Decoding(_))));
	}
}
