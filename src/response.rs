//! The on-the-wire form of an answer to a fetch request.
//!
//! A response is three magic bytes, followed by a CBOR array of `[index, len, payload]`, where
//! `payload` is either the ciphertext as a byte string, or `null` if `index` was out of range for
//! a store of `len` records.

use ciborium_ll::{Decoder, Encoder, Header, simple};

use super::{Ciphertext, Error};

const RESPONSE_MAGIC: [u8; 3] = [0xb1, 0xe4, 0x7a];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Response {
	pub(crate) index: i64,
	pub(crate) len: usize,
	pub(crate) ciphertext: Option<Ciphertext>,
}

fn decoding<E: Into<ciborium_ll::Error<std::io::Error>>>(
	element: &'static str,
) -> impl FnOnce(E) -> Error {
	move |e| Error::frame_decoding(element, e.into())
}

impl Response {
	pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, Error> {
		let mut v: Vec<u8> = Vec::new();

		v.extend_from_slice(&RESPONSE_MAGIC);

		let mut enc = Encoder::from(&mut v);
		enc.push(Header::Array(Some(3)))
			.map_err(|e| Error::frame_encoding("array", e))?;

		let index = if self.index < 0 {
			Header::Negative((-1 - self.index) as u64)
		} else {
			Header::Positive(self.index as u64)
		};
		enc.push(index)
			.map_err(|e| Error::frame_encoding("index", e))?;
		enc.push(Header::Positive(self.len as u64))
			.map_err(|e| Error::frame_encoding("len", e))?;

		match &self.ciphertext {
			Some(ct) => enc
				.bytes(ct.as_bytes(), None)
				.map_err(|e| Error::frame_encoding("ciphertext", e))?,
			None => enc
				.push(Header::Simple(simple::NULL))
				.map_err(|e| Error::frame_encoding("ciphertext", e))?,
		}

		Ok(v)
	}
}

impl TryFrom<&[u8]> for Response {
	type Error = Error;

	fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
		if b.len() < RESPONSE_MAGIC.len() + 4 {
			return Err(Error::invalid_frame("too short"));
		}

		if b[0..3] != RESPONSE_MAGIC {
			tracing::debug!(magic=?RESPONSE_MAGIC, actual=?b[0..3]);
			return Err(Error::invalid_frame("incorrect magic"));
		}

		let mut dec = Decoder::from(&b[3..]);

		let Header::Array(Some(3)) = dec.pull().map_err(decoding("array"))? else {
			return Err(Error::invalid_frame("expected array"));
		};

		let index = match dec.pull().map_err(decoding("index"))? {
			Header::Positive(n) => {
				i64::try_from(n).map_err(|_| Error::invalid_frame("index out of bounds"))?
			}
			Header::Negative(n) => i64::try_from(n)
				.map(|n| -1 - n)
				.map_err(|_| Error::invalid_frame("index out of bounds"))?,
			_ => return Err(Error::invalid_frame("expected index")),
		};

		let Header::Positive(len) = dec.pull().map_err(decoding("len"))? else {
			return Err(Error::invalid_frame("expected len"));
		};
		let len = usize::try_from(len).map_err(|_| Error::invalid_frame("len out of bounds"))?;

		let ciphertext = match dec.pull().map_err(decoding("ciphertext header"))? {
			Header::Simple(simple::NULL) => None,
			Header::Bytes(n) => {
				// CBOR's great, until you have to deal with segmented bytestrings...
				let mut segments = dec.bytes(n);
				let mut buf = [0u8; 1024];
				let mut ciphertext: Vec<u8> = Vec::new();

				while let Some(mut segment) = segments.pull().map_err(decoding("ciphertext"))? {
					while let Some(chunk) = segment
						.pull(&mut buf[..])
						.map_err(decoding("ciphertext"))?
					{
						ciphertext.extend_from_slice(chunk);
					}
				}

				Some(ciphertext.into())
			}
			_ => return Err(Error::invalid_frame("expected ciphertext or null")),
		};

		Ok(Self {
			index,
			len,
			ciphertext,
		})
	}
}
