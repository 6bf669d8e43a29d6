use hkdf::Hkdf;
use sha2::Sha256;

use super::Key;

type Kid = [u8; 16];

#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub(super) struct KeyId(Kid);

impl PartialEq for KeyId {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq::constant_time_eq_n(&self.0, &other.0)
	}
}

impl Eq for KeyId {}

impl std::fmt::Display for KeyId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for b in &self.0 {
			f.write_fmt(format_args!("{b:02x}"))?;
		}

		Ok(())
	}
}

/// Get a reasonably-unique, non-secret fingerprint for a key, fit for putting in logs
#[tracing::instrument(level = "trace")]
pub(super) fn key_id(key: &Key) -> KeyId {
	let hk = Hkdf::<Sha256>::new(None, key.expose_secret());

	let mut kid: Kid = Default::default();

	// 16 bytes is far below HKDF-SHA256's 8160 byte output limit
	hk.expand(b"key_id", &mut kid)
		.expect("key_id did not fit in HKDF output");

	KeyId(kid)
}
