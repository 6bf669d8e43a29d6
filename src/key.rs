use secrecy::ExposeSecret as _;

use super::Error;

/// Length, in bytes, of a [`Key`].
pub const KEY_SIZE: usize = 16;

/// The symmetric key shared between a [`RecordStore`](super::RecordStore) and the
/// [`RetrievalClient`](super::RetrievalClient)s that read from it.
#[derive(Debug)]
pub struct Key(secrecy::SecretBox<[u8; KEY_SIZE]>);

impl Key {
	pub fn expose_secret(&self) -> &[u8; KEY_SIZE] {
		self.0.expose_secret()
	}
}

impl Clone for Key {
	fn clone(&self) -> Self {
		Self(Box::new(*self.expose_secret()).into())
	}
}

impl From<Box<[u8; KEY_SIZE]>> for Key {
	fn from(k: Box<[u8; KEY_SIZE]>) -> Self {
		Key(k.into())
	}
}

impl From<[u8; KEY_SIZE]> for Key {
	fn from(k: [u8; KEY_SIZE]) -> Self {
		Box::new(k).into()
	}
}

impl TryFrom<&[u8]> for Key {
	type Error = Error;

	fn try_from(k: &[u8]) -> Result<Self, Error> {
		let k: [u8; KEY_SIZE] = k.try_into().map_err(|_| {
			Error::invalid_key(format!(
				"expected {KEY_SIZE} bytes of key material, got {}",
				k.len()
			))
		})?;

		Ok(k.into())
	}
}

/// Create a fresh random key.
///
/// The key is drawn from the thread-local CSPRNG, which is seeded from the operating system.
/// There is no persisted key format; getting the key to whoever needs to decrypt is the
/// caller's problem.
#[tracing::instrument(level = "debug")]
pub fn generate_key() -> Key {
	use rand::{RngCore, rng};

	let mut k = [0u8; KEY_SIZE];

	rng().fill_bytes(&mut k);

	k.into()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_util::init;

	#[test]
	fn generated_keys_differ() {
		init();

		assert_ne!(generate_key().expose_secret(), generate_key().expose_secret());
	}

	#[test]
	fn short_key_material_is_rejected() {
		init();

		let result = Key::try_from(&[0u8; 15][..]);
		assert!(matches!(result, Err(Error::InvalidKey(_))));

		let result = Key::try_from(&[0u8; 32][..]);
		assert!(matches!(result, Err(Error::InvalidKey(_))));
	}

	#[test]
	fn key_material_round_trips() {
		init();

		let bytes: Vec<u8> = (0u8..16).collect();
		let key = Key::try_from(&bytes[..]).expect("valid key rejected");

		assert_eq!(&bytes[..], &key.expose_secret()[..]);
	}

	#[test]
	fn debug_does_not_reveal_key() {
		init();

		let key = Key::from([0x42u8; KEY_SIZE]);

		assert!(!format!("{key:?}").contains("42"));
		assert!(!format!("{key:?}").contains("66"));
	}
}
