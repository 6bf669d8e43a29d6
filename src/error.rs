#[derive(Debug, thiserror::Error, thiserror_ext::Construct)]
#[non_exhaustive]
pub enum Error {
	#[error("invalid key: {0}")]
	InvalidKey(String),

	#[error("input of {len} bytes is not a positive multiple of the {block_size}-byte block size")]
	InvalidLength { len: usize, block_size: usize },

	#[error("invalid padding")]
	Padding,

	#[error("failed to decode record: {0}")]
	Decoding(String),

	#[error("index {index} is out of range for a store of {len} records")]
	IndexOutOfRange { index: i64, len: usize },

	#[error("retrieval failed: {0}")]
	Retrieval(String),

	#[error("invalid response frame: {0}")]
	InvalidFrame(String),

	#[error("response frame encoding failure on {element}: {cause}")]
	FrameEncoding {
		element: String,
		cause: std::io::Error,
	},

	#[error("response frame decoding failure on {element}: {cause:?}")]
	FrameDecoding {
		element: String,
		cause: ciborium_ll::Error<std::io::Error>,
	},
}
