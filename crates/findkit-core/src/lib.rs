//! # findkit-core
//!
//! Leaf helpers for a LAN location-tracking service. Nothing in here depends
//! on anything else in here; pick the module you need.
//!
//! ## Quick Start
//!
//! ```
//! use findkit_core::{compress, decompress, rand_string};
//!
//! // 12 uniformly distributed letters
//! let id = rand_string(12);
//! assert_eq!(id.len(), 12);
//!
//! // Raw DEFLATE round trip
//! let packed = compress(b"aaaaaaaaaa", 9).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), b"aaaaaaaaaa");
//! ```
//!
//! ## Modules
//!
//! - [`randstr`]: letter strings from a 63-bit source, six bits at a time,
//!   rejection sampled (never modulo reduced).
//! - [`codec`]: raw DEFLATE compress/decompress with strict truncation checks.
//! - [`logging`]: five per-level sinks behind the `log` facade.
//! - [`net`]: first `192.168.x.x` interface address, else `"localhost"`.
//! - [`hashing`]: hex MD5.
//! - [`stats`]: mean and sample standard deviation.
//! - [`util`]: slice membership and scope timing.
//!
//! Neither [`randstr`] nor [`hashing`] is meant for secrets.

pub mod codec;
pub mod hashing;
pub mod logging;
pub mod net;
pub mod randstr;
pub mod stats;
pub mod util;

pub use codec::{
    CodecError, CompressionLevel, compress, compress_bytes, compress_to, decompress,
    decompress_bytes, decompress_from,
};
pub use hashing::md5_hex;
pub use logging::{LevelRouter, LogConfig, Sink};
pub use net::{FALLBACK_HOST, local_ip, pick_lan_address};
pub use randstr::{BitSource, ClockSeededSource, LETTERS, rand_string, random_string};
pub use stats::{Summary, average64, standard_deviation, standard_deviation64};
pub use util::{TimeTrack, string_in_slice};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
