//! Content hashing.

use std::fmt::Write;

use md5::{Digest, Md5};

/// Lowercase hex MD5 of `text`. For fingerprints and cache keys, not security.
pub fn md5_hex(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    let mut s = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        // Writing to a String cannot fail.
        let _ = write!(s, "{b:02x}");
    }
    s
}
