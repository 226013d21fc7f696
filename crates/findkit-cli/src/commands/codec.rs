use std::io::{self, Read, Write};

use findkit_core::codec::{self, CompressionLevel};
use findkit_core::util::TimeTrack;

use super::fail;

pub fn compress(level: u32) {
    let level = CompressionLevel::new(level).unwrap_or_else(|e| fail(e));
    let _t = TimeTrack::new(format!("compress at level {level}"));

    let mut input = Vec::new();
    if let Err(e) = io::stdin().lock().read_to_end(&mut input) {
        fail(format!("reading stdin: {e}"));
    }
    let stdout = io::stdout().lock();
    match codec::compress_to(&input, stdout, level) {
        Ok(mut out) => {
            if let Err(e) = out.flush() {
                fail(format!("writing stdout: {e}"));
            }
            log::info!("compressed {} bytes at level {level}", input.len());
        }
        Err(e) => fail(e),
    }
}

pub fn decompress() {
    let _t = TimeTrack::new("decompress");
    match codec::decompress_from(io::stdin().lock(), io::stdout().lock()) {
        Ok(n) => log::info!("decompressed {n} bytes"),
        Err(e) => fail(e),
    }
}
