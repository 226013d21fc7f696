//! Basic tour of findkit-core.
//!
//! Installs the default log sinks, mints a few ids, round-trips a payload
//! through DEFLATE, and reports the LAN address.
//!
//! Run: `cargo run --example basic`

use findkit_core::{LogConfig, compress, decompress, local_ip, logging, md5_hex, rand_string};

fn main() {
    if let Err(e) = logging::init(LogConfig::default()) {
        eprintln!("logger already installed: {e}");
    }

    for _ in 0..3 {
        println!("id: {}", rand_string(10));
    }

    let payload = br#"{"group":"home","wifi-fingerprint":[{"mac":"aa:bb:cc:dd:ee:ff","rssi":-70}]}"#
        .repeat(8);
    match compress(&payload, 9).and_then(|packed| {
        let plain = decompress(&packed)?;
        Ok((packed.len(), plain))
    }) {
        Ok((packed_len, plain)) => {
            assert_eq!(plain, payload);
            log::info!("{} bytes -> {packed_len} bytes", payload.len());
        }
        Err(e) => log::error!("codec failed: {e}"),
    }

    println!("payload md5: {}", md5_hex(&String::from_utf8_lossy(&payload)));
    println!("lan address: {}", local_ip());
}
