pub mod codec;
pub mod hash;
pub mod net;
pub mod randstr;
pub mod stats;

/// Print `Error: {msg}` and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}
