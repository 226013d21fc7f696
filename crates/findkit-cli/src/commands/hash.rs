use findkit_core::hashing::md5_hex;

pub fn run(text: &str) {
    println!("{}", md5_hex(text));
}
