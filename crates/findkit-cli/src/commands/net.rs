use findkit_core::net::local_ip;

pub fn run() {
    println!("{}", local_ip());
}
