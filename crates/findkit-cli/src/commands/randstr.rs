use findkit_core::randstr::{ClockSeededSource, random_string};
use findkit_core::util::TimeTrack;

pub fn run(length: usize, count: usize, seed: Option<u64>) {
    let _t = TimeTrack::new(format!("rand-string x{count}"));
    let mut source = match seed {
        Some(s) => ClockSeededSource::from_seed(s),
        None => ClockSeededSource::new(),
    };
    for _ in 0..count {
        println!("{}", random_string(&mut source, length));
    }
}
