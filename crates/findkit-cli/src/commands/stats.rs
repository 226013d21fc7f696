use findkit_core::stats::Summary;

use super::fail;

pub fn run(values: &[f64], json: bool) {
    let summary = Summary::from_values(values);
    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(e),
        }
        return;
    }
    println!("  Count:    {}", summary.count);
    println!("  Mean:     {:.6}", summary.mean);
    println!("  Std dev:  {:.6}", summary.std_dev);
}
