//! Statistical acceptance checks for findkit outputs.
//!
//! Each check returns a [`TestResult`] with a p-value (where applicable), a
//! pass/fail determination, and a letter grade (A through F). They are meant
//! for test suites: feed them generated ids or compressed buffers and assert
//! on `passed`.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::io::Write;

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
    pub grade: char,
}

impl TestResult {
    /// Assign a letter grade based on p-value.
    ///
    /// - A: p >= 0.1
    /// - B: p >= 0.01
    /// - C: p >= 0.001
    /// - D: p >= 0.0001
    /// - F: otherwise or None
    pub fn grade_from_p(p: Option<f64>) -> char {
        match p {
            Some(p) if p >= 0.1 => 'A',
            Some(p) if p >= 0.01 => 'B',
            Some(p) if p >= 0.001 => 'C',
            Some(p) if p >= 0.0001 => 'D',
            _ => 'F',
        }
    }

    /// Determine pass/fail from p-value against a threshold (default 0.01).
    pub fn pass_from_p(p: Option<f64>, threshold: f64) -> bool {
        match p {
            Some(p) => p >= threshold,
            None => false,
        }
    }
}

/// Return a failing `TestResult` when data is too short.
fn insufficient(name: &str, needed: usize, got: usize) -> TestResult {
    failed(name, format!("Insufficient data: need {needed}, got {got}"))
}

fn failed(name: &str, details: String) -> TestResult {
    TestResult {
        name: name.to_string(),
        passed: false,
        p_value: None,
        statistic: 0.0,
        details,
        grade: 'F',
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Frequency
// ═══════════════════════════════════════════════════════════════════════════════

/// Pearson chi-squared of `counts` against a uniform expectation.
///
/// Needs at least two categories and five expected hits per category.
pub fn chi_squared_uniformity(counts: &[u64]) -> TestResult {
    let name = "Chi-Squared Uniformity";
    let k = counts.len();
    let n: u64 = counts.iter().sum();
    if k < 2 {
        return insufficient(name, 2, k);
    }
    let expected = n as f64 / k as f64;
    if expected < 5.0 {
        return insufficient(name, 5 * k, n as usize);
    }
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let Ok(dist) = ChiSquared::new((k - 1) as f64) else {
        return failed(name, format!("no chi-squared distribution for df={}", k - 1));
    };
    let p = dist.sf(chi2);
    TestResult {
        name: name.to_string(),
        passed: TestResult::pass_from_p(Some(p), 0.01),
        p_value: Some(p),
        statistic: chi2,
        details: format!("n={n}, k={k}, expected_per_bin={expected:.1}"),
        grade: TestResult::grade_from_p(Some(p)),
    }
}

/// Chi-squared uniformity of `data` over `alphabet`.
///
/// Fails outright if any byte falls outside `alphabet`.
pub fn symbol_frequency(data: &[u8], alphabet: &[u8]) -> TestResult {
    let name = "Symbol Frequency";
    let mut index = [None; 256];
    for (i, &sym) in alphabet.iter().enumerate() {
        index[sym as usize] = Some(i);
    }
    let mut counts = vec![0u64; alphabet.len()];
    for &b in data {
        match index[b as usize] {
            Some(i) => counts[i] += 1,
            None => return failed(name, format!("byte 0x{b:02x} outside alphabet")),
        }
    }
    TestResult {
        name: name.to_string(),
        ..chi_squared_uniformity(&counts)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compression ratio
// ═══════════════════════════════════════════════════════════════════════════════

/// zlib level-9 ratio of `data`, compared against the ratio an ideal coder
/// would reach for `bits_per_symbol` of entropy per byte.
///
/// Passes when the ratio stays above 90% of that ideal, i.e. zlib found no
/// structure beyond symbol frequency.
pub fn compression_ratio(data: &[u8], bits_per_symbol: f64) -> TestResult {
    let name = "Compression Ratio";
    let n = data.len();
    if n < 32 {
        return insufficient(name, 32, n);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    let compressed = match encoder.write_all(data).and_then(|()| encoder.finish()) {
        Ok(c) => c,
        Err(e) => return failed(name, format!("zlib: {e}")),
    };
    let ratio = compressed.len() as f64 / n as f64;
    let ideal = bits_per_symbol / 8.0;
    let rel = ratio / ideal;
    let grade = if rel > 0.95 {
        'A'
    } else if rel > 0.9 {
        'B'
    } else if rel > 0.75 {
        'C'
    } else if rel > 0.5 {
        'D'
    } else {
        'F'
    };
    TestResult {
        name: name.to_string(),
        passed: rel > 0.9,
        p_value: None,
        statistic: ratio,
        details: format!("{}/{n} = {ratio:.4} (ideal {ideal:.4})", compressed.len()),
        grade,
    }
}

/// Points for a letter grade: A=100, B=75, C=50, D=25, anything else 0.
pub fn grade_points(grade: char) -> f64 {
    match grade {
        'A' => 100.0,
        'B' => 75.0,
        'C' => 50.0,
        'D' => 25.0,
        _ => 0.0,
    }
}

/// Mean [`grade_points`] over a battery of results; `0.0` for an empty battery.
pub fn calculate_quality_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| grade_points(r.grade)).sum::<f64>() / results.len() as f64
}
