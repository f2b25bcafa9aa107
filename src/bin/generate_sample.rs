//! Writes synthetic benchmark result CSVs shaped like the dot-product
//! compression experiments: right-aligned width-padded cells, one row per
//! compression configuration plus the IEEE `double`/`float` reference rows.

use std::fmt::Write as _;
use std::fs;

const HEADER_NAME: &str = "Compression technique";
const HEADER_ERROR: &str = "Absolute error";
const HEADER_RATIO: &str = "Compression ratio";
const PRECISION_DIGITS: usize = 6;

/// Minimal deterministic PRNG (splitmix64).
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Column width used by the benchmark harness: wide enough for the header
/// and for scientific notation with `PRECISION_DIGITS` digits.
fn width(header: &str) -> usize {
    header.len().max(2 + PRECISION_DIGITS + 4) + 1
}

/// `8.123456e-04` style, with a signed two-digit exponent as in C locales.
fn sci(value: f64) -> String {
    let precision = PRECISION_DIGITS;
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

fn print_line(out: &mut String, name: &str, error: &str, ratio: &str) {
    let (w0, w1, w2) = (width(HEADER_NAME), width(HEADER_ERROR), width(HEADER_RATIO));
    writeln!(out, "{name:>w0$};{error:>w1$};{ratio:>w2$}").unwrap();
}

/// One results file: a row per technique and error bound, then the IEEE
/// reference rows. `ratio_scales` tunes how well each technique compresses.
fn render_results(seed: u64, ratio_scales: [f64; 2], double_error: f64) -> String {
    let mut rng = SplitMix64::new(seed);
    let bounds = [1e-1, 1e-2, 1e-3, 1e-4, 1e-5];
    let techniques = [("sz3_1", ratio_scales[0]), ("zfp_1", ratio_scales[1])];

    let mut out = String::new();
    print_line(&mut out, HEADER_NAME, HEADER_ERROR, HEADER_RATIO);

    for (prefix, ratio_scale) in techniques {
        for bound in bounds {
            let error = bound * (0.2 + 0.6 * rng.next_f64());
            let ratio = ratio_scale * bound.powf(0.22) * (0.9 + 0.2 * rng.next_f64());
            let name = format!("{prefix}_{bound}");
            print_line(&mut out, &name, &sci(error), &sci(ratio));
        }
    }
    let float_error = 3.0e-5 * (0.5 + rng.next_f64());
    print_line(&mut out, "double", &sci(double_error), &sci(1.0));
    print_line(&mut out, "float", &sci(float_error), &sci(2.0));
    out
}

fn main() -> anyhow::Result<()> {
    fs::create_dir_all("data")?;
    fs::write("data/sin_results.csv", render_results(42, [48.0, 30.0], 2.1e-13))?;
    fs::write("data/rand_results.csv", render_results(7, [26.0, 18.0], 8.7e-13))?;
    println!("wrote data/sin_results.csv and data/rand_results.csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sci_pads_the_exponent_to_two_signed_digits() {
        assert_eq!(sci(0.0008), "8.000000e-04");
        assert_eq!(sci(12.5), "1.250000e+01");
        assert_eq!(sci(1.0), "1.000000e+00");
    }

    #[test]
    fn cells_are_right_aligned_to_the_header_width() {
        let out = render_results(1, [10.0, 10.0], 1e-13);
        let header = out.lines().next().unwrap();
        assert!(header.ends_with("Compression ratio"));
        for line in out.lines() {
            assert_eq!(line.split(';').count(), 3);
        }
    }

    #[test]
    fn generated_names_carry_the_error_bound() {
        let out = render_results(1, [10.0, 10.0], 1e-13);
        assert!(out.contains("sz3_1_0.1;"));
        assert!(out.contains("zfp_1_0.00001;"));
    }
}
