//! imlab-test - Golden-file harness for imlab regression tests
//!
//! A regression test creates one [`RegParams`], runs numbered checks
//! against it and finishes with [`RegParams::cleanup`]:
//!
//! ```ignore
//! use imlab_test::RegParams;
//!
//! let mut rp = RegParams::new("threshold");
//! rp.compare_values(128.0, otsu as f64, 0.0);
//! rp.write_pix_and_check(&mask, ImageFormat::Png)?;
//! assert!(rp.cleanup(), "threshold regression test failed");
//! ```
//!
//! Artifacts land in `tests/regout/<name>.<NN>.<ext>` and are checked
//! against `tests/golden/<name>_golden.<NN>.<ext>` at the workspace root.
//! `REGTEST_MODE` selects what happens to them (see [`RegTestMode`]).

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

fn tests_subdir(name: &str) -> String {
    // this crate lives two levels below the workspace root
    format!("{}/../../tests/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Directory of reference artifacts
pub fn golden_dir() -> String {
    tests_subdir("golden")
}

/// Directory of artifacts written by the current run
pub fn regout_dir() -> String {
    tests_subdir("regout")
}
