//! Check bookkeeping and golden-file handling

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use imlab_core::Pix;
use imlab_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Relative tolerance for numeric cells of tab-separated artifacts
const TABLE_TOLERANCE: f64 = 1e-6;

/// What happens to written artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Overwrite golden files with this run's artifacts
    Generate,
    /// Check artifacts against golden files
    #[default]
    Compare,
    /// Only write artifacts
    Display,
}

impl RegTestMode {
    /// Mode named by `REGTEST_MODE`.
    pub fn from_env() -> Self {
        std::env::var("REGTEST_MODE")
            .map(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    /// Case-insensitive parse; unknown names fall back to `Compare`.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("generate") {
            Self::Generate
        } else if value.eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Compare
        }
    }
}

/// State of one regression test
///
/// Every check bumps a 1-based index that also numbers the artifacts, so
/// the order of checks inside a test must stay stable.
pub struct RegParams {
    name: String,
    mode: RegTestMode,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test; the mode comes from the environment.
    pub fn new(name: &str) -> Self {
        let mode = RegTestMode::from_env();
        for dir in [golden_dir(), regout_dir()] {
            let _ = fs::create_dir_all(dir);
        }
        eprintln!("==== {}_reg ({:?}) ====", name, mode);
        Self {
            name: name.to_string(),
            mode,
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether artifacts are written without being checked
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// True while no check has failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Messages of the failed checks
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn next(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    fn record(&mut self, what: &str, detail: String) -> bool {
        let msg = format!("{}_reg check {} ({}): {}", self.name, self.index, what, detail);
        eprintln!("{}", msg);
        self.failures.push(msg);
        false
    }

    /// Check `|expected - actual| <= delta`; NaN always fails.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next();
        let diff = (expected - actual).abs();
        if diff <= delta {
            return true;
        }
        self.record(
            "value",
            format!(
                "expected {}, got {} (diff {}, allowed {})",
                expected, actual, diff, delta
            ),
        )
    }

    /// Check that two images have the same geometry, layout and samples.
    pub fn compare_pix(&mut self, expected: &Pix, actual: &Pix) -> bool {
        self.next();
        let shape = |p: &Pix| (p.width(), p.height(), p.channels().count());
        if shape(expected) != shape(actual) {
            return self.record(
                "pix",
                format!("shape {:?} vs {:?}", shape(expected), shape(actual)),
            );
        }
        let first_diff = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b);
        match first_diff {
            None => true,
            Some(offset) => {
                let pixel = offset / expected.channels().count() as usize;
                let w = expected.width() as usize;
                let detail = format!("first difference at ({}, {})", pixel % w, pixel / w);
                self.record("pix", detail)
            }
        }
    }

    /// Check two byte strings for equality.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.next();
        if expected == actual {
            return true;
        }
        let at = expected
            .iter()
            .zip(actual)
            .position(|(a, b)| a != b)
            .unwrap_or(expected.len().min(actual.len()));
        self.record(
            "bytes",
            format!(
                "lengths {} and {}, first difference at byte {}",
                expected.len(),
                actual.len(),
                at
            ),
        )
    }

    /// Encode `pix` into the output directory and check it against its
    /// golden copy. Lossless formats are compared by decoded samples.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        let path = self.artifact_path(format.extension());
        imlab_io::write_image(pix, &path, format).map_err(|source| TestError::ImageWrite {
            path: path.clone(),
            source,
        })?;
        self.check_artifact(&path)
    }

    /// Write raw bytes with extension `ext` into the output directory and
    /// check them against their golden copy. `tsv` artifacts are compared
    /// cell by cell with a small tolerance on numbers.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        let path = self.artifact_path(ext);
        fs::write(&path, data)?;
        self.check_artifact(&path)
    }

    fn artifact_path(&mut self, ext: &str) -> String {
        let index = self.next();
        format!("{}/{}.{:02}.{}", regout_dir(), self.name, index, ext)
    }

    fn check_artifact(&mut self, local: &str) -> TestResult<()> {
        let ext = Path::new(local)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let golden = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Display => {}
            RegTestMode::Generate => {
                fs::copy(local, &golden)?;
                eprintln!("wrote {}", golden);
            }
            RegTestMode::Compare if !Path::new(&golden).exists() => {
                fs::copy(local, &golden)?;
                eprintln!("no golden file yet, created {}", golden);
            }
            RegTestMode::Compare => {
                let ours = fs::read(local)?;
                let theirs = fs::read(&golden)?;
                let same = ours == theirs
                    || match ext {
                        "tsv" => tables_match(&ours, &theirs),
                        _ => images_match(local, &golden),
                    };
                if !same {
                    self.record("artifact", format!("{} differs from {}", local, golden));
                }
            }
        }
        Ok(())
    }

    /// Print a summary and report whether every check passed.
    pub fn cleanup(self) -> bool {
        if self.failures.is_empty() {
            eprintln!("{}_reg: {} checks passed", self.name, self.index);
            return true;
        }
        eprintln!(
            "{}_reg: {} of {} checks failed",
            self.name,
            self.failures.len(),
            self.index
        );
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        false
    }
}

/// Decode both files and compare samples; undecodable files never match.
fn images_match(a: &str, b: &str) -> bool {
    match (imlab_io::read_image(a), imlab_io::read_image(b)) {
        (Ok(pa), Ok(pb)) => {
            pa.sizes_equal(&pb) && pa.channels() == pb.channels() && pa.data() == pb.data()
        }
        _ => false,
    }
}

/// Compare two tab-separated tables; numeric cells may differ by a
/// relative [`TABLE_TOLERANCE`], text cells must be identical.
fn tables_match(a: &[u8], b: &[u8]) -> bool {
    let (Ok(a), Ok(b)) = (std::str::from_utf8(a), std::str::from_utf8(b)) else {
        return false;
    };
    let (rows_a, rows_b): (Vec<&str>, Vec<&str>) = (a.lines().collect(), b.lines().collect());
    rows_a.len() == rows_b.len()
        && rows_a.iter().zip(&rows_b).all(|(ra, rb)| {
            let ca: Vec<&str> = ra.split('\t').collect();
            let cb: Vec<&str> = rb.split('\t').collect();
            ca.len() == cb.len() && ca.iter().zip(&cb).all(|(x, y)| cells_match(x, y))
        })
}

fn cells_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => (x - y).abs() <= TABLE_TOLERANCE * x.abs().max(y.abs()).max(1.0),
        _ => false,
    }
}
