//! Post-run check that every input image has a non-empty output of the same name.
//!
//! The input directory is listed once, filtered by file suffix, and each
//! matching name is looked up under the output directory. The first empty
//! output aborts the scan; missing outputs are only counted.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

pub const DEFAULT_INPUT_DIR: &str = "input_data";
pub const DEFAULT_OUTPUT_DIR: &str = "output_data";
pub const DEFAULT_SUFFIX: &str = ".ppm";

// --- Types ---

/// Where to look and what counts as an input image.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Matched byte-wise against the end of each file name, case-sensitive.
    pub suffix: String,
    /// Emit per-file diagnostics on stderr.
    pub verbose: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            suffix: DEFAULT_SUFFIX.to_string(),
            verbose: false,
        }
    }
}

/// Why a verification did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    NoInputFiles,
    EmptyOutput {
        name: String,
        processed: usize,
        total: usize,
    },
    IncompleteProcessing {
        processed: usize,
        total: usize,
    },
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInputFiles => write!(f, "No input files found."),
            Self::EmptyOutput { name, .. } => write!(f, "Output file {name} is empty."),
            Self::IncompleteProcessing { processed, total } => {
                write!(f, "Processed {processed}/{total} images.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Success { processed: usize },
    Failure(VerifyFailure),
}

impl Verification {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Process exit status: 0 on success, 1 on any verification failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Success { .. } => 0,
            Self::Failure(_) => 1,
        }
    }

    /// `(processed, total)` as far as the scan got.
    pub const fn counts(&self) -> (usize, usize) {
        match self {
            Self::Success { processed } => (*processed, *processed),
            Self::Failure(VerifyFailure::NoInputFiles) => (0, 0),
            Self::Failure(
                VerifyFailure::EmptyOutput {
                    processed, total, ..
                }
                | VerifyFailure::IncompleteProcessing { processed, total },
            ) => (*processed, *total),
        }
    }

    /// The single line printed on stdout.
    pub fn summary_line(&self) -> String {
        match self {
            Self::Success { processed } => {
                format!("SUCCESS: Verified {processed} images processed.")
            }
            Self::Failure(failure) => format!("FAIL: {failure}"),
        }
    }
}

/// Input file names carrying the recognised suffix, in directory-listing order.
#[derive(Debug, Default)]
pub struct InputFileSet {
    names: Vec<OsString>,
}

impl InputFileSet {
    /// List `dir` and keep the entries whose name ends with `suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed or one of its entries
    /// cannot be read.
    pub fn collect(dir: &Path, suffix: &str) -> anyhow::Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read input directory: {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to read input directory: {}", dir.display()))?;
            let name = entry.file_name();
            if has_suffix(&name, suffix) {
                names.push(name);
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.names.iter().map(OsString::as_os_str)
    }
}

fn has_suffix(name: &OsStr, suffix: &str) -> bool {
    name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// Prefix a bare extension (`ppm`) with a dot. Empty and dotted values pass through.
pub fn normalize_suffix(ext: &str) -> String {
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

// --- Entry points ---

/// Verify `input_dir` against `output_dir` using the default `.ppm` suffix.
///
/// # Errors
///
/// Returns an error if the input directory cannot be listed.
pub fn verify(input_dir: &Path, output_dir: &Path) -> anyhow::Result<Verification> {
    verify_with(&VerifyOptions {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        ..VerifyOptions::default()
    })
}

/// Verify using explicit options.
///
/// An output whose metadata cannot be read counts as missing. The first
/// existing zero-byte output stops the scan.
///
/// # Errors
///
/// Returns an error if the input directory cannot be listed.
pub fn verify_with(opts: &VerifyOptions) -> anyhow::Result<Verification> {
    let inputs = InputFileSet::collect(&opts.input_dir, &opts.suffix)?;
    let total = inputs.len();

    if opts.verbose {
        eprintln!(
            "[imgcheck] {total} input file(s) matching *{} in {}",
            opts.suffix,
            opts.input_dir.display()
        );
    }

    if inputs.is_empty() {
        return Ok(Verification::Failure(VerifyFailure::NoInputFiles));
    }

    let mut processed = 0;
    for name in inputs.iter() {
        let candidate = opts.output_dir.join(name);
        let Ok(meta) = fs::metadata(&candidate) else {
            if opts.verbose {
                eprintln!("[imgcheck] missing: {}", candidate.display());
            }
            continue;
        };

        processed += 1;
        if opts.verbose {
            eprintln!(
                "[imgcheck] found: {} ({} bytes)",
                candidate.display(),
                meta.len()
            );
        }

        if meta.len() == 0 {
            return Ok(Verification::Failure(VerifyFailure::EmptyOutput {
                name: name.to_string_lossy().into_owned(),
                processed,
                total,
            }));
        }
    }

    if processed == total {
        Ok(Verification::Success { processed })
    } else {
        Ok(Verification::Failure(
            VerifyFailure::IncompleteProcessing { processed, total },
        ))
    }
}
