//! Reading goldenfile test cases.
//!
//! A test case is a directory under `tests/goldenfiles/` of the crate being
//! tested. Which files it holds depends on the suite.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// The directory of a named test case, relative to the crate under test.
pub fn directory(testname: &str) -> PathBuf {
    PathBuf::from("tests/goldenfiles").join(testname)
}

pub fn read_text(directory: &Path, file: &str) -> anyhow::Result<String> {
    let path = directory.join(file);
    fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(directory: &Path, file: &str) -> anyhow::Result<T> {
    let contents = read_text(directory, file)?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", directory.join(file).display()))
}
