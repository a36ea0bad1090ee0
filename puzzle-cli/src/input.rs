//! Local puzzle inputs, read-only

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of puzzle inputs
///
/// Directory structure: `{base_dir}/{year}/day{day:02}.txt`
pub struct InputStore {
    base_dir: PathBuf,
}

impl InputStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.base_dir
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    /// Read the input, or `None` if there is no file for this day
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        read_optional(&self.input_path(year, day))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read an explicit `--input`: a file path, or `-` for stdin
pub fn read_explicit(path: &Path) -> Result<String, InputError> {
    if path == Path::new("-") {
        return std::io::read_to_string(std::io::stdin()).map_err(InputError::Stdin);
    }
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}
