//! # Record Sources
//!
//! A record is one raw dialogue line. Sources are re-opened on every
//! iterator initialization, so each pass sees a fresh stream.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::errors::{UMResult, UttermillError};

/// A stream of raw records; may be infinite.
pub type RecordStream = Box<dyn Iterator<Item = UMResult<String>> + Send>;

/// A re-openable source of raw dialogue records.
pub trait RecordSource {
    /// Open a fresh stream, starting at the first record.
    fn open(&self) -> UMResult<RecordStream>;
}

impl<S: AsRef<str>> RecordSource for Vec<S> {
    fn open(&self) -> UMResult<RecordStream> {
        let records: Vec<String> = self.iter().map(|r| r.as_ref().to_string()).collect();
        Ok(Box::new(records.into_iter().map(Ok)))
    }
}

/// One record per line of a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFileSource {
    path: PathBuf,
}

impl LineFileSource {
    /// A source reading `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for LineFileSource {
    fn open(&self) -> UMResult<RecordStream> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(Box::new(
            reader
                .lines()
                .map(|line| line.map_err(UttermillError::from)),
        ))
    }
}
