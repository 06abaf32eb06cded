//! # Vocabulary IO
//!
//! Vocabulary files hold one token per line; a token's id is its line
//! index, counting only non-blank lines.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{errors::UMResult, types::TokenType, vocab::VocabTable};

/// Load a [`VocabTable`] from a vocabulary file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_vocab_path<T, P>(path: P) -> UMResult<VocabTable<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_vocab(reader)
}

/// Read a [`VocabTable`] from a [`BufRead`] stream.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_vocab<T, R>(reader: R) -> UMResult<VocabTable<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let token = line.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }

    VocabTable::from_tokens(tokens)
}
