//! # Vocabulary Table

use crate::{
    errors::{UMResult, UttermillError},
    types::{TokenType, UMHashMap, hash_map_with_capacity},
    vocab::VocabLookup,
};

/// An immutable token table; a token's id is its position in the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabTable<T: TokenType> {
    token_map: UMHashMap<String, T>,
    tokens: Vec<String>,
}

impl<T: TokenType> VocabTable<T> {
    /// Build a table from an ordered token list.
    ///
    /// ## Arguments
    /// * `tokens` - the tokens; the i-th token gets id `i`.
    ///
    /// ## Returns
    /// The table, or an error if a token repeats or the list
    /// does not fit in `T`.
    pub fn from_tokens<I, S>(tokens: I) -> UMResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();

        let mut token_map = hash_map_with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            let id = T::from_usize(idx).ok_or(UttermillError::VocabSizeOverflow {
                size: tokens.len(),
            })?;
            if token_map.insert(token.clone(), id).is_some() {
                return Err(UttermillError::VocabConflict(format!(
                    "duplicate vocabulary token {token:?}"
                )));
            }
        }

        Ok(Self { token_map, tokens })
    }

    /// Get the number of tokens in the table.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The ordered token list.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Reverse lookup: the token string for `id`, if any.
    pub fn token_for(
        &self,
        id: T,
    ) -> Option<&str> {
        id.to_usize()
            .and_then(|idx| self.tokens.get(idx))
            .map(String::as_str)
    }
}

impl<T: TokenType> VocabLookup<T> for VocabTable<T> {
    fn lookup(
        &self,
        token: &str,
    ) -> T {
        self.token_map
            .get(token)
            .copied()
            .unwrap_or_else(|| self.unknown_token())
    }

    fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_map.contains_key(token)
    }
}
