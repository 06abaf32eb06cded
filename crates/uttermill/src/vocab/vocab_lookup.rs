//! # Vocabulary Lookup

use std::sync::Arc;

use crate::types::{TokenType, unknown_token};

/// A read-only ``{ token string -> id }`` lookup.
///
/// Lookups never fail: out-of-vocabulary tokens resolve to
/// [`VocabLookup::unknown_token`].
pub trait VocabLookup<T: TokenType> {
    /// Look up the id of `token`, or the unknown sentinel.
    fn lookup(
        &self,
        token: &str,
    ) -> T;

    /// Is `token` present in the vocabulary?
    fn contains(
        &self,
        token: &str,
    ) -> bool;

    /// The sentinel id used for out-of-vocabulary tokens.
    fn unknown_token(&self) -> T {
        unknown_token()
    }
}

impl<T: TokenType, V: VocabLookup<T> + ?Sized> VocabLookup<T> for &V {
    fn lookup(
        &self,
        token: &str,
    ) -> T {
        (**self).lookup(token)
    }

    fn contains(
        &self,
        token: &str,
    ) -> bool {
        (**self).contains(token)
    }

    fn unknown_token(&self) -> T {
        (**self).unknown_token()
    }
}

impl<T: TokenType, V: VocabLookup<T> + ?Sized> VocabLookup<T> for Arc<V> {
    fn lookup(
        &self,
        token: &str,
    ) -> T {
        (**self).lookup(token)
    }

    fn contains(
        &self,
        token: &str,
    ) -> bool {
        (**self).contains(token)
    }

    fn unknown_token(&self) -> T {
        (**self).unknown_token()
    }
}
