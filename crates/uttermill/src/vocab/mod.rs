//! # Vocabulary
//!
//! The batching pipeline consumes the vocabulary as a read-only lookup:
//! * [`VocabLookup`] - the ``{ &str -> T }`` lookup seam,
//! * [`VocabTable`] - an in-memory table built from an ordered token list,
//! * [`SpecialTokens`] - the resolved ``sos``/``eos``/``eou`` ids.
//!
//! Vocabularies are shared between iterators behind an [`std::sync::Arc`].
pub mod io;
pub mod special_tokens;
pub mod vocab_lookup;
pub mod vocab_table;

#[doc(inline)]
pub use io::{load_vocab_path, read_vocab};
#[doc(inline)]
pub use special_tokens::SpecialTokens;
#[doc(inline)]
pub use vocab_lookup::VocabLookup;
#[doc(inline)]
pub use vocab_table::VocabTable;
