//! Command implementations.

pub mod convert;
pub mod dump;

pub use self::convert::{convert_sources, execute_convert};
pub use self::dump::execute_dump;

use crate::error::Result;
use std::path::Path;
use wd2rdbl_mapper::{Mapper, VocabularyIndex};

/// Load the vocabulary and build a mapper over it.
pub fn load_mapper(vocabulary: &Path) -> Result<Mapper> {
    let vocab = VocabularyIndex::from_path(vocabulary)?;
    tracing::info!(
        "Loaded vocabulary from {} ({} terms)",
        vocabulary.display(),
        vocab.len()
    );
    Ok(Mapper::new(vocab))
}
