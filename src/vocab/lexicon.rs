// Process-wide WordNet lexicon.
//
// Loading WordNet reads a few megabytes of index files, so it happens once
// per process through an explicit `init` call. Everything that lemmatizes
// afterwards shares the same instance via `get`.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Result;
use tracing::info;

use super::wordnet::WordNet;

static LEXICON: OnceLock<Arc<WordNet>> = OnceLock::new();

/// Load the lexicon from `dir` unless one is already loaded.
///
/// Idempotent: once a lexicon is in place, later calls return it and ignore
/// `dir`. A failed load leaves nothing behind, so the caller may retry with
/// another directory.
pub fn init(dir: &Path) -> Result<Arc<WordNet>> {
    if let Some(existing) = LEXICON.get() {
        return Ok(Arc::clone(existing));
    }

    let loaded = Arc::new(WordNet::load(dir)?);
    // Another thread may have won the race; either instance is equivalent.
    let lexicon = LEXICON.get_or_init(|| loaded);
    info!(dir = %dir.display(), "WordNet lexicon ready");
    Ok(Arc::clone(lexicon))
}

/// The loaded lexicon, or an error if `init` has not succeeded yet.
pub fn get() -> Result<Arc<WordNet>> {
    LEXICON.get().map(Arc::clone).ok_or_else(|| {
        anyhow::anyhow!(
            "WordNet lexicon not loaded. Call lexicon::init with the WordNet \
             directory before lemmatizing."
        )
    })
}

/// Whether `init` has succeeded in this process.
pub fn is_loaded() -> bool {
    LEXICON.get().is_some()
}

/// Whether `dir` looks like a WordNet dict directory (all index files present).
pub fn files_present(dir: &Path) -> bool {
    super::wordnet::PartOfSpeech::ALL
        .iter()
        .all(|pos| dir.join(format!("index.{}", pos.file_stem())).exists())
}
