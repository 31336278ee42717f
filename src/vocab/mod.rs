// Vocabulary extraction: punctuation stripping, WordNet lemmatization,
// deduplication.

pub mod extract;
pub mod lexicon;
pub mod traits;
pub mod wordnet;
