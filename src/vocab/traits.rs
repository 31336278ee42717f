// Lemmatizer trait: swap-ready abstraction.
//
// The vocabulary extractor only needs "word in, base form out". The default
// implementation is WordNet-backed; tests and callers that want raw tokens
// can plug in NoopLemmatizer instead.

/// Maps an inflected word form to its dictionary base form.
pub trait Lemmatizer {
    /// Return the base form of `word`, or `word` itself when none is known.
    fn lemmatize(&self, word: &str) -> String;
}

/// Leaves every word unchanged.
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }
}
