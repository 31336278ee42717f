// Unit tests for vocabulary extraction.
//
// Uses a tiny on-disk WordNet (written to the temp dir) so the full path
// (lexicon::init, WordNetLemmatizer, VocabularyExtractor) runs without the
// real dictionary.

use std::path::PathBuf;

use textdemo::vocab::extract::{unique_words, VocabularyExtractor, STRIPPED_CHARS};
use textdemo::vocab::lexicon;
use textdemo::vocab::traits::NoopLemmatizer;
use textdemo::vocab::wordnet::{PartOfSpeech, WordNet, WordNetLemmatizer};

/// Write a minimal WordNet dict directory and return its path.
fn mini_wordnet(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("textdemo-wordnet-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let header = "  1 This software and database is being provided to you, the LICENSEE\n";
    std::fs::write(
        dir.join("index.noun"),
        format!("{header}a n 1 0 1 0 1\ncat n 1 0 1 0 2\ndog n 1 0 1 0 3\nmouse n 1 0 1 0 4\nrun n 1 0 1 0 5\n"),
    )
    .unwrap();
    std::fs::write(dir.join("index.verb"), format!("{header}run v 1 0 1 0 6\n")).unwrap();
    std::fs::write(dir.join("index.adj"), header).unwrap();
    std::fs::write(dir.join("index.adv"), header).unwrap();
    std::fs::write(dir.join("noun.exc"), "mice mouse\n").unwrap();
    std::fs::write(dir.join("verb.exc"), "ran run\n").unwrap();
    dir
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================
// Full extraction through the process-wide lexicon
// ============================================================

#[test]
fn inflection_and_case_collapse() {
    let dir = mini_wordnet("collapse");
    lexicon::init(&dir).unwrap();

    let words = unique_words(&texts(&["Cats run.", "A cat ran."])).unwrap();
    // Noun lemmatization leaves the irregular verb form alone
    assert_eq!(words, vec!["a", "cat", "ran", "run"]);

    let same = unique_words(&texts(&["CATS RUN", "a CAT ran"])).unwrap();
    assert_eq!(words, same);
}

#[test]
fn init_is_idempotent() {
    let dir = mini_wordnet("idempotent");
    let first = lexicon::init(&dir).unwrap();
    // A bogus directory is ignored once a lexicon is loaded
    let second = lexicon::init(std::path::Path::new("/nonexistent")).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(lexicon::is_loaded());
}

#[test]
fn extraction_is_idempotent() {
    let dir = mini_wordnet("reapply");
    let wordnet = std::sync::Arc::new(WordNet::load(&dir).unwrap());
    let extractor = VocabularyExtractor::new(WordNetLemmatizer::new(wordnet, PartOfSpeech::Noun));

    let once = extractor.extract(&texts(&["The mice chased cats!", "Dogs (and mice)."])).unwrap();
    let twice = extractor.extract(&once).unwrap();
    assert_eq!(once, twice);
    assert!(once.contains(&"mouse".to_string()));
    assert!(once.contains(&"dog".to_string()));
}

#[test]
fn verb_lemmatizer_uses_verb_exceptions() {
    let dir = mini_wordnet("verbs");
    let wordnet = std::sync::Arc::new(WordNet::load(&dir).unwrap());
    let extractor = VocabularyExtractor::new(WordNetLemmatizer::new(wordnet, PartOfSpeech::Verb));
    let words = extractor.extract(&texts(&["She ran; he runs."])).unwrap();
    assert_eq!(words, vec!["he", "run", "she"]);
}

#[test]
fn missing_index_file_fails_to_load() {
    let dir = mini_wordnet("missing");
    std::fs::remove_file(dir.join("index.adv")).unwrap();
    assert!(WordNet::load(&dir).is_err());
    assert!(!lexicon::files_present(&dir));
}

// ============================================================
// Punctuation and empty input
// ============================================================

#[test]
fn punctuation_never_survives() {
    let extractor = VocabularyExtractor::new(NoopLemmatizer);
    let corpus = texts(&[
        "“Quoted,” (bracketed); colon: bang! query? it's it’s `tick` acute´ \"plain\".",
    ]);
    let words = extractor.extract(&corpus).unwrap();
    assert!(!words.is_empty());
    for word in &words {
        assert!(
            !word.chars().any(|c| STRIPPED_CHARS.contains(c)),
            "punctuation left in {word:?}"
        );
    }
    assert!(words.contains(&"its".to_string()));
}

#[test]
fn empty_corpus_gives_empty_vocabulary() {
    let extractor = VocabularyExtractor::new(NoopLemmatizer);
    assert!(extractor.extract(&[]).unwrap().is_empty());
    assert!(extractor.extract(&texts(&["", "   "])).unwrap().is_empty());
}
