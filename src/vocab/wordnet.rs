// WordNet lexicon and the morphy base-form algorithm.
//
// Only the parts of WordNet that lemmatization needs are loaded:
//
//   index.{noun,verb,adj,adv}  which lemmas exist for each part of speech
//   {noun,verb,adj,adv}.exc    irregular forms ("ran run", "geese goose")
//
// Files use the standard WordNet dict layout, e.g. the directory NLTK
// installs at ~/nltk_data/corpora/wordnet.
//
// Morphy: if the word is an irregular form, the candidates are the word and
// its listed base forms. Otherwise suffix-detachment rules are applied
// repeatedly until some candidate is a known lemma. Of the surviving
// candidates the shortest wins.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use super::traits::Lemmatizer;

/// WordNet part of speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartOfSpeech {
    #[default]
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// File stem used by the WordNet dict layout.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adj",
            Self::Adverb => "adv",
        }
    }

    /// Suffix detachment rules as (suffix, replacement), tried in order.
    fn substitutions(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            Self::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            Self::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            Self::Adverb => &[],
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for PartOfSpeech {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "noun" => Ok(Self::Noun),
            "v" | "verb" => Ok(Self::Verb),
            "a" | "s" | "adj" | "adjective" => Ok(Self::Adjective),
            "r" | "adv" | "adverb" => Ok(Self::Adverb),
            other => anyhow::bail!("Unknown part of speech '{other}'"),
        }
    }
}

/// Lemma index and exception lists for one part of speech.
#[derive(Debug, Default)]
struct PosTables {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

/// The lemmatization subset of a WordNet database.
#[derive(Debug, Default)]
pub struct WordNet {
    tables: HashMap<PartOfSpeech, PosTables>,
}

impl WordNet {
    /// Load a WordNet dict directory.
    ///
    /// Every `index.*` file is required; `*.exc` files are optional (some
    /// trimmed distributions omit them).
    pub fn load(dir: &Path) -> Result<Self> {
        let mut wordnet = Self::default();

        for pos in PartOfSpeech::ALL {
            let index_path = dir.join(format!("index.{}", pos.file_stem()));
            let index = std::fs::read_to_string(&index_path).with_context(|| {
                format!("Failed to read WordNet index {}", index_path.display())
            })?;
            wordnet.add_index(pos, &index);

            let exc_path = dir.join(format!("{}.exc", pos.file_stem()));
            if exc_path.exists() {
                let exc = std::fs::read_to_string(&exc_path).with_context(|| {
                    format!("Failed to read WordNet exceptions {}", exc_path.display())
                })?;
                wordnet.add_exceptions(pos, &exc);
            }
        }

        debug!(
            dir = %dir.display(),
            nouns = wordnet.lemma_count(PartOfSpeech::Noun),
            verbs = wordnet.lemma_count(PartOfSpeech::Verb),
            "Loaded WordNet lexicon"
        );

        Ok(wordnet)
    }

    /// Add lemmas from the contents of an `index.<pos>` file.
    ///
    /// Lines starting with a space are the license header. The first field
    /// of every other line is the lemma.
    pub fn add_index(&mut self, pos: PartOfSpeech, contents: &str) {
        let table = self.tables.entry(pos).or_default();
        for line in contents.lines() {
            if line.starts_with(' ') {
                continue;
            }
            if let Some(lemma) = line.split_whitespace().next() {
                table.lemmas.insert(lemma.to_string());
            }
        }
    }

    /// Add irregular forms from the contents of a `<pos>.exc` file.
    ///
    /// Each line is an inflected form followed by one or more base forms.
    pub fn add_exceptions(&mut self, pos: PartOfSpeech, contents: &str) {
        let table = self.tables.entry(pos).or_default();
        for line in contents.lines() {
            let mut fields = line.split_whitespace();
            let Some(form) = fields.next() else {
                continue;
            };
            let bases: Vec<String> = fields.map(str::to_string).collect();
            if !bases.is_empty() {
                table
                    .exceptions
                    .entry(form.to_string())
                    .or_default()
                    .extend(bases);
            }
        }
    }

    /// Number of lemmas known for a part of speech.
    pub fn lemma_count(&self, pos: PartOfSpeech) -> usize {
        self.tables.get(&pos).map(|t| t.lemmas.len()).unwrap_or(0)
    }

    /// Whether `lemma` is a known base form for `pos`.
    pub fn contains(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.tables
            .get(&pos)
            .is_some_and(|t| t.lemmas.contains(lemma))
    }

    /// All candidate base forms of `form`, in discovery order, deduplicated.
    pub fn morphy(&self, form: &str, pos: PartOfSpeech) -> Vec<String> {
        let filter = |forms: Vec<String>| -> Vec<String> {
            let mut seen = HashSet::new();
            forms
                .into_iter()
                .filter(|f| self.contains(pos, f) && seen.insert(f.clone()))
                .collect()
        };
        let apply_rules = |forms: &[String]| -> Vec<String> {
            forms
                .iter()
                .flat_map(|f| {
                    pos.substitutions().iter().filter_map(move |(old, new)| {
                        f.strip_suffix(old).map(|stem| format!("{stem}{new}"))
                    })
                })
                .collect()
        };

        if let Some(bases) = self.tables.get(&pos).and_then(|t| t.exceptions.get(form)) {
            let mut forms = vec![form.to_string()];
            forms.extend(bases.iter().cloned());
            return filter(forms);
        }

        let mut forms = apply_rules(&[form.to_string()]);
        let mut first_round = vec![form.to_string()];
        first_round.extend(forms.iter().cloned());
        let results = filter(first_round);
        if !results.is_empty() {
            return results;
        }

        while !forms.is_empty() {
            forms = apply_rules(&forms);
            let results = filter(forms.clone());
            if !results.is_empty() {
                return results;
            }
        }

        Vec::new()
    }
}

/// Lemmatizer backed by a loaded WordNet lexicon.
pub struct WordNetLemmatizer {
    wordnet: Arc<WordNet>,
    pos: PartOfSpeech,
}

impl WordNetLemmatizer {
    pub fn new(wordnet: Arc<WordNet>, pos: PartOfSpeech) -> Self {
        Self { wordnet, pos }
    }
}

impl Lemmatizer for WordNetLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        // min_by_key keeps the first of equally short candidates
        self.wordnet
            .morphy(word, self.pos)
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| word.to_string())
    }
}
