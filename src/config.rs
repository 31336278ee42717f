use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::charts::spider::EmptyTopicPolicy;
use crate::output::ImageFormat;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, so an empty environment is valid.
pub struct Config {
    /// WordNet dict directory (index.noun, noun.exc, ...)
    pub wordnet_dir: PathBuf,
    /// Where figures go when no explicit output path is given
    pub output_dir: PathBuf,
    /// Figure format when none is given on the command line
    pub image_format: ImageFormat,
    /// How the spider plot fills topics with no documents
    pub empty_topics: EmptyTopicPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let wordnet_dir = env::var("TEXTDEMO_WORDNET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_wordnet_dir());

        let image_format = match env::var("TEXTDEMO_IMAGE_FORMAT") {
            Ok(s) => s.parse()?,
            Err(_) => ImageFormat::Svg,
        };

        let empty_topics = match env::var("TEXTDEMO_EMPTY_TOPICS") {
            Ok(s) => s.parse()?,
            Err(_) => EmptyTopicPolicy::default(),
        };

        Ok(Self {
            wordnet_dir,
            output_dir: env::var("TEXTDEMO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output")),
            image_format,
            empty_topics,
        })
    }

    /// Check that the WordNet files are where we expect them.
    /// Call this before anything that lemmatizes.
    pub fn require_lexicon(&self) -> Result<()> {
        if !crate::vocab::lexicon::files_present(&self.wordnet_dir) {
            anyhow::bail!(
                "WordNet files not found in {}\n\
                 Install them with `python -m nltk.downloader wordnet` and unzip\n\
                 the archive, or set TEXTDEMO_WORDNET_DIR to an existing WordNet dict directory.",
                self.wordnet_dir.display()
            );
        }
        Ok(())
    }
}

/// Where NLTK installs WordNet by default: ~/nltk_data/corpora/wordnet.
pub fn default_wordnet_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nltk_data")
        .join("corpora")
        .join("wordnet")
}
