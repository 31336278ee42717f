use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use textdemo::charts::palette::PlotConfig;
use textdemo::charts::scatter::{scatter_plot, ScatterStyle};
use textdemo::charts::spider::{spider_plot, EmptyTopicPolicy};
use textdemo::config::Config;
use textdemo::dataset::TopicDataset;
use textdemo::output::{self, ImageFormat};
use textdemo::vocab::extract::VocabularyExtractor;
use textdemo::vocab::lexicon;
use textdemo::vocab::wordnet::{PartOfSpeech, WordNetLemmatizer};

/// textdemo: topic-similarity charts and corpus vocabulary extraction.
///
/// Draws embedding scatter plots and topic spider plots from a JSON dataset,
/// and extracts lemmatized vocabularies from text files.
#[derive(Parser)]
#[command(name = "textdemo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the lemmatized vocabulary of one or more text files
    Vocab {
        /// Text files; every non-empty line is one document
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Drop English stop words
        #[arg(long)]
        stop_words: bool,

        /// Part of speech to lemmatize as (noun, verb, adj, adv)
        #[arg(long, default_value = "noun")]
        pos: PartOfSpeech,
    },

    /// Draw the embedding scatter plot for a dataset
    Scatter {
        /// Dataset JSON file
        dataset: PathBuf,

        /// Output file (default: <output dir>/scatter.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// json, svg or png (default: from the output extension, then config)
        #[arg(long)]
        format: Option<ImageFormat>,

        /// Panel letter to put in the top-left corner
        #[arg(long)]
        panel: Option<String>,
    },

    /// Draw the topic spider plot for a dataset
    Spider {
        /// Dataset JSON file
        dataset: PathBuf,

        /// Output file (default: <output dir>/spider.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// json, svg or png (default: from the output extension, then config)
        #[arg(long)]
        format: Option<ImageFormat>,

        /// Panel letter to put in the top-left corner
        #[arg(long)]
        panel: Option<String>,

        /// What to draw for topics with no documents: nan or zero
        #[arg(long)]
        empty_topics: Option<EmptyTopicPolicy>,
    },

    /// Show how documents are distributed over topics
    Summary {
        /// Dataset JSON file
        dataset: PathBuf,
    },

    /// Show configuration and lexicon status
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textdemo=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Vocab {
            files,
            stop_words,
            pos,
        } => {
            config.require_lexicon()?;
            let wordnet = lexicon::init(&config.wordnet_dir)?;

            let texts = read_documents(&files)?;
            info!(files = files.len(), documents = texts.len(), "Read corpus");

            let mut extractor = VocabularyExtractor::new(WordNetLemmatizer::new(wordnet, pos));
            extractor.filter_stop_words = stop_words;
            let words = extractor.extract(&texts)?;

            output::terminal::display_vocabulary(&words);
        }

        Commands::Scatter {
            dataset,
            output,
            format,
            panel,
        } => {
            let data = TopicDataset::load(&dataset)?;
            let similarities = data.similarity_matrix()?;
            let plot_config = PlotConfig::default();

            let mut fig = scatter_plot(
                &data.embeddings,
                &data.topics,
                &similarities,
                &plot_config,
                &ScatterStyle::default(),
            )?;
            if let Some(panel) = panel {
                fig.add_panel_annotation(&panel, 1.0);
            }

            let (path, format) = resolve_output(&config, output, format, "scatter");
            output::write_figure(&fig, &path, format, &plot_config)?;
            println!("{}", format!("Scatter plot saved to: {}", path.display()).bold());
        }

        Commands::Spider {
            dataset,
            output,
            format,
            panel,
            empty_topics,
        } => {
            let data = TopicDataset::load(&dataset)?;
            let similarities = data.similarity_matrix()?;
            let plot_config = PlotConfig::default();

            let mut fig = spider_plot(
                &data.topics,
                &similarities,
                &data.breaks(),
                &plot_config,
                empty_topics.unwrap_or(config.empty_topics),
            )?;
            if let Some(panel) = panel {
                // Spider margins are roughly twice as wide as the scatter's
                fig.add_panel_annotation(&panel, 2.0);
            }

            let (path, format) = resolve_output(&config, output, format, "spider");
            output::write_figure(&fig, &path, format, &plot_config)?;
            println!("{}", format!("Spider plot saved to: {}", path.display()).bold());
        }

        Commands::Summary { dataset } => {
            let data = TopicDataset::load(&dataset)?;
            let similarities = data.similarity_matrix()?;
            let summaries = output::terminal::summarize_topics(&data.topics, &similarities);
            output::terminal::display_topic_summary(&summaries);
        }

        Commands::Status => {
            println!("WordNet directory: {}", config.wordnet_dir.display());
            if lexicon::files_present(&config.wordnet_dir) {
                println!("  {}", "index files found".green());
            } else {
                println!("  {}", "index files missing".red());
                println!("  Set TEXTDEMO_WORDNET_DIR or install WordNet via NLTK");
            }
            println!("Output directory:  {}", config.output_dir.display());
            println!("Default format:    {}", config.image_format);
            if output::render::png_supported() {
                println!("PNG output:        {}", "available".green());
            } else {
                println!("PNG output:        {}", "needs the ttf feature".yellow());
            }
            let policy = match config.empty_topics {
                EmptyTopicPolicy::NotANumber => "nan (gap)",
                EmptyTopicPolicy::Zero => "zero",
            };
            println!("Empty topics:      {policy}");
        }
    }

    Ok(())
}

/// Read every non-empty line of every file as a document.
fn read_documents(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut texts = Vec::new();
    for file in files {
        let contents = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        texts.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        );
    }
    Ok(texts)
}

/// Pick the output path and format: explicit flags win, then the output
/// file's extension, then configuration.
fn resolve_output(
    config: &Config,
    output: Option<PathBuf>,
    format: Option<ImageFormat>,
    stem: &str,
) -> (PathBuf, ImageFormat) {
    let format = format
        .or_else(|| output.as_deref().and_then(ImageFormat::from_path))
        .unwrap_or(config.image_format);
    let path = output.unwrap_or_else(|| output::default_path(Path::new(&config.output_dir), stem, format));
    (path, format)
}
