// Colored terminal output for topic summaries and vocabularies.
//
// This module handles all terminal-specific formatting. The pure part
// (`summarize_topics`) is separate from printing so it can be tested.

use colored::Colorize;

use crate::topics::similarity::{partition_by_topic, SimilarityMatrix};

/// How many documents a topic dominates, and how confidently.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub name: String,
    /// Documents whose dominant topic this is
    pub documents: usize,
    /// Fraction of all documents (0.0 when there are none)
    pub share: f64,
    /// Mean similarity of those documents to this topic, if any
    pub mean_similarity: Option<f64>,
}

/// Per-topic document counts and mean own-topic similarity.
pub fn summarize_topics(topics: &[String], similarities: &SimilarityMatrix) -> Vec<TopicSummary> {
    let labels = similarities.topic_labels();
    let groups = partition_by_topic(&labels, similarities.n_topics());
    let total = similarities.n_docs();

    topics
        .iter()
        .zip(&groups)
        .enumerate()
        .map(|(i, (name, members))| TopicSummary {
            name: name.clone(),
            documents: members.len(),
            share: if total > 0 {
                members.len() as f64 / total as f64
            } else {
                0.0
            },
            mean_similarity: similarities.mean_profile(members).map(|p| p[i]),
        })
        .collect()
}

/// Display topic summaries as a bar chart.
pub fn display_topic_summary(summaries: &[TopicSummary]) {
    let total: usize = summaries.iter().map(|s| s.documents).sum();
    println!(
        "\n{}",
        format!(
            "=== Dominant Topics ({} documents, {} topics) ===",
            total,
            summaries.len()
        )
        .bold()
    );
    println!();

    let bar_width: usize = 20;

    for (i, summary) in summaries.iter().enumerate() {
        let filled = (summary.share * bar_width as f64).round() as usize;
        let empty = bar_width.saturating_sub(filled);
        let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

        let colored_bar = if summary.documents == 0 {
            bar.dimmed()
        } else if summary.share >= 0.25 {
            bar.bright_green()
        } else if summary.share >= 0.10 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        let confidence = match summary.mean_similarity {
            Some(s) => format!("mean sim {s:.2}").normal(),
            None => "no documents".red(),
        };

        println!(
            "  {:>2}. {:<32} {} {:>5}  {}",
            i + 1,
            super::truncate_chars(&summary.name, 29).bold(),
            colored_bar,
            summary.documents,
            confidence,
        );
    }
    println!();
}

/// Display a vocabulary, several words per line.
pub fn display_vocabulary(words: &[String]) {
    if words.is_empty() {
        println!("No words found.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Vocabulary ({} unique words) ===", words.len()).bold()
    );

    for chunk in words.chunks(8) {
        let line: Vec<String> = chunk.iter().map(|w| format!("{w:<16}")).collect();
        println!("  {}", line.join("").trim_end());
    }
    println!();
}
