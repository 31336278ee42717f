// Topic dataset files.
//
// The CLI reads its chart inputs from a single JSON file:
//
//   {
//     "topics": ["Robotics", "Natural language processing"],
//     "topic_breaks": ["Robotics", "Natural<br>language"],   (optional)
//     "embeddings": [[0.1, 2.3], ...],                      (scatter only)
//     "topic_similarities": [[0.8, 0.1], ...]
//   }

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::topics::labels::default_breaks;
use crate::topics::similarity::SimilarityMatrix;

/// Raw chart inputs as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicDataset {
    pub topics: Vec<String>,
    #[serde(default)]
    pub topic_breaks: Option<Vec<String>>,
    #[serde(default)]
    pub embeddings: Vec<[f64; 2]>,
    pub topic_similarities: Vec<Vec<f64>>,
}

impl TopicDataset {
    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid dataset {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validated similarity matrix with one column per topic.
    pub fn similarity_matrix(&self) -> Result<SimilarityMatrix> {
        SimilarityMatrix::from_rows(&self.topic_similarities, self.topics.len())
    }

    /// Break labels as given, or wrapped topic names when absent.
    pub fn breaks(&self) -> Vec<String> {
        self.topic_breaks
            .clone()
            .unwrap_or_else(|| default_breaks(&self.topics))
    }
}
