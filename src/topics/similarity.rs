// SimilarityMatrix: document-to-topic similarity scores.
//
// Entry (n, k) is how similar document n is to topic k. Both chart builders
// start from the same derived quantity: the dominant topic of each document
// (the argmax of its row). Everything here is pure and allocation-light;
// values are stored row-major in a single flat buffer.

use anyhow::Result;

/// An N x K matrix of document/topic similarities.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Vec<f64>,
    n_docs: usize,
    n_topics: usize,
}

impl SimilarityMatrix {
    /// Build a matrix from per-document rows, each of which must have
    /// exactly `n_topics` finite entries.
    ///
    /// `n_topics` is passed explicitly so an empty document set still knows
    /// its topic count (an empty `rows` can't tell us).
    pub fn from_rows(rows: &[Vec<f64>], n_topics: usize) -> Result<Self> {
        if n_topics == 0 && !rows.is_empty() {
            anyhow::bail!(
                "Similarity matrix has {} rows but no topic columns",
                rows.len()
            );
        }

        let mut values = Vec::with_capacity(rows.len() * n_topics);
        for (n, row) in rows.iter().enumerate() {
            if row.len() != n_topics {
                anyhow::bail!(
                    "Similarity row {} has {} entries, expected {} (one per topic)",
                    n,
                    row.len(),
                    n_topics
                );
            }
            if let Some(k) = row.iter().position(|v| !v.is_finite()) {
                anyhow::bail!("Similarity entry ({n}, {k}) is not a finite number");
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            values,
            n_docs: rows.len(),
            n_topics,
        })
    }

    /// Number of documents (rows).
    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// Number of topics (columns).
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    /// The similarity row for document `n`.
    pub fn row(&self, n: usize) -> &[f64] {
        &self.values[n * self.n_topics..(n + 1) * self.n_topics]
    }

    /// Iterate over all rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_docs).map(move |n| self.row(n))
    }

    /// Single entry lookup.
    pub fn get(&self, n: usize, k: usize) -> f64 {
        self.values[n * self.n_topics + k]
    }

    /// The dominant topic of every document.
    ///
    /// Standard argmax convention: on ties the first maximal index wins.
    pub fn topic_labels(&self) -> Vec<usize> {
        self.rows().map(argmax).collect()
    }

    /// Column-wise mean over the given documents.
    ///
    /// Returns `None` when `docs` is empty; the mean of nothing is
    /// undefined, and callers decide how to fill that gap.
    pub fn mean_profile(&self, docs: &[usize]) -> Option<Vec<f64>> {
        if docs.is_empty() {
            return None;
        }

        let mut sum = vec![0.0_f64; self.n_topics];
        for &n in docs {
            for (acc, &v) in sum.iter_mut().zip(self.row(n)) {
                *acc += v;
            }
        }

        let count = docs.len() as f64;
        for v in &mut sum {
            *v /= count;
        }
        Some(sum)
    }

    /// Unconditional column-wise mean over every document.
    pub fn column_means(&self) -> Option<Vec<f64>> {
        let all: Vec<usize> = (0..self.n_docs).collect();
        self.mean_profile(&all)
    }
}

/// Index of the maximum value in `row`, first occurrence on ties.
///
/// An empty row yields 0; `SimilarityMatrix` never produces one for a
/// non-empty document set.
pub fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    for (k, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = k;
        }
    }
    best
}

/// Group document indices by topic label.
///
/// Always returns exactly `n_topics` groups (some possibly empty). Every
/// document lands in exactly one group; within a group the original
/// document order is kept.
pub fn partition_by_topic(labels: &[usize], n_topics: usize) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); n_topics];
    for (n, &label) in labels.iter().enumerate() {
        if let Some(group) = groups.get_mut(label) {
            group.push(n);
        }
    }
    groups
}
