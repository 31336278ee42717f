// textdemo: topic-similarity charts and corpus vocabulary extraction
//
// This is the library root. The chart builders and the vocabulary extractor
// are independent; `topics` holds the similarity data they share.

pub mod charts;
pub mod config;
pub mod dataset;
pub mod output;
pub mod topics;
pub mod vocab;
