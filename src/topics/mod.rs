// Topic data: similarity matrices, dominant-topic labels, tick labels.

pub mod labels;
pub mod similarity;
