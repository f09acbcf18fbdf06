// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, PartialEq, DError)]
pub enum ErrorKind {
    #[error("Rating {0} is out of range, must be within [0, 5]")]
    RatingOutOfRange(f64),

    #[error("Ids must be positive integers, got user({0}) and movie({1})")]
    InvalidIds(i32, i32),

    #[error("Partition count must be at least 1")]
    ZeroPartitions,

    #[error("No {0} partitions exist, run the partitioner first")]
    MissingPartitions(&'static str),

    #[error("Malformed row at line {0}: {1}")]
    MalformedRow(usize, String),

    #[error("Invalid table name ({0})")]
    InvalidTableName(String),
}
