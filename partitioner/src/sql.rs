// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! SQL text builders. Table names are computed at runtime, so the
//! statements are assembled as strings; every name that reaches this
//! module must pass `valid_table_name` first. Row values always travel
//! as binds, never as text.

use crate::partition::bin_bounds;

pub fn valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", table)
}

/// The base table is created with the transient timestamp column, which
/// the bulk loader drops once the file has been ingested.
pub fn create_base_table(table: &str) -> String {
    format!(
        "CREATE TABLE {} (userid INTEGER, movieid INTEGER, rating FLOAT, timestamp BIGINT)",
        table
    )
}

pub fn create_partition_table(table: &str) -> String {
    format!(
        "CREATE TABLE {} (userid INTEGER, movieid INTEGER, rating FLOAT)",
        table
    )
}

pub fn drop_timestamp_column(table: &str) -> String {
    format!("ALTER TABLE {} DROP COLUMN timestamp", table)
}

pub fn insert_row(table: &str) -> String {
    format!(
        "INSERT INTO {} (userid, movieid, rating) VALUES ($1, $2, $3)",
        table
    )
}

pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) AS count FROM {}", table)
}

/// Lists the live tables of a scheme by matching the partition prefix
/// followed by an index against the catalog. The prefix is a bind.
pub fn count_partition_tables() -> &'static str {
    "SELECT COUNT(*) AS count FROM pg_stat_user_tables WHERE relname ~ $1"
}

pub fn partition_pattern(prefix: &str) -> String {
    format!("^{}[0-9]+$", prefix)
}

/// INSERT .. SELECT moving one rating bin from the base table into its
/// range partition. Bin 0 is closed at the lower bound, every other bin
/// is lower-exclusive; all bins are upper-inclusive.
pub fn fill_range_partition(partition: &str, base: &str, bin: usize, partitions: usize) -> String {
    let (lower, upper) = bin_bounds(bin, partitions);
    let lower_cmp = if bin == 0 { ">=" } else { ">" };

    format!(
        "INSERT INTO {partition} (userid, movieid, rating) \
         SELECT userid, movieid, rating FROM {base} \
         WHERE rating {lower_cmp} {lower} AND rating <= {upper}",
        partition = partition,
        base = base,
        lower_cmp = lower_cmp,
        lower = lower,
        upper = upper,
    )
}

/// INSERT .. SELECT moving every n-th base row (by insertion order) into
/// a round-robin partition.
pub fn fill_round_robin_partition(
    partition: &str,
    base: &str,
    index: usize,
    partitions: usize,
) -> String {
    format!(
        "INSERT INTO {partition} (userid, movieid, rating) \
         SELECT userid, movieid, rating FROM \
         (SELECT userid, movieid, rating, ROW_NUMBER() OVER () AS rnum FROM {base}) AS numbered \
         WHERE MOD(numbered.rnum - 1, {partitions}) = {index}",
        partition = partition,
        base = base,
        partitions = partitions,
        index = index,
    )
}
