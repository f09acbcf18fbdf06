// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use partitioner::partition::Scheme;
use partitioner::PartitionLoader;
use std::collections::HashMap;

fn main() -> Result<(), Error> {
    let vars: HashMap<String, String> = dotenv::vars().collect();

    let psql_url = &vars["DATABASE_URL"];
    let table = vars
        .get("RATINGS_TABLE")
        .map(String::as_str)
        .unwrap_or("ratings");

    let partitions: usize = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "5".to_string())
        .parse()?;

    let loader = PartitionLoader::with_url(psql_url, table)?;

    loader.range_partition(partitions)?;
    for (table, rows) in loader.partition_sizes(Scheme::Range)? {
        println!("{}: {} rows", table, rows);
    }

    loader.round_robin_partition(partitions)?;
    for (table, rows) in loader.partition_sizes(Scheme::RoundRobin)? {
        println!("{}: {} rows", table, rows);
    }

    Ok(())
}
