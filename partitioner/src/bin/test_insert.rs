// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use partitioner::PartitionLoader;
use std::collections::HashMap;

fn main() -> Result<(), Error> {
    let vars: HashMap<String, String> = dotenv::vars().collect();

    let psql_url = &vars["DATABASE_URL"];
    let table = vars
        .get("RATINGS_TABLE")
        .map(String::as_str)
        .unwrap_or("ratings");

    let loader = PartitionLoader::with_url(psql_url, table)?;

    let userid = 26;
    let movieid = 26;
    let rating = 4.5;

    loader.range_insert(userid, movieid, rating)?;
    println!("Range insert successful for user({})", userid);

    loader.round_robin_insert(userid, movieid, rating)?;
    println!("Round-robin insert successful for user({})", userid);

    Ok(())
}
