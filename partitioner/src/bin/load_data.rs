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

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/ratings.dat".to_string());

    let loader = PartitionLoader::with_url(psql_url, table)?;

    println!("Loading {} into {}", path, table);
    let loaded = loader.load_ratings(&path, "::", 10_000)?;
    println!("Loaded {} ratings", loaded);

    Ok(())
}
