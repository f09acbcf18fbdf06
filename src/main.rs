pub mod parser;

use anyhow::Error;
use config::{Config, DatabaseConfig, LoaderConfig};
use parser::Statement;
use partitioner::partition::Scheme;
use partitioner::PartitionLoader;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashMap;

macro_rules! prompt {
    ($ed:ident) => {{
        use rustyline::error::ReadlineError;

        match $ed.readline(PROMPT) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                println!("Exiting...Good bye!");
                break;
            }

            Err(e) => Err(e),
        }
    }};
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

fn load_settings(path: &str) -> Config {
    match Config::load(path) {
        Ok(config) => return config,
        Err(e) => {
            // A missing file just means dotenv defaults; a file that is
            // present but does not parse should not go unnoticed.
            if std::path::Path::new(path).exists() {
                log::warn!("Ignoring {}: {}", path, e);
            }
        }
    }

    let vars: HashMap<String, String> = dotenv::vars().collect();
    let url = vars
        .get("DATABASE_URL")
        .cloned()
        .unwrap_or_else(|| "postgres://postgres:@localhost/ratings".to_string());

    Config {
        database: DatabaseConfig {
            url,
            ratings_table: "ratings".to_string(),
        },
        loader: LoaderConfig {
            separator: "::".to_string(),
            chunk_size: 10_000,
        },
    }
}

fn print_status(loader: &PartitionLoader) -> Result<(), Error> {
    let mut table = Table::new();
    table.add_row(row!["partition", "rows"]);

    for scheme in &[Scheme::Range, Scheme::RoundRobin] {
        for (name, rows) in loader.partition_sizes(*scheme)? {
            table.add_row(row![name, rows]);
        }
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table.printstd();
    Ok(())
}

fn run_statement(loader: &PartitionLoader, settings: &Config, statement: Statement) {
    let outcome = match statement {
        Statement::Load(path) => loader
            .load_ratings(
                &path,
                &settings.loader.separator,
                settings.loader.chunk_size,
            )
            .map(|loaded| println!("Loaded {} ratings into {}", loaded, loader.table())),

        Statement::RangePartition(partitions) => loader
            .range_partition(partitions)
            .map(|_| println!("Created {} range partitions", partitions)),

        Statement::RoundRobinPartition(partitions) => loader
            .round_robin_partition(partitions)
            .map(|_| println!("Created {} round-robin partitions", partitions)),

        Statement::RangeInsert(userid, movieid, rating) => loader
            .range_insert(userid, movieid, rating)
            .map(|_| println!("Inserted rating {} for user({})", rating, userid)),

        Statement::RoundRobinInsert(userid, movieid, rating) => loader
            .round_robin_insert(userid, movieid, rating)
            .map(|_| println!("Inserted rating {} for user({})", rating, userid)),
    };

    if let Err(e) = outcome {
        log::error!("{}", e);
    }
}

fn main() -> Result<(), Error> {
    TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
    )?;

    let settings = load_settings("config.toml");
    let loader = PartitionLoader::with_url(&settings.database.url, &settings.database.ratings_table)?;

    println!("Welcome to partition-loader {}", VERSION);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl)?;

        match opt.trim() {
            "?" | "h" | "help" => {
                println!("Main help:");
                println!("h | help                        Shows this help");
                println!("q | quit                        Quit");
                println!("s | status                      Partition tables and row counts");
                println!("load('<path>')                  Bulk load a ratings file");
                println!("rangepart(<n>)                  Materialize n range partitions");
                println!("rrobinpart(<n>)                 Materialize n round-robin partitions");
                println!("rangeinsert(<u>, <m>, <r>)      Insert one rating (range scheme)");
                println!("rrobininsert(<u>, <m>, <r>)     Insert one rating (round-robin scheme)");
            }

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            "s" | "status" => {
                if let Err(e) = print_status(&loader) {
                    log::error!("{}", e);
                }
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(statement) => run_statement(&loader, &settings, statement),
                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}
