// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod error;
pub mod models;
pub mod partition;
pub mod sql;

use crate::error::ErrorKind;
use crate::models::{NewRating, RowCount};
use crate::partition::{bin_for_rating, round_robin_slot, Scheme, MAX_RATING, MIN_RATING};
use anyhow::Error;
use diesel::pg::PgConnection;
use diesel::sql_types::{Double, Integer, Text};
use diesel::{prelude::*, sql_query};
use indicatif::ProgressIterator;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn establish_connection(url: &str) -> Result<PgConnection, Error> {
    Ok(PgConnection::establish(&url)?)
}

pub struct PartitionLoader {
    conn: PgConnection,
    table: String,
}

impl PartitionLoader {
    pub fn new() -> Result<Self, Error> {
        Self::with_url("postgres://postgres:@localhost/ratings", "ratings")
    }

    pub fn with_url(url: &str, table: &str) -> Result<Self, Error> {
        if !sql::valid_table_name(table) {
            return Err(ErrorKind::InvalidTableName(table.to_string()).into());
        }

        let conn = establish_connection(url)?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Drops and recreates the base table, then bulk-loads the delimited
    /// ratings file into it, discarding the timestamp column at the end.
    /// Returns the number of loaded rows.
    pub fn load_ratings(
        &self,
        path: impl AsRef<Path>,
        separator: &str,
        chunk_size: usize,
    ) -> Result<usize, Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        log::info!("Collecting records for {}", self.table);
        let mut ratings = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            ratings.push(NewRating::parse(&line, separator, number + 1)?);
        }

        let chunk_size = chunk_size.max(1);
        self.conn.transaction::<_, Error, _>(|| {
            sql_query(sql::drop_table(&self.table)).execute(&self.conn)?;
            sql_query(sql::create_base_table(&self.table)).execute(&self.conn)?;

            log::info!("Pushing {} ratings by chunks", ratings.len());
            for chunk in ratings.chunks(chunk_size).progress() {
                let values: Vec<String> = chunk.iter().map(NewRating::to_values_tuple).collect();
                let stmt = format!(
                    "INSERT INTO {} (userid, movieid, rating, timestamp) VALUES {}",
                    self.table,
                    values.join(", ")
                );

                sql_query(stmt).execute(&self.conn)?;
            }

            sql_query(sql::drop_timestamp_column(&self.table)).execute(&self.conn)?;
            Ok(ratings.len())
        })
    }

    /// (Re)materializes the range scheme: drops any previous range
    /// partitions, creates `partitions` empty tables and redistributes
    /// every base row into its rating bin.
    pub fn range_partition(&self, partitions: usize) -> Result<(), Error> {
        if partitions == 0 {
            return Err(ErrorKind::ZeroPartitions.into());
        }

        self.conn.transaction::<_, Error, _>(|| {
            for bin in 0..partitions {
                let table = Scheme::Range.table(bin);
                sql_query(sql::drop_table(&table)).execute(&self.conn)?;
                sql_query(sql::create_partition_table(&table)).execute(&self.conn)?;
                sql_query(sql::fill_range_partition(&table, &self.table, bin, partitions))
                    .execute(&self.conn)?;
            }

            Ok(())
        })?;

        log::info!("Materialized {} range partitions", partitions);
        Ok(())
    }

    /// (Re)materializes the round-robin scheme: row k of the base table
    /// (in insertion order) lands in partition (k - 1) mod n.
    pub fn round_robin_partition(&self, partitions: usize) -> Result<(), Error> {
        if partitions == 0 {
            return Err(ErrorKind::ZeroPartitions.into());
        }

        self.conn.transaction::<_, Error, _>(|| {
            for index in 0..partitions {
                let table = Scheme::RoundRobin.table(index);
                sql_query(sql::drop_table(&table)).execute(&self.conn)?;
                sql_query(sql::create_partition_table(&table)).execute(&self.conn)?;
                sql_query(sql::fill_round_robin_partition(
                    &table,
                    &self.table,
                    index,
                    partitions,
                ))
                .execute(&self.conn)?;
            }

            Ok(())
        })?;

        log::info!("Materialized {} round-robin partitions", partitions);
        Ok(())
    }

    /// Inserts one rating into the base table and into the range
    /// partition its rating bin selects. Fails before any write if the
    /// input is invalid or the scheme is not materialized.
    pub fn range_insert(&self, userid: i32, movieid: i32, rating: f64) -> Result<(), Error> {
        validate_row(userid, movieid, rating)?;

        let partitions = self.count_partitions(Scheme::Range)?;
        if partitions == 0 {
            return Err(ErrorKind::MissingPartitions(Scheme::Range.name()).into());
        }

        let bin = bin_for_rating(rating, partitions);
        let target = Scheme::Range.table(bin);

        self.conn.transaction::<_, Error, _>(|| {
            self.insert_into(&self.table, userid, movieid, rating)?;
            self.insert_into(&target, userid, movieid, rating)?;
            Ok(())
        })
    }

    /// Inserts one rating into the base table and into the round-robin
    /// partition selected by the current base row count. The
    /// count-then-insert sequence is a read-modify-write race under
    /// concurrent callers.
    pub fn round_robin_insert(&self, userid: i32, movieid: i32, rating: f64) -> Result<(), Error> {
        validate_row(userid, movieid, rating)?;

        let partitions = self.count_partitions(Scheme::RoundRobin)?;
        if partitions == 0 {
            return Err(ErrorKind::MissingPartitions(Scheme::RoundRobin.name()).into());
        }

        self.conn.transaction::<_, Error, _>(|| {
            let current: RowCount =
                sql_query(sql::count_rows(&self.table)).get_result(&self.conn)?;
            let target = Scheme::RoundRobin.table(round_robin_slot(current.count, partitions));

            self.insert_into(&self.table, userid, movieid, rating)?;
            self.insert_into(&target, userid, movieid, rating)?;
            Ok(())
        })
    }

    /// Number of live partition tables of a scheme, per the catalog.
    pub fn count_partitions(&self, scheme: Scheme) -> Result<usize, Error> {
        let counted: RowCount = sql_query(sql::count_partition_tables())
            .bind::<Text, _>(sql::partition_pattern(scheme.prefix()))
            .get_result(&self.conn)?;

        Ok(counted.count as usize)
    }

    /// Per-partition row counts of a scheme, in index order.
    pub fn partition_sizes(&self, scheme: Scheme) -> Result<Vec<(String, i64)>, Error> {
        let partitions = self.count_partitions(scheme)?;

        let mut sizes = Vec::with_capacity(partitions);
        for index in 0..partitions {
            let table = scheme.table(index);
            let counted: RowCount = sql_query(sql::count_rows(&table)).get_result(&self.conn)?;
            sizes.push((table, counted.count));
        }

        Ok(sizes)
    }

    fn insert_into(&self, table: &str, userid: i32, movieid: i32, rating: f64) -> Result<(), Error> {
        sql_query(sql::insert_row(table))
            .bind::<Integer, _>(userid)
            .bind::<Integer, _>(movieid)
            .bind::<Double, _>(rating)
            .execute(&self.conn)?;

        Ok(())
    }
}

fn validate_row(userid: i32, movieid: i32, rating: f64) -> Result<(), Error> {
    if userid <= 0 || movieid <= 0 {
        return Err(ErrorKind::InvalidIds(userid, movieid).into());
    }

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ErrorKind::RatingOutOfRange(rating).into());
    }

    Ok(())
}
