use crate::error::ErrorKind;
use anyhow::Error;
use diesel::sql_types::BigInt;

#[derive(Debug, QueryableByName)]
pub struct RowCount {
    #[sql_type = "BigInt"]
    pub count: i64,
}

// A parsed line of the ratings file, timestamp still attached
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub userid: i32,
    pub movieid: i32,
    pub rating: f64,
    pub timestamp: i64,
}

impl NewRating {
    /// Parses one `user<sep>movie<sep>rating<sep>timestamp` line. The
    /// line number is 1-based and only used for error reporting.
    pub fn parse(line: &str, separator: &str, line_number: usize) -> Result<Self, Error> {
        let malformed = || ErrorKind::MalformedRow(line_number, line.to_string());

        let fields: Vec<&str> = line.trim_end().split(separator).collect();
        if fields.len() != 4 {
            return Err(malformed().into());
        }

        let userid: i32 = fields[0].parse().map_err(|_| malformed())?;
        let movieid: i32 = fields[1].parse().map_err(|_| malformed())?;
        let rating: f64 = fields[2].parse().map_err(|_| malformed())?;
        let timestamp: i64 = fields[3].parse().map_err(|_| malformed())?;

        Ok(Self {
            userid,
            movieid,
            rating,
            timestamp,
        })
    }

    /// One `(a, b, c, d)` tuple of a multi-row VALUES list. All four
    /// fields are parsed numbers, so the rendered text is inert.
    pub fn to_values_tuple(&self) -> String {
        format!(
            "({}, {}, {}, {})",
            self.userid, self.movieid, self.rating, self.timestamp
        )
    }
}
