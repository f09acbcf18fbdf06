// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

mod basics;

use basics::{parse_float, parse_id, parse_number, parse_separator, parse_string};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::sequence::{delimited, tuple};
use nom::IResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Load(String),
    RangePartition(usize),
    RoundRobinPartition(usize),
    RangeInsert(i32, i32, f64),
    RoundRobinInsert(i32, i32, f64),
}

fn parse_insert_args(input: &str) -> IResult<&str, (i32, i32, f64)> {
    let (input, (userid, _, movieid, _, rating)) = delimited(
        char('('),
        tuple((
            parse_id,
            parse_separator,
            parse_id,
            parse_separator,
            parse_float,
        )),
        char(')'),
    )(input)?;

    Ok((input, (userid, movieid, rating)))
}

fn parse_statement(input: &str) -> IResult<&str, Statement> {
    let (input, statement_type) = alt((
        tag("rrobininsert"),
        tag("rrobinpart"),
        tag("rangeinsert"),
        tag("rangepart"),
        tag("load"),
    ))(input)?;

    let (input, statement) = match statement_type {
        "load" => {
            let (input, path) = delimited(char('('), parse_string, char(')'))(input)?;
            (input, Statement::Load(path.to_string()))
        }

        "rangepart" => {
            let (input, partitions) = delimited(char('('), parse_number, char(')'))(input)?;
            (input, Statement::RangePartition(partitions as usize))
        }

        "rrobinpart" => {
            let (input, partitions) = delimited(char('('), parse_number, char(')'))(input)?;
            (input, Statement::RoundRobinPartition(partitions as usize))
        }

        "rangeinsert" => {
            let (input, (userid, movieid, rating)) = parse_insert_args(input)?;
            (input, Statement::RangeInsert(userid, movieid, rating))
        }

        "rrobininsert" => {
            let (input, (userid, movieid, rating)) = parse_insert_args(input)?;
            (input, Statement::RoundRobinInsert(userid, movieid, rating))
        }

        _ => unreachable!(),
    };

    Ok((input, statement))
}

pub fn parse_line(input: &str) -> Option<Statement> {
    let input = input.trim();
    let (rest, statement) = parse_statement(input).ok()?;

    if rest.is_empty() {
        Some(statement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_statement() {
        let parsed = parse_line("load('data/ratings.dat')");
        let expected = Statement::Load("data/ratings.dat".to_string());

        assert_eq!(parsed, Some(expected));
    }

    #[test]
    fn partition_statements() {
        let parsed = parse_line("rangepart(5)");
        assert_eq!(parsed, Some(Statement::RangePartition(5)));

        let parsed = parse_line("rrobinpart(3)");
        assert_eq!(parsed, Some(Statement::RoundRobinPartition(3)));
    }

    #[test]
    fn insert_statements() {
        let parsed = parse_line("rangeinsert(1, 122, 3.5)");
        assert_eq!(parsed, Some(Statement::RangeInsert(1, 122, 3.5)));

        let parsed = parse_line("rrobininsert(610, 7, 4)");
        assert_eq!(parsed, Some(Statement::RoundRobinInsert(610, 7, 4.)));
    }

    #[test]
    fn reject_over_range_ids() {
        // 2^32 + 1 would wrap to user 1 under a plain cast.
        assert_eq!(parse_line("rangeinsert(4294967297, 1, 3.0)"), None);
        assert_eq!(parse_line("rrobininsert(1, 2147483648, 3.0)"), None);
    }

    #[test]
    fn parse_invalid_line() {
        assert_eq!(parse_line("rangepart()"), None);
        assert_eq!(parse_line("rangepart(5);"), None);
        assert_eq!(parse_line("load(data/ratings.dat)"), None);
        assert_eq!(parse_line("rangeinsert(1, 122)"), None);
    }

    #[test]
    fn parse_valid_line_with_spaces() {
        let parsed = parse_line("  rrobininsert(1,2, 0.5)  ");
        assert_eq!(parsed, Some(Statement::RoundRobinInsert(1, 2, 0.5)));
    }
}
