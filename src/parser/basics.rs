// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use nom::bytes::complete::{tag, take_till1, take_while};
use nom::character::complete::{char, digit1};
use nom::combinator::{map_res, opt, recognize};
use nom::sequence::{pair, preceded};
use nom::{sequence::delimited, IResult};

pub(crate) fn parse_string(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_till1(|c: char| c == '\''), char('\''))(input)
}

pub(crate) fn parse_number(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |s: &str| s.parse::<i64>())(input)
}

// Ids are INTEGER columns; parsing into i32 rejects over-range input
// instead of wrapping it.
pub(crate) fn parse_id(input: &str) -> IResult<&str, i32> {
    map_res(digit1, |s: &str| s.parse::<i32>())(input)
}

pub(crate) fn parse_float(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(preceded(char('.'), digit1)))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

pub(crate) fn parse_separator(input: &str) -> IResult<&str, &str> {
    delimited(
        take_while(|c: char| c == ' '),
        tag(","),
        take_while(|c: char| c == ' '),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string() {
        let parsed = parse_string("'data/ratings.dat'");
        let expected = ("", "data/ratings.dat");

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_string("'ml-10m.dat' trailing");
        let expected = (" trailing", "ml-10m.dat");

        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_numbers() {
        let parsed = parse_number("12345");
        let expected = ("", 12345);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_number("12c3");
        let expected = ("c3", 12);
        assert_eq!(parsed, Ok(expected));
    }

    #[test]
    fn test_parse_ids() {
        let parsed = parse_id("610");
        let expected = ("", 610);

        assert_eq!(parsed, Ok(expected));

        // One past i32::MAX must fail rather than wrap.
        assert!(parse_id("2147483648").is_err());
        assert!(parse_id("4294967297").is_err());
    }

    #[test]
    fn test_parse_floats() {
        let parsed = parse_float("3.5");
        let expected = ("", 3.5);

        assert_eq!(parsed, Ok(expected));

        let parsed = parse_float("4)");
        let expected = (")", 4.);
        assert_eq!(parsed, Ok(expected));

        assert!(parse_float(".5").is_err());
    }
}
