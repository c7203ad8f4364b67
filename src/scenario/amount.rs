//! Fixed or dice-rolled quantities
//!
//! Scripts write amounts either as integers or as short dice expressions:
//! `d6+2`, `-d6`, `6-d6`, `2d6`. Only six-sided dice exist in these books.

use std::fmt;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0, one_of};
use nom::combinator::{all_consuming, map, map_res, opt, verify};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use serde::Deserialize;

use crate::core::dice::DieSource;
use crate::core::error::{Result, SimError};

/// Largest die count or constant a single term may hold
pub const MAX_TERM: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Flat(i32),
    Dice(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Part {
    sign: i32,
    term: Term,
}

/// A quantity that may need dice to resolve
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AmountRepr")]
pub struct Amount {
    parts: Vec<Part>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Fixed(i64),
    Expr(String),
}

impl TryFrom<AmountRepr> for Amount {
    type Error = SimError;

    fn try_from(repr: AmountRepr) -> Result<Self> {
        match repr {
            AmountRepr::Fixed(n) if n.unsigned_abs() <= u64::from(MAX_TERM) => {
                Ok(Amount::fixed(n as i32))
            }
            AmountRepr::Fixed(n) => Err(SimError::DiceExpression(n.to_string())),
            AmountRepr::Expr(text) => Amount::parse(&text),
        }
    }
}

impl From<i32> for Amount {
    fn from(n: i32) -> Self {
        Amount::fixed(n)
    }
}

impl Amount {
    pub fn fixed(n: i32) -> Self {
        Self {
            parts: vec![Part {
                sign: 1,
                term: Term::Flat(n),
            }],
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        all_consuming(expression)
            .parse(text)
            .map(|(_, parts)| Self { parts })
            .map_err(|_| SimError::DiceExpression(text.to_string()))
    }

    /// Resolve the amount, rolling dice left to right
    pub fn roll(&self, dice: &mut impl DieSource) -> i32 {
        self.parts
            .iter()
            .map(|part| {
                let value = match part.term {
                    Term::Flat(n) => n,
                    Term::Dice(count) => dice.roll(count),
                };
                part.sign * value
            })
            .sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            match (i, part.sign) {
                (0, -1) => write!(f, "-")?,
                (0, _) => {}
                (_, -1) => write!(f, "-")?,
                _ => write!(f, "+")?,
            }
            match part.term {
                Term::Flat(n) => write!(f, "{}", n)?,
                Term::Dice(1) => write!(f, "d6")?,
                Term::Dice(count) => write!(f, "{}d6", count)?,
            }
        }
        Ok(())
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    verify(map_res(digit1, str::parse::<u32>), |n| *n <= MAX_TERM).parse(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    alt((
        map((opt(number), one_of("dD"), tag("6")), |(count, _, _)| {
            Term::Dice(count.unwrap_or(1))
        }),
        map_res(number, |n| i32::try_from(n).map(Term::Flat)),
    ))
    .parse(input)
}

fn sign(input: &str) -> IResult<&str, i32> {
    map(delimited(multispace0, one_of("+-"), multispace0), |c| {
        if c == '-' {
            -1
        } else {
            1
        }
    })
    .parse(input)
}

fn expression(input: &str) -> IResult<&str, Vec<Part>> {
    map(
        delimited(multispace0, (opt(sign), term, many0((sign, term))), multispace0),
        |(first_sign, first, rest)| {
            let mut parts = vec![Part {
                sign: first_sign.unwrap_or(1),
                term: first,
            }];
            parts.extend(rest.into_iter().map(|(sign, term)| Part { sign, term }));
            parts
        },
    )
    .parse(input)
}
