/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/


use crate::{
    dice_types::{Expression, Mode, Sign, SignedTerm, Term},
    error::SyntaxError,
    limits::Limits,
};

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, one_of, satisfy},
    combinator::{eof, map, map_res, opt, peek, value},
    sequence::{delimited, terminated, tuple},
    IResult,
};

#[cfg(feature = "logging")]
use log::debug;

fn is_term_end(c: char) -> bool {
    c.is_whitespace() || c == '+' || c == '-'
}

pub fn whitespace0(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace())(input)
}

pub fn parse_sign(input: &str) -> IResult<&str, Sign> {
    map(opt(one_of("+-")), |sign| match sign {
        Some('-') => Sign::Negative,
        _ => Sign::Positive,
    })(input)
}

/// Optional sign with the whitespace around it.
pub fn parse_sign_prefix(input: &str) -> IResult<&str, Sign> {
    delimited(whitespace0, parse_sign, whitespace0)(input)
}

pub fn parse_u32(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

pub fn parse_i64(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |s: &str| s.parse::<i64>())(input)
}

pub fn parse_mode(input: &str) -> IResult<&str, Mode> {
    alt((
        value(Mode::Advantage, char('a')),
        value(Mode::Disadvantage, char('d')),
    ))(input)
}

/// Succeeds without consuming if a constant may end here.
pub fn term_end(input: &str) -> IResult<&str, ()> {
    peek(alt((value((), eof), value((), satisfy(is_term_end)))))(input)
}

pub fn parse_throw(input: &str) -> IResult<&str, SignedTerm> {
    map(
        tuple((parse_sign_prefix, opt(parse_u32), char('d'), parse_u32)),
        |(sign, count, _, sides)| {
            SignedTerm::new(
                sign,
                Term::Throw {
                    count: count.unwrap_or(Term::DEFAULT_THROW_COUNT),
                    sides,
                },
            )
        },
    )(input)
}

pub fn parse_advantage(input: &str) -> IResult<&str, SignedTerm> {
    map(
        tuple((
            parse_sign_prefix,
            opt(parse_u32),
            parse_mode,
            char('d'),
            parse_u32,
        )),
        |(sign, count, mode, _, sides)| {
            SignedTerm::new(
                sign,
                Term::AdvantageThrow {
                    count: count.unwrap_or(Term::DEFAULT_ADVANTAGE_COUNT),
                    sides,
                    mode,
                },
            )
        },
    )(input)
}

pub fn parse_number(input: &str) -> IResult<&str, SignedTerm> {
    map(
        terminated(tuple((parse_sign_prefix, parse_i64)), term_end),
        |(sign, value)| SignedTerm::new(sign, Term::Constant(value)),
    )(input)
}

/// What the matcher found at the current position.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Match<'a> {
    /// A term and the input left after it.
    Term(SignedTerm, &'a str),
    /// Free text after the last term, trimmed.
    Description(&'a str),
    /// Nothing but whitespace is left.
    End,
}

/// Recognises the term at the start of `input`.
///
/// All three term shapes are tried; an advantage throw wins over a plain
/// throw, which wins over a constant. Terms outside of `limits` are syntax
/// errors at the position they start.
pub fn match_term<'a>(input: &'a str, limits: &Limits) -> Result<Match<'a>, SyntaxError> {
    let advantage = parse_advantage(input);
    let throw = parse_throw(input);
    let number = parse_number(input);
    match advantage.or(throw).or(number) {
        Ok((rest, term)) => {
            debug_assert!(rest.len() < input.len(), "matched term consumed no input");
            if limits.allows(&term.term) {
                #[cfg(feature = "logging")]
                {
                    debug!("matched {} leaving {:?}", &term, rest)
                }
                Ok(Match::Term(term, rest))
            } else {
                Err(SyntaxError::at(input))
            }
        }
        Err(_) => {
            let description = input.trim();
            if description.is_empty() {
                Ok(Match::End)
            } else if input.starts_with(|c: char| c.is_whitespace()) {
                Ok(Match::Description(description))
            } else {
                Err(SyntaxError::at(input))
            }
        }
    }
}

/// Reads a whole roll without evaluating it.
pub fn parse_expression(input: &str, limits: &Limits) -> Result<Expression, SyntaxError> {
    let mut expression = Expression::default();
    let mut rest = input;
    loop {
        match match_term(rest, limits)? {
            Match::Term(term, remaining) => {
                expression.terms.push(term);
                rest = remaining;
            }
            Match::Description(description) => {
                expression.description = Some(description.to_string());
                return Ok(expression);
            }
            Match::End => return Ok(expression),
        }
    }
}
