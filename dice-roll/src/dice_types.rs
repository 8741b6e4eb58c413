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


#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

impl Default for Sign {
    fn default() -> Self {
        Sign::Positive
    }
}

/// Which of the rolled dice an advantage throw keeps.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Keep the highest die.
    Advantage,
    /// Keep the lowest die.
    Disadvantage,
}

impl Mode {
    pub fn letter(self) -> char {
        match self {
            Mode::Advantage => 'a',
            Mode::Disadvantage => 'd',
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum Term {
    Throw { count: u32, sides: u32 },
    AdvantageThrow { count: u32, sides: u32, mode: Mode },
    Constant(i64),
}

impl Term {
    pub const DEFAULT_THROW_COUNT: u32 = 1;
    pub const DEFAULT_ADVANTAGE_COUNT: u32 = 2;
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Throw { count, sides } => write!(f, "{}d{}", count, sides),
            Term::AdvantageThrow { count, sides, mode } => {
                write!(f, "{}{}d{}", count, mode.letter(), sides)
            }
            Term::Constant(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SignedTerm {
    pub sign: Sign,
    pub term: Term,
}

impl SignedTerm {
    pub fn new(sign: Sign, term: Term) -> SignedTerm {
        SignedTerm { sign, term }
    }

    pub fn positive(term: Term) -> SignedTerm {
        SignedTerm::new(Sign::Positive, term)
    }

    pub fn negative(term: Term) -> SignedTerm {
        SignedTerm::new(Sign::Negative, term)
    }
}

impl fmt::Display for SignedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Positive => write!(f, "{}", self.term),
            Sign::Negative => write!(f, "-{}", self.term),
        }
    }
}

/// A parsed roll: the terms in input order plus the trailing free text.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct Expression {
    pub terms: Vec<SignedTerm>,
    pub description: Option<String>,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.terms.iter().map(|t| (t.sign, t.term.to_string())))?;
        if let Some(description) = &self.description {
            write!(f, " {}", description)?;
        }
        Ok(())
    }
}

/// Outcome of evaluating one term. `display` holds the drawn dice and is
/// fixed at evaluation time.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct EvaluatedTerm {
    pub sign: Sign,
    pub value: i64,
    pub display: String,
}

impl EvaluatedTerm {
    pub fn signed_value(&self) -> i64 {
        self.sign.factor() * self.value
    }
}

/// A finished roll. Formats as `<total>: <breakdown>[ <description>]`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RollResult {
    pub terms: Vec<EvaluatedTerm>,
    pub description: Option<String>,
}

impl RollResult {
    pub fn total(&self) -> i64 {
        self.terms.iter().map(EvaluatedTerm::signed_value).sum()
    }

    pub fn breakdown(&self) -> String {
        let mut breakdown = String::new();
        for (index, term) in self.terms.iter().enumerate() {
            match (index, term.sign) {
                (0, Sign::Positive) => {}
                (0, Sign::Negative) => breakdown.push('-'),
                (_, Sign::Positive) => breakdown.push_str(" + "),
                (_, Sign::Negative) => breakdown.push_str(" - "),
            }
            breakdown.push_str(&term.display);
        }
        breakdown
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.total(), self.breakdown())?;
        if let Some(description) = &self.description {
            write!(f, " {}", description)?;
        }
        Ok(())
    }
}

fn write_joined<I: Iterator<Item = (Sign, String)>>(
    f: &mut fmt::Formatter<'_>,
    mut parts: I,
) -> fmt::Result {
    if let Some((sign, first)) = parts.next() {
        if sign == Sign::Negative {
            write!(f, "-")?;
        }
        write!(f, "{}", first)?;
        for (sign, part) in parts {
            match sign {
                Sign::Positive => write!(f, " + {}", part)?,
                Sign::Negative => write!(f, " - {}", part)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(sign: Sign, value: i64, display: &str) -> EvaluatedTerm {
        EvaluatedTerm {
            sign,
            value,
            display: display.to_string(),
        }
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::Throw { count: 2, sides: 20 }.to_string(), "2d20");
        assert_eq!(
            Term::AdvantageThrow {
                count: 2,
                sides: 20,
                mode: Mode::Disadvantage
            }
            .to_string(),
            "2dd20"
        );
        assert_eq!(Term::Constant(7).to_string(), "7");
        assert_eq!(SignedTerm::negative(Term::Constant(7)).to_string(), "-7");
    }

    #[test]
    fn test_expression_display() {
        let expr = Expression {
            terms: vec![
                SignedTerm::negative(Term::Throw { count: 1, sides: 6 }),
                SignedTerm::positive(Term::AdvantageThrow {
                    count: 2,
                    sides: 20,
                    mode: Mode::Advantage,
                }),
                SignedTerm::negative(Term::Constant(3)),
            ],
            description: Some("to hit".to_string()),
        };
        assert_eq!(expr.to_string(), "-1d6 + 2ad20 - 3 to hit");
        assert_eq!(Expression::default().to_string(), "");
    }

    #[test]
    fn test_result_breakdown() {
        let result = RollResult {
            terms: vec![
                evaluated(Sign::Positive, 25, "(12+13)"),
                evaluated(Sign::Negative, 4, "(4)"),
                evaluated(Sign::Positive, 10, "10"),
            ],
            description: None,
        };
        assert_eq!(result.total(), 31);
        assert_eq!(result.breakdown(), "(12+13) - (4) + 10");
        assert_eq!(result.to_string(), "31: (12+13) - (4) + 10");
    }

    #[test]
    fn test_result_leading_negative() {
        let result = RollResult {
            terms: vec![
                evaluated(Sign::Negative, 17, "a(3,17)"),
                evaluated(Sign::Positive, 2, "2"),
            ],
            description: Some("fire damage".to_string()),
        };
        assert_eq!(result.to_string(), "-15: -a(3,17) + 2 fire damage");
    }

    #[test]
    fn test_result_rendering_is_stable() {
        let result = RollResult {
            terms: vec![evaluated(Sign::Positive, 0, "()")],
            description: None,
        };
        let first = result.to_string();
        assert_eq!(first, "0: ()");
        assert_eq!(result.to_string(), first);
        assert_eq!(RollResult::default().to_string(), "0: ");
    }
}
