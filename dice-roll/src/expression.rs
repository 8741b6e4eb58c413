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
    dice_roll::{Evaluate, RandomSource},
    dice_types::RollResult,
    error::SyntaxError,
    limits::Limits,
    parser::{match_term, Match},
};

#[cfg(feature = "logging")]
use log::debug;

/// Parses and evaluates `input` one term at a time.
///
/// Stops successfully once only whitespace is left or trailing free text is
/// found, and fails on the first remainder that is neither a term nor
/// whitespace-separated text.
pub fn roll<R: RandomSource + ?Sized>(
    input: &str,
    limits: &Limits,
    rng: &mut R,
) -> Result<RollResult, SyntaxError> {
    let mut result = RollResult::default();
    let mut rest = input;
    loop {
        match match_term(rest, limits)? {
            Match::Term(term, remaining) => {
                result.terms.push(term.evaluate(rng));
                rest = remaining;
            }
            Match::Description(description) => {
                result.description = Some(description.to_string());
                break;
            }
            Match::End => break,
        }
    }
    #[cfg(feature = "logging")]
    {
        debug!("rolled {:?} for {:?}", &result, input)
    }
    Ok(result)
}

/// Reply text for a roll: the formatted result or the syntax error.
pub fn roll_text<R: RandomSource + ?Sized>(input: &str, limits: &Limits, rng: &mut R) -> String {
    match roll(input, limits, rng) {
        Ok(result) => result.to_string(),
        Err(err) => err.to_string(),
    }
}
