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


use crate::dice_types::*;
use rand::{distributions::Uniform, Rng};

#[cfg(feature = "logging")]
use log::debug;

/// Source of die faces for evaluation.
pub trait RandomSource {
    /// Draws one face uniformly from `1..=sides`.
    ///
    /// # Panics
    ///
    /// Implementations backed by [`Rng`] panic if `sides` is zero.
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.sample(Uniform::new_inclusive(1, sides))
    }
}

/// Replays a fixed list of faces, starting over once it runs out. Faces are
/// clamped into `1..=sides` of the die being rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRolls {
    faces: Vec<u32>,
    position: usize,
}

impl ScriptedRolls {
    pub fn new<I: IntoIterator<Item = u32>>(faces: I) -> ScriptedRolls {
        ScriptedRolls {
            faces: faces.into_iter().collect(),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedRolls {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.position % self.faces.len()];
        self.position += 1;
        face.min(sides).max(1)
    }
}

fn roll_faces<R: RandomSource + ?Sized>(count: u32, sides: u32, rng: &mut R) -> Vec<u32> {
    debug_assert!(sides >= 1, "dice need at least one side");
    (0..count).map(|_| rng.roll_die(sides)).collect()
}

fn join_faces(faces: &[u32], separator: &str) -> String {
    faces
        .iter()
        .map(|face| face.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

pub trait Evaluate {
    type Output;

    fn evaluate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Self::Output;
}

/// Yields the unsigned value of the term and its display fragment.
impl Evaluate for Term {
    type Output = (i64, String);

    fn evaluate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (i64, String) {
        let result = match *self {
            Term::Throw { count, sides } => {
                let faces = roll_faces(count, sides, rng);
                (
                    faces.iter().copied().map(i64::from).sum(),
                    format!("({})", join_faces(&faces, "+")),
                )
            }
            Term::AdvantageThrow { count, sides, mode } => {
                let faces = roll_faces(count, sides, rng);
                let kept = match mode {
                    Mode::Advantage => faces.iter().max(),
                    Mode::Disadvantage => faces.iter().min(),
                };
                (
                    kept.copied().map(i64::from).unwrap_or(0),
                    format!("{}({})", mode.letter(), join_faces(&faces, ",")),
                )
            }
            Term::Constant(value) => (value, value.to_string()),
        };
        #[cfg(feature = "logging")]
        {
            debug!("got {:?} for term {}", &result, &self)
        }
        result
    }
}

impl Evaluate for SignedTerm {
    type Output = EvaluatedTerm;

    fn evaluate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> EvaluatedTerm {
        let (value, display) = self.term.evaluate(rng);
        EvaluatedTerm {
            sign: self.sign,
            value,
            display,
        }
    }
}

impl Evaluate for Expression {
    type Output = RollResult;

    fn evaluate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> RollResult {
        RollResult {
            terms: self.terms.iter().map(|term| term.evaluate(rng)).collect(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::DiceLimits;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_scripted_rolls() {
        let mut rng = ScriptedRolls::new(vec![3, 25, 0]);
        assert_eq!(rng.roll_die(6), 3);
        assert_eq!(rng.roll_die(20), 20);
        assert_eq!(rng.roll_die(6), 1);
        assert_eq!(rng.roll_die(6), 3);
        assert_eq!(ScriptedRolls::new(vec![]).roll_die(6), 1);
    }

    #[test]
    fn test_throw() {
        let mut rng = ScriptedRolls::new(vec![4, 17]);
        assert_eq!(
            Term::Throw { count: 2, sides: 20 }.evaluate(&mut rng),
            (21, "(4+17)".to_string())
        );
    }

    #[test]
    fn test_advantage() {
        let adv = Term::AdvantageThrow {
            count: 3,
            sides: 20,
            mode: Mode::Advantage,
        };
        let dis = Term::AdvantageThrow {
            count: 3,
            sides: 20,
            mode: Mode::Disadvantage,
        };
        assert_eq!(
            adv.evaluate(&mut ScriptedRolls::new(vec![5, 19, 2])),
            (19, "a(5,19,2)".to_string())
        );
        assert_eq!(
            dis.evaluate(&mut ScriptedRolls::new(vec![5, 19, 2])),
            (2, "d(5,19,2)".to_string())
        );
    }

    #[test]
    fn test_zero_dice() {
        let mut rng = ScriptedRolls::new(vec![6]);
        assert_eq!(
            Term::Throw { count: 0, sides: 6 }.evaluate(&mut rng),
            (0, "()".to_string())
        );
        assert_eq!(
            Term::AdvantageThrow {
                count: 0,
                sides: 6,
                mode: Mode::Disadvantage
            }
            .evaluate(&mut rng),
            (0, "d()".to_string())
        );
    }

    #[test]
    fn test_constant() {
        let mut rng = ScriptedRolls::new(vec![]);
        assert_eq!(Term::Constant(42).evaluate(&mut rng), (42, "42".to_string()));
    }

    #[test]
    fn test_signed_term() {
        let mut rng = ScriptedRolls::new(vec![7]);
        let evaluated = SignedTerm::negative(Term::Throw { count: 1, sides: 10 }).evaluate(&mut rng);
        assert_eq!(
            evaluated,
            EvaluatedTerm {
                sign: Sign::Negative,
                value: 7,
                display: "(7)".to_string()
            }
        );
        assert_eq!(evaluated.signed_value(), -7);
    }

    #[test]
    fn test_throw_bounds() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
        for &(count, sides) in &[(1, 1), (1, 20), (3, 6), (10, 4), (50, 100)] {
            let term = Term::Throw { count, sides };
            for _ in 0..200 {
                let (value, display) = term.evaluate(&mut rng);
                assert!(value >= term.min() && value <= term.max());
                let inner = &display[1..display.len() - 1];
                let faces: Vec<u32> = inner.split('+').map(|f| f.parse().unwrap()).collect();
                assert_eq!(faces.len(), count as usize);
                assert!(faces.iter().all(|f| *f >= 1 && *f <= sides));
                assert_eq!(faces.iter().map(|f| i64::from(*f)).sum::<i64>(), value);
            }
        }
    }

    #[test]
    fn test_advantage_picks_extreme() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(20);
        for &mode in &[Mode::Advantage, Mode::Disadvantage] {
            let term = Term::AdvantageThrow {
                count: 4,
                sides: 12,
                mode,
            };
            for _ in 0..200 {
                let (value, display) = term.evaluate(&mut rng);
                let faces: Vec<i64> = display[2..display.len() - 1]
                    .split(',')
                    .map(|f| f.parse().unwrap())
                    .collect();
                assert_eq!(faces.len(), 4);
                let expected = match mode {
                    Mode::Advantage => faces.iter().max(),
                    Mode::Disadvantage => faces.iter().min(),
                };
                assert_eq!(Some(&value), expected);
            }
        }
    }

    #[test]
    fn test_expression() {
        let expr = Expression {
            terms: vec![
                SignedTerm::positive(Term::Throw { count: 2, sides: 20 }),
                SignedTerm::negative(Term::Throw { count: 1, sides: 10 }),
                SignedTerm::positive(Term::Constant(10)),
            ],
            description: Some("damage".to_string()),
        };
        let result = expr.evaluate(&mut ScriptedRolls::new(vec![12, 3, 9]));
        assert_eq!(result.total(), 12 + 3 - 9 + 10);
        assert_eq!(result.to_string(), "16: (12+3) - (9) + 10 damage");
    }
}
