use crate::dice_types::*;

/// Smallest and largest value a term can contribute, sign included.
pub trait DiceLimits {
    fn min(&self) -> i64;
    fn max(&self) -> i64;
}

impl DiceLimits for Term {
    fn min(&self) -> i64 {
        match self {
            Term::Throw { count, .. } => i64::from(*count),
            Term::AdvantageThrow { count, .. } => i64::from(*count).min(1),
            Term::Constant(value) => *value,
        }
    }

    fn max(&self) -> i64 {
        match self {
            Term::Throw { count, sides } => i64::from(*count) * i64::from(*sides),
            Term::AdvantageThrow { count: 0, .. } => 0,
            Term::AdvantageThrow { sides, .. } => i64::from(*sides),
            Term::Constant(value) => *value,
        }
    }
}

impl DiceLimits for SignedTerm {
    fn min(&self) -> i64 {
        match self.sign {
            Sign::Positive => self.term.min(),
            Sign::Negative => -self.term.max(),
        }
    }

    fn max(&self) -> i64 {
        match self.sign {
            Sign::Positive => self.term.max(),
            Sign::Negative => -self.term.min(),
        }
    }
}

impl DiceLimits for Expression {
    fn min(&self) -> i64 {
        self.terms.iter().map(DiceLimits::min).sum()
    }

    fn max(&self) -> i64 {
        self.terms.iter().map(DiceLimits::max).sum()
    }
}

/// Upper bounds the matcher enforces on every captured number.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Limits {
    pub max_count: u32,
    pub max_sides: u32,
    pub max_constant: i64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_count: 1000,
            max_sides: 1_000_000,
            max_constant: 1_000_000_000,
        }
    }
}

impl Limits {
    /// Whether `term` may be evaluated. Zero-sided dice are never allowed.
    pub fn allows(&self, term: &Term) -> bool {
        match term {
            Term::Throw { count, sides } | Term::AdvantageThrow { count, sides, .. } => {
                *count <= self.max_count && *sides >= 1 && *sides <= self.max_sides
            }
            Term::Constant(value) => *value <= self.max_constant,
        }
    }
}
