use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use roller_dice::{
    parser::parse_expression, DiceLimits, Evaluate, Expression, Limits, RandomSource, Term,
};
use std::{convert::TryFrom, error::Error};

/// Largest histogram this tool is willing to allocate.
const MAX_BUCKETS: i64 = 10_000_000;

/// Passes draws through while keeping a copy of every face.
struct Recording<R> {
    inner: R,
    faces: Vec<u32>,
}

impl<R: RandomSource> RandomSource for Recording<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let face = self.inner.roll_die(sides);
        self.faces.push(face);
        face
    }
}

fn largest_die(expr: &Expression) -> u32 {
    expr.terms
        .iter()
        .filter_map(|t| match t.term {
            Term::Throw { sides, .. } | Term::AdvantageThrow { sides, .. } => Some(sides),
            Term::Constant(_) => None,
        })
        .max()
        .unwrap_or(0)
}

fn bucket(histogram: &mut [i64], offset: i64, value: i64) {
    if let Some(cell) = usize::try_from(value - offset + 1)
        .ok()
        .and_then(|index| histogram.get_mut(index))
    {
        *cell += 1;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .ok_or("usage: roll-cmd <expression> [samples]")?;
    let samples: u32 = match args.next() {
        Some(a) => a.parse()?,
        None => 1,
    };
    let expr = parse_expression(&input, &Limits::default())?;

    let (result_min, result_max) = (expr.min(), expr.max());
    if result_max - result_min >= MAX_BUCKETS {
        return Err(format!("range {}..={} is too wide to sample", result_min, result_max).into());
    }
    let mut totals: Vec<i64> = vec![0; usize::try_from(result_max - result_min + 2)?];
    totals[0] = result_min;

    let sides = largest_die(&expr);
    let mut faces: Vec<i64> = vec![0; usize::try_from(sides)? + 1];
    faces[0] = 1;

    let mut master_rng = ChaCha20Rng::from_entropy();
    for _ in 0..samples {
        let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
        master_rng.fill(&mut seed);
        let mut rng = Recording {
            inner: Xoshiro256PlusPlus::from_seed(seed),
            faces: Vec::new(),
        };
        let result = expr.evaluate(&mut rng);
        bucket(&mut totals, result_min, result.total());
        for face in rng.faces {
            bucket(&mut faces, 1, i64::from(face));
        }
    }

    npy::to_file("totals.npy", totals)?;
    npy::to_file("faces.npy", faces)?;
    Ok(())
}
