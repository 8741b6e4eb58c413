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


//! Evaluation of flat dice expressions such as `2d20+5 damage` or
//! `ad20 - d10 + 3`.
//!
//! ```
//! use roller_dice::{roll_text, Limits, ScriptedRolls};
//!
//! let mut rng = ScriptedRolls::new(vec![14, 6, 3]);
//! assert_eq!(
//!     roll_text("2d20-d10+10", &Limits::default(), &mut rng),
//!     "27: (14+6) - (3) + 10"
//! );
//! ```

pub mod dice_types;
pub mod error;
pub mod limits;

#[cfg(feature = "parser")]
pub mod parser;

#[cfg(feature = "roll")]
pub mod dice_roll;

#[cfg(all(feature = "parser", feature = "roll"))]
pub mod expression;

pub use dice_types::*;
pub use error::SyntaxError;
pub use limits::{DiceLimits, Limits};

#[cfg(feature = "roll")]
pub use dice_roll::{Evaluate, RandomSource, ScriptedRolls};

#[cfg(all(feature = "parser", feature = "roll"))]
pub use expression::{roll, roll_text};
