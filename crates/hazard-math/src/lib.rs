//! # Hazard Math
//!
//! Numerical kernels for the Hazard credit analytics library.
//!
//! This crate provides:
//!
//! - **Solvers**: root bracketing and Brent refinement for the
//!   credit-curve bootstrap
//! - **Stable kernels**: series-expansion evaluation of the
//!   exponential-difference expressions at the heart of the ISDA
//!   integrals
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: the `(e^x - 1)/x` family switches to Taylor
//!   series near zero instead of surfacing cancellation error
//! - **Hard iteration caps**: solvers never loop unboundedly on
//!   non-convergent inputs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;
pub mod stable;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bracket_root, brent, Bracket, BracketConfig, SolverConfig, SolverResult,
    };
    pub use crate::stable::{epsilon, epsilon_p};
}

pub use error::{MathError, MathResult};
