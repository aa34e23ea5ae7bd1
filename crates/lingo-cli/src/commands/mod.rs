//! CLI command implementations.

mod check;
mod coverage;
mod resolve;

pub use check::{CheckArgs, run_check};
pub use coverage::{CoverageArgs, run_coverage};
pub use resolve::{ResolveArgs, run_resolve};
