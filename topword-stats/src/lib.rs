// topword-stats/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod normal;
pub mod quartiles;
pub mod statistics;
pub mod ztest;

pub use ztest::{z_test, ZTestOutcome};

/// Common type definitions
pub type PValue = f64;
