//! Core traits for distributions and random sources.
//!
//! This module defines the two seams the upper layers are built on:
//! - [`ContinuousDistribution`]: what fitting and sampling need from a
//!   distribution instance
//! - [`RandomSource`]: the uniform bit stream every generator provides
//!
//! Both traits are object safe. Families are held as
//! `Box<dyn ContinuousDistribution>` and sampled through
//! `&mut dyn RandomSource`, so a family needs no central dispatch table.

pub mod distribution;
pub mod random;

pub use distribution::ContinuousDistribution;
pub use random::RandomSource;
