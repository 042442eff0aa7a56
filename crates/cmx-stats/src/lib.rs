//! cmx-stats - Rank-based statistics for comparing experiment configurations
//!
//! This crate provides the statistical engine used to compare samples of a
//! metric between configurations:
//!
//! - **Vargha-Delaney A₁₂**: probability that a value from one sample is
//!   larger than one from the other
//! - **Mann-Whitney U**: two-sided test for a difference between two samples
//! - **Kruskal-Wallis H**: rank-based one-way ANOVA over two or more samples
//! - **Summary statistics**: mean, variance, median and friends
//!
//! # Design
//!
//! All functions are pure and take plain `&[f64]` samples. Ranking uses
//! mid-ranks for ties throughout, so effect sizes and p-values agree with
//! each other on tied data. Empty samples and non-finite values are
//! rejected with [`StatsError::InvalidInput`] instead of propagating NaN.

pub mod effect_size;
pub mod error;
pub mod kruskal;
pub mod mann_whitney;
pub mod rank;
pub mod summary;

pub use effect_size::*;
pub use error::{StatsError, StatsResult};
pub use kruskal::*;
pub use mann_whitney::*;
pub use rank::{rank_average, Ranking};
pub use summary::*;
