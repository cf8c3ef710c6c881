//! Link source implementations.
//!
//! This module contains the concrete [`LinkSource`](crate::source::LinkSource)
//! implementations shipped with the crate.
//!
//! # Available Sources
//!
//! - [`AlmasSource`] - Almas Movie (almasmovie.website)

pub mod almas;

pub use almas::AlmasSource;
