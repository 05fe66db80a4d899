//! nutrikit
//!
//! Ingredient nutrition core: scaled nutrient values, energy plausibility
//! checks and paginated catalogue fetching.

pub mod build_info;
pub mod fetch;
pub mod models;
pub mod nutrition;
