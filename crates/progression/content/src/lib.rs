//! Static content tables and loaders.
//!
//! This crate houses the built-in skill tree, achievement list, shop
//! catalog, and loot table, and provides JSON loaders so deployments can
//! override any of them from data files. Content is consumed through the
//! core's oracle traits and never appears in engine state.

mod builtin;
mod pack;

pub use builtin::{
    builtin_achievements, builtin_loot_table, builtin_shop_catalog, builtin_skills,
};
pub use pack::{ContentError, ContentPack};
