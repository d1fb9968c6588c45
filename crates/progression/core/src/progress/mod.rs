//! Reward math: earning application, multiplier resolution, loot rolls.
//!
//! Everything here is a pure function of its inputs; randomness arrives as
//! explicit seeds derived from the profile seed and action nonce.

mod earnings;
mod loot;
mod multiplier;

pub use earnings::{EarningsOutcome, ProgressError, apply_earnings};
pub use loot::roll_loot;
pub use multiplier::{
    RewardMultipliers, resolve_focus_bonus, resolve_multipliers, resolve_shop_discount,
};
