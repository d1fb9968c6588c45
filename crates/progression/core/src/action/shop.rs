//! Cosmetic shop purchases.
//!
//! The engine records the spend and the owned set; applying the purchased
//! theme/avatar/confetti is the presentation layer's job.

use super::{ActionTransition, sweep_achievements};
use crate::env::{GameEnv, OracleError};
use crate::error::{EngineError, ErrorSeverity};
use crate::event::Event;
use crate::progress::resolve_shop_discount;
use crate::state::{EngineState, ItemId};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error("unknown shop item '{0}'")]
    UnknownItem(ItemId),

    #[error("item '{0}' is already owned")]
    AlreadyOwned(ItemId),

    #[error("item costs {price} gold but only {gold} is available")]
    InsufficientGold { price: u64, gold: u64 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl EngineError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownItem(_) => ErrorSeverity::Validation,
            Self::AlreadyOwned(_) | Self::InsufficientGold { .. } => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "unknown_shop_item",
            Self::AlreadyOwned(_) => "item_already_owned",
            Self::InsufficientGold { .. } => "insufficient_gold",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Buys a catalog item, applying skill discounts to the listed price.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseItemAction {
    pub item: ItemId,
}

impl ActionTransition for PurchaseItemAction {
    type Error = PurchaseError;

    fn apply(
        &self,
        state: &mut EngineState,
        env: &GameEnv<'_>,
    ) -> Result<Vec<Event>, PurchaseError> {
        let item = env
            .catalog()?
            .shop_item(&self.item)
            .ok_or_else(|| PurchaseError::UnknownItem(self.item.clone()))?
            .clone();

        // Price-0 starter items are owned from the beginning
        if item.price == 0 || state.purchased_items.contains(&item.id) {
            return Err(PurchaseError::AlreadyOwned(item.id));
        }

        let discount = resolve_shop_discount(&state.profile, env)?;
        let price = (item.price as f64 * (1.0 - discount)).floor() as u64;
        if state.profile.gold < price {
            return Err(PurchaseError::InsufficientGold {
                price,
                gold: state.profile.gold,
            });
        }

        state.profile.gold -= price;
        state.profile.stats.items_bought += 1;
        state.purchased_items.insert(item.id.clone());

        let mut events = vec![Event::ItemPurchased {
            id: item.id,
            price,
        }];
        sweep_achievements(&mut state.profile, env, &mut events)?;

        Ok(events)
    }
}
