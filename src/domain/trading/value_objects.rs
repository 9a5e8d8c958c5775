use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Value Object - opaque order identifier, assigned by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Display, Serialize, Deserialize)]
#[display(fmt = "{:06}", _0)]
pub struct OrderId(u64);

impl OrderId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Value Object - order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize)]
pub enum Side {
    #[strum(serialize = "buy")]
    #[serde(rename = "buy")]
    Buy,
    #[strum(serialize = "sell")]
    #[serde(rename = "sell")]
    Sell,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Value Object - why an order left the ledger (terminal, never reopened)
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum CloseReason {
    #[strum(serialize = "manual close")]
    Manual,
    #[strum(serialize = "stop loss")]
    StopLoss,
    #[strum(serialize = "take profit")]
    TakeProfit,
}
