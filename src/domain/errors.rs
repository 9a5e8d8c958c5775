use crate::domain::trading::OrderId;

/// Error taxonomy of the workstation core
///
/// Nothing here is fatal to the session; every variant surfaces at the UI
/// boundary and the last known chart state stays on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalError {
    /// Malformed input (bad tick, unparsable feed payload); state unchanged
    Validation(String),
    /// Order placement with a non-positive quantity
    InvalidQuantity(f64),
    /// Ledger operation against an unknown (or already closed) order id
    OrderNotFound(OrderId),
    /// Action attempted before the first price arrived
    NoPrice,
    /// Market-data subscription or fetch failure
    Feed(String),
    /// Drawing-surface failure
    Rendering(String),
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            TerminalError::InvalidQuantity(qty) => write!(f, "Invalid Quantity: {}", qty),
            TerminalError::OrderNotFound(id) => write!(f, "Order Not Found: {}", id),
            TerminalError::NoPrice => write!(f, "No Price: no market price received yet"),
            TerminalError::Feed(msg) => write!(f, "Feed Error: {}", msg),
            TerminalError::Rendering(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for TerminalError {}

pub type TerminalResult<T> = Result<T, TerminalError>;
