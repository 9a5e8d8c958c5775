pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::Order;
pub use services::{ClosedOrder, RiskEngine};
pub use value_objects::{CloseReason, OrderId, Side};
