pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{Candle, CandleSeries};
pub use services::{AggregationResult, TickAggregator};
pub use value_objects::{Ohlc, Price, Quantity, Symbol, Tick, TimeInterval, Timestamp};
