pub mod session_controller;

pub use session_controller::{HISTORY_LIMIT, MAX_CANDLES, STARTING_BALANCE, SessionController};
