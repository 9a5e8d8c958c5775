pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::Chart;
pub use services::{
    CANDLE_GAP, CoordinateMapper, NormalizedGeometry, OverlayPlan, OverlayPlanner,
    PRICE_GRID_DIVISIONS, PriceRange, TIME_LABEL_STRIDE,
};
pub use value_objects::{Color, Viewport};
