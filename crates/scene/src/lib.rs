pub mod outline;
pub mod starfield;
pub mod style;

pub use outline::{GeoPoint, INDIA_OUTLINE, OUTLINE_VISIBILITY_MIN, visible_outline};
pub use starfield::{STAR_COUNT, Star, starfield};
pub use style::GlobeStyle;
