mod projection;

pub use projection::*;
