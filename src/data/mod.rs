//! Training-point collection and problem encoding

pub mod encode;
pub mod points;

pub use self::encode::*;
pub use self::points::*;
