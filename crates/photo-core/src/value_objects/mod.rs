//! Value objects - immutable types that represent domain concepts

mod color;
mod ids;

pub use color::{ColorParseError, UserColor};
pub use ids::{ImageId, RecordId};
