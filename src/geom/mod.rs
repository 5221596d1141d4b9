mod crossing;
mod direction;
mod position;

pub use crossing::crosses;
pub use direction::Direction;
pub use position::Position;
pub(crate) use position::haversine_km;
