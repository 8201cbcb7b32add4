mod nationality;
mod player;
mod position;
mod sort;
mod units;

pub use nationality::{InvalidNationality, normalize_nationality};
pub use player::{Player, UpdatePlayer};
pub use position::{Position, PositionGroup, UnknownPosition};
pub use sort::{SortBy, SortDirection};
pub use units::{HeightUnit, round_to_cm};
