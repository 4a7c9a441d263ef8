mod entity;
mod location;
mod state;

pub use entity::{Hostage, Protagonist, CRITICAL_DAMAGE, LETHAL_DAMAGE};
pub use location::Location;
pub use state::{Pads, WorldState};
