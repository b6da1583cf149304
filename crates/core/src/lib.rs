pub mod models;
pub mod partition;
pub mod view;

pub use models::*;
pub use partition::{partition, PART_A_PER_UNIT, PART_B_TOTAL};
pub use view::{ViewError, ViewState};
