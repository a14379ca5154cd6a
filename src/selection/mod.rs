pub mod actions;
pub mod partition;
pub mod reducer;
pub mod session;
pub mod state;
pub mod trait_info;

pub use actions::Action;
pub use reducer::reduce;
pub use session::Session;
pub use state::SelectionState;
pub use trait_info::{PointSign, TraitInfo};
