pub mod actions;
pub mod config;
pub mod draft;
pub mod ids;
pub mod logging;
pub mod migration;
pub mod persistence;
pub mod projections;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::*;
pub use reducer::*;
pub use state::*;
pub use store::*;

pub use persistence::*;
