pub mod config_manager;
pub mod error;
pub mod options;
pub mod selection;
pub mod types;

pub use config_manager::*;
pub use error::*;
pub use options::*;
pub use selection::*;
pub use types::*;
