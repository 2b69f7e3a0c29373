pub mod config_manager;
pub mod error;
pub mod friendship;
pub mod generator;
pub mod network;
pub mod person;
pub mod traits;
pub mod types;

pub use config_manager::*;
pub use error::*;
pub use friendship::*;
pub use generator::{NetworkGenerator, FEMALE_NAMES, MALE_NAMES, NAME_POOL_SIZE};
pub use network::*;
pub use person::*;
pub use traits::*;
pub use types::*;
