pub mod adjacency;
pub mod algebra;
pub mod analytics;
pub mod codec;
pub mod facade;
pub mod matrix;
pub mod vertex_index;

pub use adjacency::project;
pub use analytics::*;
pub use codec::{decode, encode};
pub use facade::*;
pub use matrix::*;
pub use vertex_index::*;
