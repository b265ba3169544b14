#[allow(clippy::module_inception)]
pub mod models;
pub mod wire;

pub use models::*;
