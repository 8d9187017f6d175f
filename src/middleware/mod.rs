pub mod extract;
pub mod layers;

pub use extract::{ApiJson, Paging, ResourceId};
