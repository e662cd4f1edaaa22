//! Search result types and the container that merges them
//!
//! Every entity row is projected into a [`SearchResult`] tagged with its
//! [`EntityKind`]; the kind fixes the result's relevance weight.

mod container;
mod types;

pub use container::{ResultContainer, ResultOrder, ResultPage};
pub use types::*;
