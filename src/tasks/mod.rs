//! Link planning: walks a mapping and drives the resolver for every entry.
pub mod context;
pub mod links;

pub use context::Context;
