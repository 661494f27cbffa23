//! Data models for the portfolio store.
//!
//! Field names serialize in camelCase so persisted documents stay readable by the site frontend.

mod documents;
mod post;
mod project;
mod technology;
mod topic;

pub use documents::*;
pub use post::*;
pub use project::*;
pub use technology::*;
pub use topic::*;
