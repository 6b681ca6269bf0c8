pub mod apply_hash;
pub mod filter;
pub mod hash;
pub mod hosting;
pub mod project;

pub use crate::domain::model::{Backend, Context, Endpoint, EndpointFilter, Platform, SourceHashes};
pub use crate::domain::ports::{ProjectOptions, ProjectsApi};
pub use crate::utils::error::Result;
