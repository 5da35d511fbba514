pub mod client;
pub mod model;

pub use client::{ModrinthClient, Registry, MODRINTH_API_BASE};
pub use model::{ProjectMetadata, SupportLevel, VersionMetadata};
