//! Provider extension scaffolding.

pub mod author;
pub mod generator;
pub mod plan;
pub mod request;

pub use author::Author;
pub use generator::{
    ExtensionGenerator, FileOperation, GenerateOptions, GenerationReport,
    ProviderExtensionGenerator,
};
pub use plan::{build_plan, FilePlan, PlannedFile};
pub use request::{FeatureToggles, ProviderExtensionRequest};
