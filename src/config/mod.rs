mod loader;
mod model;
mod validation;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem};
pub use model::{
    BodyRequirement, CallPair, ClassifierConfig, Config, EngineConfig, ForbiddenPattern, RuleKind,
    RuleSpec, ScannerConfig, SourceRoot,
};
pub use validation::validate_config;
