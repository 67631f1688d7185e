//! Configuration: where files live and the user's settings

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{ImportSettings, Settings};
