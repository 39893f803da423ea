pub mod config;
pub mod exports;
pub mod yaml;

pub use config::{validate_group_references, BaseLists, ReferenceIssue};
pub use exports::clash::override_to_clash;
pub use yaml::clash::{ClashOverride, ClashProxyGroup};
