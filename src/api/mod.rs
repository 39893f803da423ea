pub mod init;

pub use init::{init_wasm_logging, override_config_js};
