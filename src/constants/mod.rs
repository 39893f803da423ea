pub mod network;
pub mod regions;
pub mod rules;
pub mod services;
