pub mod config;
pub mod growth;
pub mod herd;
pub mod model;
pub mod nutrition;
pub mod output;
pub mod promoter;
pub mod stats;
