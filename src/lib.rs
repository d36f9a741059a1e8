pub mod error;
pub mod validation;
pub mod model;
pub mod db;
pub mod source;
pub mod ops;
pub mod queries;
pub mod migrate;
pub mod export;
pub mod cli;
