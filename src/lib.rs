pub mod activities;
pub mod config;
pub mod db;
pub mod error;
pub mod repository;
pub mod server;
pub mod stats;
pub(crate) mod utils;

pub use error::FrogError;
pub use repository::EntryRepository;
