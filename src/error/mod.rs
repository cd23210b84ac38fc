mod frog;

pub use frog::{ApiErrorBody, ApiErrorObject, FrogError};
