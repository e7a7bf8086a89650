//! Configuration module

mod notion;

pub use notion::BlogConfig;
pub use notion::{DEFAULT_API_BASE_URL, ENV_API_BASE_URL, ENV_DATABASE_ID, ENV_POST_BASE_URL};
