pub mod error;
pub mod handlers;
pub mod mappers;
pub mod types;

pub use error::ApiError;
pub use handlers::*;
pub use mappers::*;
pub use types::*;
