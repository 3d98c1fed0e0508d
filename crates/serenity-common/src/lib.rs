pub mod errors;
pub mod events;
pub mod id;

pub use errors::{ConfigError, SerenityError};
pub use events::EventBus;
pub use id::{ExchangeId, TurnId};

pub type Result<T> = std::result::Result<T, SerenityError>;
