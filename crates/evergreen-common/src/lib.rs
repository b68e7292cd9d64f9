pub mod errors;
pub mod id;
pub mod notifications;

pub use errors::{ConfigError, EvergreenError};
pub use id::{new_id, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};

