pub mod messaging_service;

pub use messaging_service::{Messenger, MessagingError, RegistrationError, WebhookRegistrar};
