//! Notification adapters - Outbound e-mail.

mod in_memory;
mod resend;

pub use in_memory::InMemoryNotifier;
pub use resend::{ResendConfig, ResendNotifier};
