pub mod client;

pub use client::{CaddyClient, ConfigPayload, DEFAULT_ADMIN_URL};
