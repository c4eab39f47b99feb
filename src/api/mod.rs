pub mod client;
pub mod deserializers;
pub mod http_client;
pub mod nlic;
pub mod types;

pub use client::{ClientConfig, StatuteRepository};
pub use nlic::NlicClient;
pub use types::StatuteRef;
