pub mod events;
pub mod handlers;
pub mod server;
pub mod ws;
