pub mod channel;
pub mod config;
pub mod dedup;
pub mod forward;
pub mod lifecycle;
pub mod manager;
pub mod platform;
pub mod terminal;
pub mod worker;

#[cfg(test)]
mod tests;
