pub mod client;
pub mod players;
