pub mod migrate;
pub mod server;
pub mod token;
