pub mod coach;
pub mod config;
pub mod generation;
pub mod models;
pub mod server;
pub mod store;
#[cfg(test)]
pub mod test_helpers;
pub mod trading;
