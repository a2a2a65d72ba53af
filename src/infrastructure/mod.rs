pub mod classifier;
pub mod feeds;
pub mod sqlite;
