pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod filter;
pub mod loader;
pub mod output;
pub mod profile;
pub mod toggles;

#[cfg(test)]
mod tests;
