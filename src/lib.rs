pub mod app;
pub mod config;
pub mod error;
pub mod foods;
pub mod meals;
pub mod profile;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_support;
