pub mod config;
pub mod error;
pub mod metadata;
pub mod package;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
