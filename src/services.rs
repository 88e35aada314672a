pub mod base;
pub mod configs;
pub mod imagga;
pub mod progress;
pub mod router;
pub mod types;

#[cfg(test)]
pub mod mock;
