// ABOUTME: Library root for medic - exposes the heal sequence and its collaborators.
// ABOUTME: The main binary is in main.rs.

pub mod alert;
pub mod config;
pub mod error;
pub mod heal;
pub mod health;
pub mod output;
pub mod platform;
pub mod types;
