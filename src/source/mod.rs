// src/source/mod.rs
pub mod client;
pub mod pdf;
