// src/render/mod.rs
pub mod table;
pub mod template;
