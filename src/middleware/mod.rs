// Middleware shared by every hosting adapter

pub mod cors;

pub use cors::*;
