pub mod cost;
pub mod entities;
pub mod errors;
