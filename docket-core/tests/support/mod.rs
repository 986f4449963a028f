pub mod entities;
pub mod memory;
