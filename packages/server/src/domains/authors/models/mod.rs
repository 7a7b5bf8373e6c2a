pub mod author;

pub use author::*;
