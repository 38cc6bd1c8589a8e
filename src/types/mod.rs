pub mod grid;
pub mod parameter;
pub mod prediction;
pub mod query;
pub mod window;
