pub mod confidence;
pub mod descriptive;
pub mod sentinel;
pub mod threshold;
