pub mod company;
pub mod outcome;
pub mod output_record;
pub mod strategy;

pub use company::*;
pub use outcome::*;
pub use output_record::*;
pub use strategy::*;
