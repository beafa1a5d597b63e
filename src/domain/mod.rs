pub mod audit;
pub mod errors;
