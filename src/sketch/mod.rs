pub mod bitpack;
pub mod generator;
