pub mod company;
pub mod founder;
pub mod name;
