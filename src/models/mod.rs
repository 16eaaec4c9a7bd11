pub mod balance;
pub mod donation;
