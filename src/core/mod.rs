pub mod expand;
pub mod filter;
pub mod grammar;
pub mod random;
