pub mod abi;
pub mod contract;
pub mod errors;
pub mod interface;
pub mod kinds;
pub mod plan;
pub mod registration;
