pub mod contract;
pub mod scenario;
pub mod stock;
