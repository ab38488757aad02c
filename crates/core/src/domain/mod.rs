pub mod contract;
pub mod feed;
