pub mod regression;
pub mod returns;
pub mod risk;
pub mod stats;
