pub mod disease;
pub mod report;
pub mod user;
