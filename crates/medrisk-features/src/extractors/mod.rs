pub mod family_history;
pub mod lab;
pub mod lifestyle;
pub mod mental_health;
