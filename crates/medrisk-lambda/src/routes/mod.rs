pub mod analytics;
pub mod assessments;
pub mod future_disease;
pub mod health;
pub mod records;
