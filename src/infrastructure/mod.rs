pub mod observability;
pub mod providers;
pub mod staging;
