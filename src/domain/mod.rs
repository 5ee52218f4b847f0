// Domain layer - Plain dashboard data types
pub mod binding;
pub mod card;
pub mod snapshot;
