// Application layer - Dashboard layout engine
pub mod controller;
pub mod grid;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod services;
