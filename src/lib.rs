pub mod viewer;
pub mod logger;
