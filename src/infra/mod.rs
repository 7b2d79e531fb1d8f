pub mod config;
pub mod predictor;
