pub mod client;

pub use client::{
    Occupation, PredictionInput, PredictionOutput, PredictorClient, PredictorError,
};
