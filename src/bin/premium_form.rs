//! Command-line companion form: collects the feature values, posts them to the premium
//! prediction service and prints the predicted category.

use clap::Parser;
use patient_records::infra::config;
use patient_records::predictor::{
    Occupation, PredictionInput, PredictionOutput, PredictorClient, PredictorError,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "premium_form", about = "Insurance Premium Category Predictor")]
struct Args {
    /// Age in years
    #[arg(long, default_value_t = 24)]
    age: u32,
    /// Weight in kilograms
    #[arg(long, default_value_t = 66.0)]
    weight: f64,
    /// Height in meters
    #[arg(long, default_value_t = 1.7)]
    height: f64,
    /// Annual income in lakhs per annum
    #[arg(long, default_value_t = 2.0)]
    income_lpa: f64,
    /// Whether the applicant smokes
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    smoker: bool,
    #[arg(long, default_value = "Varanasi")]
    city: String,
    #[arg(long, value_enum, default_value_t = Occupation::Retired)]
    occupation: Occupation,
    /// Prediction endpoint; falls back to PREDICTOR_URL
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    config::init_tracing();

    let args = Args::parse();
    let client = match args.url {
        Some(url) => PredictorClient::new(url),
        None => PredictorClient::from_env(),
    };
    let input = PredictionInput {
        age: args.age,
        weight: args.weight,
        height: args.height,
        income_lpa: args.income_lpa,
        smoker: args.smoker,
        city: args.city,
        occupation: args.occupation,
    };

    match outcome(client.predict(&input).await)? {
        Outcome::Success(line) => {
            println!("{}", line);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Failure(line) => {
            eprintln!("{}", line);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// What the form shows the user.
#[derive(Debug, PartialEq)]
enum Outcome {
    Success(String),
    Failure(String),
}

/// Connectivity and non-200 failures become a message; anything else is a real error.
fn outcome(result: Result<PredictionOutput, PredictorError>) -> Result<Outcome, PredictorError> {
    match result {
        Ok(out) => Ok(Outcome::Success(format!(
            "Predicted Insurance Premium Category: {}",
            out.predicted_category
        ))),
        Err(PredictorError::Connection { url, .. }) => Ok(Outcome::Failure(format!(
            "Could not connect to the prediction server at {}. Make sure it is running.",
            url
        ))),
        Err(e @ PredictorError::Api { .. }) => Ok(Outcome::Failure(e.to_string())),
        Err(e) => Err(e),
    }
}
