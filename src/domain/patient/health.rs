use serde::Serialize;
use utoipa::ToSchema;

/// Body-mass index rounded to two decimals: `weight / height^2`.
///
/// Rounds the exact binary value with ties to even, so `18.125` becomes `18.12`.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    let raw = weight_kg / (height_m * height_m);
    format!("{:.2}", raw).parse().unwrap_or(raw)
}

/// Weight category derived from a (rounded) BMI.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    /// Bands are inclusive-low / exclusive-high, the last one is open.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }
}
