use super::record::StoredPatient;
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields a sorted view may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortField {
    pub const ALLOWED: &'static [&'static str] = &["height", "weight"];

    pub fn key(&self, patient: &StoredPatient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            other => Err(format!(
                "Invalid field '{}', select from {:?}",
                other,
                SortField::ALLOWED
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            // "dsc" is what older clients send.
            "desc" | "dsc" => Ok(SortOrder::Desc),
            other => Err(format!("Invalid order '{}', select between asc or desc", other)),
        }
    }
}

impl SortOrder {
    /// Orders two keys; NaN never reaches here because stored records are validated.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_allowed_fields_only() {
        assert_eq!("height".parse::<SortField>(), Ok(SortField::Height));
        assert_eq!("weight".parse::<SortField>(), Ok(SortField::Weight));
        assert!("age".parse::<SortField>().is_err());
        assert!("Height".parse::<SortField>().is_err());
    }

    #[test]
    fn parses_orders() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!("dsc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("up".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn desc_reverses_comparison() {
        assert_eq!(SortOrder::Asc.compare(1.0, 2.0), Ordering::Less);
        assert_eq!(SortOrder::Desc.compare(1.0, 2.0), Ordering::Greater);
        assert_eq!(SortOrder::Desc.compare(2.0, 2.0), Ordering::Equal);
    }
}
