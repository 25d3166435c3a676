use serde::{Deserialize, Serialize};

pub const RANGE_ORDER_ERROR: &str = "start date must occur before end date";

/// Returned with a 200 status when a date range is reversed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RangeError {
    #[serde(rename = "Error")]
    pub error: String,
}

impl RangeError {
    pub fn reversed() -> Self {
        Self {
            error: RANGE_ORDER_ERROR.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ErrorMessage {
    pub code: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_uses_capitalized_key() {
        let json = serde_json::to_string(&RangeError::reversed()).unwrap();
        assert_eq!(
            json,
            r#"{"Error":"start date must occur before end date"}"#
        );
    }
}
