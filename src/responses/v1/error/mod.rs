use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a 401 response
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: Value,
}

/// Body of a 422 response, one entry per failed validation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidationErrorResponse {
    pub errors: Vec<Value>,
}

/// A single express-validator style error entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub msg: String,
    #[serde(default)]
    pub location: String,
}

impl ValidationError {
    pub fn new(param: Option<&str>, msg: impl Into<String>, location: &str) -> Self {
        Self {
            param: param.map(str::to_string),
            msg: msg.into(),
            location: location.to_string(),
        }
    }
}
