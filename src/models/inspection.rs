use crate::models::tls_record::TlsRecord;
use crate::services::operations::{InputFormat, Ja4Output, Ja4sOutput};
use serde::{Deserialize, Serialize};

// ====================================
// REQUESTS

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Ja4Request {
    pub input: String,
    #[serde(default)]
    pub input_format: InputFormat,
    #[serde(default)]
    pub output: Ja4Output,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Ja4sRequest {
    pub input: String,
    #[serde(default)]
    pub input_format: InputFormat,
    #[serde(default)]
    pub output: Ja4sOutput,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParseRequest {
    pub input: String,
    #[serde(default)]
    pub input_format: InputFormat,
}

// ====================================
// RESPONSES

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub records: Vec<TlsRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
