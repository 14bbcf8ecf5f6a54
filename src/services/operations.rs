// src/services/operations.rs
//
// Entry points that take user-supplied text, turn it into bytes and run one of the decoders.

use super::errors::OperationError;
use super::ja4::{ja4, ja4s};
use super::record_stream::parse_records;
use super::tls_parser::{decode_client_hello, decode_server_hello};
use crate::models::tls_record::TlsRecord;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Fingerprint name to value, e.g. `"JA4" -> "t13d1516h2_..."`.
pub type FingerprintReport = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Hex,
    Base64,
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ja4Output {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "JA4")]
    Ja4,
    #[serde(rename = "JA4_o")]
    Ja4Original,
    #[serde(rename = "JA4_r")]
    Ja4Raw,
    #[serde(rename = "JA4_ro")]
    Ja4RawOriginal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ja4sOutput {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "JA4S")]
    Ja4s,
    #[serde(rename = "JA4S_r")]
    Ja4sRaw,
}

// --- Input decoding ---

pub fn decode_input(input: &str, format: InputFormat) -> Result<Vec<u8>, OperationError> {
    match format {
        InputFormat::Hex => decode_hex(input),
        InputFormat::Base64 => decode_base64(input),
        InputFormat::Raw => Ok(input.as_bytes().to_vec()),
    }
}

/// Accepts `16 03 01`, `0x16,0x03,0x01`, `16:03:01` and plain `160301`.
fn decode_hex(input: &str) -> Result<Vec<u8>, OperationError> {
    let digits: String = input
        .split(|c: char| c.is_whitespace() || c == ':' || c == ',')
        .map(|token| {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        })
        .collect();
    Ok(hex::decode(digits)?)
}

fn decode_base64(input: &str) -> Result<Vec<u8>, OperationError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(STANDARD_NO_PAD.decode(compact.trim_end_matches('='))?)
}

// --- Operations ---

pub fn ja4_fingerprint(
    input: &str,
    format: InputFormat,
    output: Ja4Output,
) -> Result<FingerprintReport, OperationError> {
    let data = decode_input(input, format)?;
    let record = decode_client_hello(&data).map_err(OperationError::NotClientHello)?;
    let fp = ja4(&record);
    debug!("Computed JA4 {}", fp.ja4);

    let mut report = FingerprintReport::new();
    let mut add = |wanted: Ja4Output, key: &str, value: String| {
        if output == Ja4Output::All || output == wanted {
            report.insert(key.to_string(), value);
        }
    };
    add(Ja4Output::Ja4, "JA4", fp.ja4);
    add(Ja4Output::Ja4Original, "JA4_o", fp.ja4_o);
    add(Ja4Output::Ja4Raw, "JA4_r", fp.ja4_r);
    add(Ja4Output::Ja4RawOriginal, "JA4_ro", fp.ja4_ro);
    Ok(report)
}

pub fn ja4s_fingerprint(
    input: &str,
    format: InputFormat,
    output: Ja4sOutput,
) -> Result<FingerprintReport, OperationError> {
    let data = decode_input(input, format)?;
    let record = decode_server_hello(&data).map_err(OperationError::NotServerHello)?;
    let fp = ja4s(&record);
    debug!("Computed JA4S {}", fp.ja4s);

    let mut report = FingerprintReport::new();
    if matches!(output, Ja4sOutput::All | Ja4sOutput::Ja4s) {
        report.insert("JA4S".to_string(), fp.ja4s);
    }
    if matches!(output, Ja4sOutput::All | Ja4sOutput::Ja4sRaw) {
        report.insert("JA4S_r".to_string(), fp.ja4s_r);
    }
    Ok(report)
}

pub fn parse_tls(input: &str, format: InputFormat) -> Result<Vec<TlsRecord>, OperationError> {
    let data = decode_input(input, format)?;
    Ok(parse_records(&data))
}
