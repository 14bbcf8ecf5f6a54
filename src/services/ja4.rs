// src/services/ja4.rs
//
// JA4 client and JA4S server fingerprints over strictly decoded hellos.

use super::byte_cursor::ByteCursor;
use super::registry::{
    Registry, EXTENSION_TYPE_ALPN, EXTENSION_TYPE_SERVER_NAME, EXTENSION_TYPE_SIGNATURE_ALGORITHMS,
    EXTENSION_TYPE_SUPPORTED_VERSIONS, GREASE_LABEL,
};
use super::tls_parser::{ClientHelloRecord, Extension, ServerHelloRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Transport marker. QUIC hellos are not handled.
const PROTOCOL_TCP: &str = "t";
const MAX_COUNT: usize = 99;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ja4Fingerprints {
    #[serde(rename = "JA4")]
    pub ja4: String,
    #[serde(rename = "JA4_o")]
    pub ja4_o: String,
    #[serde(rename = "JA4_r")]
    pub ja4_r: String,
    #[serde(rename = "JA4_ro")]
    pub ja4_ro: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ja4sFingerprints {
    #[serde(rename = "JA4S")]
    pub ja4s: String,
    #[serde(rename = "JA4S_r")]
    pub ja4s_r: String,
}

// --- Shared pieces ---

/// First 12 hex characters of the SHA-256 digest.
pub fn hash12(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))[..12].to_string()
}

/// Two decimal digits, saturating at 99.
fn count_field(n: usize) -> String {
    format!("{:02}", n.min(MAX_COUNT))
}

pub fn version_label(version: u16) -> &'static str {
    match version {
        0x0304 => "13",
        0x0303 => "12",
        0x0302 => "11",
        0x0301 => "10",
        0x0300 => "s3",
        0x0200 => "s2",
        0x0100 => "s1",
        _ => "00",
    }
}

fn find_extension(extensions: &[Extension], code: u16) -> Option<&Extension> {
    extensions.iter().find(|ext| ext.code() == code)
}

/// A 2-byte payload is a server's selected version. Otherwise the payload is a client's
/// 1-byte-prefixed list and the highest non-GREASE entry wins.
fn highest_supported_version(payload: &[u8], registry: &Registry) -> Option<u16> {
    if let [hi, lo] = payload {
        return Some(u16::from_be_bytes([*hi, *lo]));
    }

    let mut cursor = ByteCursor::new(payload);
    let list_len = cursor.try_read_int(1)? as usize;
    let mut list = ByteCursor::new(cursor.take(list_len));
    let mut highest = None;
    while let Some(v) = list.try_read_int(2) {
        let v = v as u16;
        if registry.is_grease(v) {
            continue;
        }
        highest = highest.max(Some(v));
    }
    highest
}

/// The record version only applies when there is no supported_versions extension. An
/// extension with no usable entry maps to `00`.
fn negotiated_version(record_version: u16, extensions: &[Extension], registry: &Registry) -> &'static str {
    match find_extension(extensions, EXTENSION_TYPE_SUPPORTED_VERSIONS) {
        Some(ext) => highest_supported_version(&ext.value.value, registry)
            .map(version_label)
            .unwrap_or("00"),
        None => version_label(record_version),
    }
}

/// First and last character of the first ALPN protocol name.
fn alpn_field(extensions: &[Extension]) -> String {
    let Some(ext) = find_extension(extensions, EXTENSION_TYPE_ALPN) else {
        return "00".to_string();
    };

    let mut cursor = ByteCursor::new(&ext.value.value);
    cursor.take(2); // protocol list length
    let name: &[u8] = match cursor.try_read_int(1) {
        Some(len) => cursor.take(len as usize),
        None => &[],
    };

    let ascii_or_9 = |b: u8| if b.is_ascii() { b as char } else { '9' };
    match name {
        [first, .., last] if first.is_ascii() => format!("{}{}", *first as char, ascii_or_9(*last)),
        [_, .., _] => "99".to_string(),
        _ => "00".to_string(),
    }
}

/// Signature algorithms in wire order, skipping the 2-byte list length. An odd trailing
/// byte is dropped.
fn signature_algorithms(extensions: &[Extension]) -> String {
    find_extension(extensions, EXTENSION_TYPE_SIGNATURE_ALGORITHMS)
        .map(|ext| {
            ext.value
                .value
                .get(2..)
                .unwrap_or_default()
                .chunks_exact(2)
                .map(hex::encode)
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default()
}

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}

// ==========
// JA4

pub fn ja4(record: &ClientHelloRecord) -> Ja4Fingerprints {
    ja4_with(record, Registry::standard())
}

pub fn ja4_with(record: &ClientHelloRecord, registry: &Registry) -> Ja4Fingerprints {
    let hello = record.message();
    let extensions = hello.extensions();

    let ciphers: Vec<String> = hello
        .cipher_suites
        .value
        .iter()
        .filter(|suite| suite.value != GREASE_LABEL)
        .map(|suite| suite.hex())
        .collect();

    let real_extensions: Vec<&Extension> = extensions
        .iter()
        .filter(|ext| ext.extension_type.value != GREASE_LABEL)
        .collect();

    let sni = if find_extension(extensions, EXTENSION_TYPE_SERVER_NAME).is_some() {
        "d"
    } else {
        "i"
    };

    let prefix = format!(
        "{}{}{}{}{}{}",
        PROTOCOL_TCP,
        negotiated_version(record.version.value, extensions, registry),
        sni,
        count_field(ciphers.len()),
        count_field(real_extensions.len()),
        alpn_field(extensions),
    );

    let hashed_extensions: Vec<String> = real_extensions
        .iter()
        .filter(|ext| {
            let code = ext.code();
            code != EXTENSION_TYPE_SERVER_NAME && code != EXTENSION_TYPE_ALPN
        })
        .map(|ext| ext.extension_type.hex())
        .collect();
    let sig_algs = signature_algorithms(extensions);

    let original_ciphers_raw = ciphers.join(",");
    let sorted_ciphers_raw = sorted(ciphers).join(",");
    let original_extensions_raw = format!("{}_{}", hashed_extensions.join(","), sig_algs);
    let sorted_extensions_raw = format!("{}_{}", sorted(hashed_extensions).join(","), sig_algs);

    debug!("JA4 prefix {}, cipher material {:?}", prefix, original_ciphers_raw);

    Ja4Fingerprints {
        ja4: format!(
            "{}_{}_{}",
            prefix,
            hash12(&sorted_ciphers_raw),
            hash12(&sorted_extensions_raw)
        ),
        ja4_o: format!(
            "{}_{}_{}",
            prefix,
            hash12(&original_ciphers_raw),
            hash12(&original_extensions_raw)
        ),
        ja4_r: format!("{}_{}_{}", prefix, sorted_ciphers_raw, sorted_extensions_raw),
        ja4_ro: format!("{}_{}_{}", prefix, original_ciphers_raw, original_extensions_raw),
    }
}

// ==========
// JA4S

pub fn ja4s(record: &ServerHelloRecord) -> Ja4sFingerprints {
    ja4s_with(record, Registry::standard())
}

pub fn ja4s_with(record: &ServerHelloRecord, registry: &Registry) -> Ja4sFingerprints {
    let hello = record.message();
    let extensions = hello.extensions();

    let prefix = format!(
        "{}{}{}{}",
        PROTOCOL_TCP,
        negotiated_version(record.version.value, extensions, registry),
        count_field(extensions.len()),
        alpn_field(extensions),
    );
    let cipher = hello.cipher_suite.hex();
    let extensions_raw = extensions
        .iter()
        .map(|ext| ext.extension_type.hex())
        .collect::<Vec<_>>()
        .join(",");

    Ja4sFingerprints {
        ja4s: format!("{}_{}_{}", prefix, cipher, hash12(&extensions_raw)),
        ja4s_r: format!("{}_{}_{}", prefix, cipher, extensions_raw),
    }
}
