// src/services/record_stream/extensions.rs

use super::hex_string;
use crate::models::tls_record::{ExtensionEntry, ExtensionList};
use crate::services::byte_cursor::ByteCursor;
use crate::services::registry::Registry;

const EXTENSION_HEADER_LEN: usize = 4;

/// Reads the 2-byte extensions length and the extensions it covers.
pub fn read_extension_list(cursor: &mut ByteCursor<'_>, registry: &Registry) -> Option<ExtensionList> {
    let length = cursor.try_read_int(2)? as u16;
    let bytes = cursor.take(length as usize);
    Some(ExtensionList {
        length,
        entries: parse_extensions(bytes, registry),
        truncated: bytes.len() < length as usize,
    })
}

/// Type/length/value triples until fewer than four bytes remain.
pub fn parse_extensions(bytes: &[u8], registry: &Registry) -> Vec<ExtensionEntry> {
    let mut cursor = ByteCursor::new(bytes);
    let mut entries = Vec::new();

    while cursor.remaining() >= EXTENSION_HEADER_LEN {
        let (Some(code), Some(length)) = (cursor.try_read_int(2), cursor.try_read_int(2)) else {
            break;
        };
        let value = cursor.take(length as usize);
        entries.push(ExtensionEntry {
            extension_type: registry.extension_label_or_hex(code as u16),
            length: length as u16,
            value: (!value.is_empty()).then(|| hex_string(value)),
            truncated: value.len() < length as usize,
        });
    }

    entries
}
