// src/services/record_stream/mod.rs
//
// Fail-soft decoding of a run of TLS records. Nothing here returns an error: short reads
// end the current loop or set `truncated` on the element being read.

pub mod certificate;
pub mod extensions;
pub mod hello;
pub mod session_ticket;

use crate::models::tls_record::{
    BlobList, Handshake, HandshakeMessage, HexBlob, HexList, RecordValue, TlsRecord,
};
use crate::services::byte_cursor::ByteCursor;
use crate::services::registry::{HandshakeMessageType, Registry, TlsContentType};
use crate::services::tls_parser::{HANDSHAKE_HEADER_LEN, RECORD_HEADER_LEN};
use tracing::{debug, trace};

/// Decode every complete record header in `data`. A tail shorter than a record header is
/// dropped.
pub fn parse_records(data: &[u8]) -> Vec<TlsRecord> {
    parse_records_with(data, Registry::standard())
}

pub fn parse_records_with(data: &[u8], registry: &Registry) -> Vec<TlsRecord> {
    let mut cursor = ByteCursor::new(data);
    let mut records = Vec::new();

    while cursor.remaining() >= RECORD_HEADER_LEN {
        match read_record(&mut cursor, registry) {
            Some(record) => records.push(record),
            None => break,
        }
    }

    if cursor.has_more() {
        trace!(
            "Discarding {} bytes shorter than a record header",
            cursor.remaining()
        );
    }
    debug!("Lenient decode produced {} records", records.len());
    records
}

fn read_record(cursor: &mut ByteCursor<'_>, registry: &Registry) -> Option<TlsRecord> {
    let type_code = cursor.try_read_int(1)? as u8;
    let version = hex_string(cursor.take(2));
    let length = cursor.try_read_int(2)? as u16;
    let content = cursor.take(length as usize);

    let mut record = TlsRecord {
        content_type: registry.content_type_label(type_code),
        version,
        length,
        truncated: content.len() < length as usize,
        value: None,
    };

    if record.truncated {
        debug!(
            "Record declares {} bytes, only {} available",
            length,
            content.len()
        );
    }
    if length == 0 || content.is_empty() {
        return Some(record);
    }

    record.value = match TlsContentType::try_from_u8(type_code) {
        Some(TlsContentType::Handshake) => {
            parse_handshake(content, length as usize, registry).map(RecordValue::Handshake)
        }
        _ => Some(RecordValue::Raw(hex_string(content))),
    };
    Some(record)
}

/// Decode one handshake message occupying a record of `record_length` declared bytes.
///
/// When the handshake length does not account for exactly the whole record, the entire
/// content is reported as an opaque `finished` value.
pub fn parse_handshake(
    content: &[u8],
    record_length: usize,
    registry: &Registry,
) -> Option<Handshake> {
    let mut cursor = ByteCursor::new(content);
    let type_code = cursor.try_read_int(1)? as u8;

    let mut handshake = Handshake {
        handshake_type: registry.handshake_type_label(type_code),
        handshake_length: None,
        message: None,
    };

    if cursor.remaining() < 3 {
        return Some(handshake);
    }
    let handshake_length = cursor.try_read_int(3)?;

    if handshake_length as usize + HANDSHAKE_HEADER_LEN != record_length {
        debug!(
            "Handshake length {} does not fill record length {}; reporting as finished",
            handshake_length, record_length
        );
        cursor.move_to(0);
        handshake.handshake_type =
            registry.handshake_type_label(HandshakeMessageType::Finished.as_u8());
        handshake.message = Some(HandshakeMessage::HandshakeValue(hex_string(cursor.rest())));
        return Some(handshake);
    }

    handshake.handshake_length = Some(handshake_length);
    let body = cursor.take(handshake_length as usize);
    if body.is_empty() {
        return Some(handshake);
    }

    handshake.message = Some(dispatch_handshake(type_code, body, registry));
    Some(handshake)
}

fn dispatch_handshake(type_code: u8, body: &[u8], registry: &Registry) -> HandshakeMessage {
    let mut cursor = ByteCursor::new(body);
    let message_type = HandshakeMessageType::try_from_u8(type_code);
    trace!("Dispatching handshake body of {} bytes as {:?}", body.len(), message_type);

    match message_type {
        Some(HandshakeMessageType::ClientHello) => {
            HandshakeMessage::ClientHello(hello::parse_client_hello(&mut cursor, registry))
        }
        Some(HandshakeMessageType::ServerHello) => {
            HandshakeMessage::ServerHello(hello::parse_server_hello(&mut cursor, registry))
        }
        Some(HandshakeMessageType::NewSessionTicket) => HandshakeMessage::NewSessionTicket(
            session_ticket::parse_new_session_ticket(&mut cursor),
        ),
        Some(HandshakeMessageType::Certificate) => {
            HandshakeMessage::Certificate(certificate::parse_certificate(&mut cursor))
        }
        Some(HandshakeMessageType::CertificateRequest) => HandshakeMessage::CertificateRequest(
            certificate::parse_certificate_request(&mut cursor),
        ),
        Some(HandshakeMessageType::CertificateVerify) => HandshakeMessage::CertificateVerify(
            certificate::parse_certificate_verify(&mut cursor),
        ),
        _ => HandshakeMessage::HandshakeValue(hex_string(body)),
    }
}

// ==========
// FIELD READERS

pub(crate) fn hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Fixed-width field; absent unless all `n` bytes are there. A short tail is consumed.
pub(crate) fn read_fixed(cursor: &mut ByteCursor<'_>, n: usize) -> Option<String> {
    let bytes = cursor.take(n);
    if bytes.len() < n {
        return None;
    }
    Some(hex_string(bytes))
}

pub(crate) fn read_prefixed_blob(cursor: &mut ByteCursor<'_>, prefix_len: usize) -> Option<HexBlob> {
    let length = cursor.try_read_int(prefix_len)?;
    let bytes = cursor.take(length as usize);
    Some(HexBlob {
        length,
        value: hex_string(bytes),
        truncated: bytes.len() < length as usize,
    })
}

pub(crate) fn read_prefixed_list(
    cursor: &mut ByteCursor<'_>,
    prefix_len: usize,
    item_len: usize,
) -> Option<HexList> {
    let length = cursor.try_read_int(prefix_len)?;
    let bytes = cursor.take(length as usize);
    Some(HexList {
        length,
        values: bytes.chunks(item_len).map(hex_string).collect(),
        truncated: bytes.len() < length as usize,
    })
}

pub(crate) fn read_prefixed_blobs(
    cursor: &mut ByteCursor<'_>,
    prefix_len: usize,
    entry_prefix_len: usize,
) -> Option<BlobList> {
    let length = cursor.try_read_int(prefix_len)?;
    let bytes = cursor.take(length as usize);
    let mut truncated = bytes.len() < length as usize;

    let mut inner = ByteCursor::new(bytes);
    let mut entries = Vec::new();
    while inner.has_more() {
        match read_prefixed_blob(&mut inner, entry_prefix_len) {
            Some(entry) => entries.push(entry),
            None => {
                truncated = true;
                break;
            }
        }
    }

    Some(BlobList {
        length,
        entries,
        truncated,
    })
}
