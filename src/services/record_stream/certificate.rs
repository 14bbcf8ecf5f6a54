// src/services/record_stream/certificate.rs

use super::{read_fixed, read_prefixed_blob, read_prefixed_blobs, read_prefixed_list};
use crate::models::tls_record::{
    CertificateMessage, CertificateRequestMessage, CertificateVerifyMessage, SignatureAndHash,
};
use crate::services::byte_cursor::ByteCursor;

pub fn parse_certificate(cursor: &mut ByteCursor<'_>) -> CertificateMessage {
    CertificateMessage {
        certificate_list: read_prefixed_blobs(cursor, 3, 3),
    }
}

pub fn parse_certificate_request(cursor: &mut ByteCursor<'_>) -> CertificateRequestMessage {
    CertificateRequestMessage {
        certificate_types: read_prefixed_list(cursor, 1, 1),
        supported_signature_algorithms: read_prefixed_list(cursor, 2, 2),
        // an empty authority list is left out
        certificate_authorities: read_prefixed_blobs(cursor, 2, 2)
            .filter(|cas| !cas.entries.is_empty() || cas.truncated),
    }
}

pub fn parse_certificate_verify(cursor: &mut ByteCursor<'_>) -> CertificateVerifyMessage {
    let hash = read_fixed(cursor, 1);
    let signature = read_fixed(cursor, 1);
    let algorithm = if hash.is_some() || signature.is_some() {
        Some(SignatureAndHash { hash, signature })
    } else {
        None
    };

    CertificateVerifyMessage {
        algorithm,
        signature: read_prefixed_blob(cursor, 2),
    }
}
