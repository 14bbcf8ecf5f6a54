// src/services/record_stream/hello.rs

use super::extensions::read_extension_list;
use super::{read_fixed, read_prefixed_list};
use crate::models::tls_record::{ClientHelloMessage, ServerHelloMessage};
use crate::services::byte_cursor::ByteCursor;
use crate::services::registry::Registry;
use crate::services::tls_parser::RANDOM_LEN;

/// Session id behind a 1-byte length; absent when that length is zero or the id is cut short.
fn read_session_id(cursor: &mut ByteCursor<'_>) -> Option<String> {
    let length = cursor.try_read_int(1)? as usize;
    if length == 0 {
        return None;
    }
    read_fixed(cursor, length)
}

pub fn parse_client_hello(cursor: &mut ByteCursor<'_>, registry: &Registry) -> ClientHelloMessage {
    ClientHelloMessage {
        client_version: read_fixed(cursor, 2),
        random: read_fixed(cursor, RANDOM_LEN),
        session_id: read_session_id(cursor),
        cipher_suites: read_prefixed_list(cursor, 2, 2),
        compression_methods: read_prefixed_list(cursor, 1, 1),
        extensions: read_extension_list(cursor, registry),
    }
}

pub fn parse_server_hello(cursor: &mut ByteCursor<'_>, registry: &Registry) -> ServerHelloMessage {
    ServerHelloMessage {
        server_version: read_fixed(cursor, 2),
        random: read_fixed(cursor, RANDOM_LEN),
        session_id: read_session_id(cursor),
        cipher_suite: read_fixed(cursor, 2),
        compression_method: read_fixed(cursor, 1),
        extensions: read_extension_list(cursor, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_hello_fields_in_order() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0xab; 32]);
        body.extend_from_slice(&[0x02, 0x01, 0x02]);
        body.extend_from_slice(&[0x00, 0x04, 0x13, 0x01, 0x13, 0x02]);
        body.extend_from_slice(&[0x01, 0x00]);
        body.extend_from_slice(&[0x00, 0x00]);

        let mut c = ByteCursor::new(&body);
        let hello = parse_client_hello(&mut c, Registry::standard());
        assert_eq!(hello.client_version.as_deref(), Some("0x0303"));
        assert_eq!(hello.random.as_ref().map(|r| r.len()), Some(2 + 64));
        assert_eq!(hello.session_id.as_deref(), Some("0x0102"));
        let suites = hello.cipher_suites.unwrap();
        assert_eq!(suites.values, vec!["0x1301", "0x1302"]);
        assert!(!suites.truncated);
        assert_eq!(hello.compression_methods.unwrap().values, vec!["0x00"]);
        assert!(hello.extensions.unwrap().entries.is_empty());
        assert!(!c.has_more());
    }

    #[test]
    fn client_hello_cut_inside_cipher_suites() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x00; 32]);
        body.push(0x00);
        body.extend_from_slice(&[0x00, 0x06, 0x13, 0x01, 0x13]);

        let mut c = ByteCursor::new(&body);
        let hello = parse_client_hello(&mut c, Registry::standard());
        assert_eq!(hello.session_id, None);
        let suites = hello.cipher_suites.unwrap();
        assert!(suites.truncated);
        assert_eq!(suites.values, vec!["0x1301", "0x13"]);
        assert_eq!(hello.compression_methods, None);
        assert_eq!(hello.extensions, None);
    }

    #[test]
    fn cut_random_is_left_out() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x42; 10]);
        let mut c = ByteCursor::new(&body);
        let hello = parse_client_hello(&mut c, Registry::standard());
        assert_eq!(hello.client_version.as_deref(), Some("0x0303"));
        assert_eq!(hello.random, None);
        assert_eq!(hello.session_id, None);
    }

    #[test]
    fn cut_session_id_is_left_out() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x00; 32]);
        body.push(0x20);
        body.extend_from_slice(&[0x07; 16]);
        let mut c = ByteCursor::new(&body);
        let hello = parse_server_hello(&mut c, Registry::standard());
        assert!(hello.random.is_some());
        assert_eq!(hello.session_id, None);
        assert_eq!(hello.cipher_suite, None);
    }

    #[test]
    fn server_hello_single_values() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x01; 32]);
        body.push(0x00);
        body.extend_from_slice(&[0xc0, 0x2f, 0x00]);
        body.extend_from_slice(&[0x00, 0x05, 0xff, 0x01, 0x00, 0x01, 0x00]);

        let mut c = ByteCursor::new(&body);
        let hello = parse_server_hello(&mut c, Registry::standard());
        assert_eq!(hello.cipher_suite.as_deref(), Some("0xc02f"));
        assert_eq!(hello.compression_method.as_deref(), Some("0x00"));
        let exts = hello.extensions.unwrap();
        assert_eq!(exts.entries[0].extension_type, "renegotiation_info");
        assert_eq!(exts.entries[0].value.as_deref(), Some("0x00"));
    }
}
