// src/services/tls_parser.rs

use super::byte_cursor::ByteCursor;
use super::errors::TlsParserError;
use super::registry::{HandshakeMessageType, Registry, TlsContentType};
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

// --- Record and handshake header sizes ---
pub const RECORD_HEADER_LEN: usize = 5;
pub const HANDSHAKE_HEADER_LEN: usize = 4;
pub const RANDOM_LEN: usize = 32;

fn serialize_hex<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    serializer.serialize_str(&hex::encode(bytes))
}

/// One decoded field: the exact bytes consumed plus their decoded form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field<T> {
    #[serde(serialize_with = "serialize_hex")]
    pub data: Vec<u8>,
    pub value: T,
}

impl<T> Field<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        Field {
            data: self.data,
            value: f(self.value),
        }
    }

    /// Lower-case hex of the captured bytes.
    pub fn hex(&self) -> String {
        hex::encode(&self.data)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HelloRecord<M> {
    pub content_type: Field<u8>,
    pub version: Field<u16>,
    pub length: Field<u16>,
    pub handshake: Field<Handshake<M>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Handshake<M> {
    pub handshake_type: Field<u8>,
    pub handshake_length: Field<u32>,
    pub message: M,
}

#[derive(Debug, Clone, Serialize)]
pub struct Extension {
    pub extension_type: Field<String>,
    pub length: Field<u16>,
    pub value: Field<Vec<u8>>,
}

impl Extension {
    /// Numeric extension type as it appeared on the wire.
    pub fn code(&self) -> u16 {
        match self.extension_type.data.as_slice() {
            [hi, lo] => u16::from_be_bytes([*hi, *lo]),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientHello {
    pub hello_version: Field<u16>,
    pub random: Field<Vec<u8>>,
    pub session_id_length: Field<u8>,
    pub session_id: Field<Vec<u8>>,
    pub cipher_suites_length: Field<u16>,
    pub cipher_suites: Field<Vec<Field<String>>>,
    pub compression_methods_length: Field<u8>,
    pub compression_methods: Field<Vec<Field<u8>>>,
    pub extensions_length: Field<u16>,
    pub extensions: Field<Vec<Extension>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerHello {
    pub server_version: Field<u16>,
    pub random: Field<Vec<u8>>,
    pub session_id_length: Field<u8>,
    pub session_id: Field<Vec<u8>>,
    pub cipher_suite: Field<String>,
    pub compression_method: Field<u8>,
    pub extensions_length: Field<u16>,
    pub extensions: Field<Vec<Extension>>,
}

pub type ClientHelloRecord = HelloRecord<ClientHello>;
pub type ServerHelloRecord = HelloRecord<ServerHello>;

impl<M> HelloRecord<M> {
    pub fn message(&self) -> &M {
        &self.handshake.value.message
    }
}

impl ClientHello {
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions.value
    }
}

impl ServerHello {
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions.value
    }
}

/// Two cursors over one buffer: `values` decodes, `raw` captures the same span.
struct DualCursor<'a> {
    values: ByteCursor<'a>,
    raw: ByteCursor<'a>,
}

impl<'a> DualCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        let values = ByteCursor::new(data);
        let raw = values.clone();
        DualCursor { values, raw }
    }

    fn has_more(&self) -> bool {
        self.values.has_more()
    }

    fn remaining(&self) -> usize {
        self.values.remaining()
    }

    fn int_field(&mut self, n: usize) -> Result<Field<u32>, TlsParserError> {
        let value = self.values.read_int(n)?;
        let data = self.raw.get_bytes(n)?.to_vec();
        Ok(Field { data, value })
    }

    fn bytes_field(&mut self, n: usize) -> Result<Field<Vec<u8>>, TlsParserError> {
        let value = self.values.get_bytes(n)?.to_vec();
        let data = self.raw.get_bytes(n)?.to_vec();
        Ok(Field { data, value })
    }

    /// Hands the next `n` bytes to `decode` and captures them as the field's data.
    fn nested<T>(
        &mut self,
        n: usize,
        decode: impl FnOnce(&'a [u8]) -> Result<T, TlsParserError>,
    ) -> Result<Field<T>, TlsParserError> {
        let value = decode(self.values.get_bytes(n)?)?;
        let data = self.raw.get_bytes(n)?.to_vec();
        Ok(Field { data, value })
    }
}

// -- functions --

pub fn decode_client_hello(data: &[u8]) -> Result<ClientHelloRecord, TlsParserError> {
    decode_client_hello_with(data, Registry::standard())
}

pub fn decode_client_hello_with(
    data: &[u8],
    registry: &Registry,
) -> Result<ClientHelloRecord, TlsParserError> {
    decode_hello_record(data, HandshakeMessageType::ClientHello, |c| {
        parse_client_hello(c, registry)
    })
}

pub fn decode_server_hello(data: &[u8]) -> Result<ServerHelloRecord, TlsParserError> {
    decode_server_hello_with(data, Registry::standard())
}

pub fn decode_server_hello_with(
    data: &[u8],
    registry: &Registry,
) -> Result<ServerHelloRecord, TlsParserError> {
    decode_hello_record(data, HandshakeMessageType::ServerHello, |c| {
        parse_server_hello(c, registry)
    })
}

fn decode_hello_record<M>(
    data: &[u8],
    expected: HandshakeMessageType,
    parse: impl FnOnce(&mut DualCursor<'_>) -> Result<M, TlsParserError>,
) -> Result<HelloRecord<M>, TlsParserError> {
    let mut c = DualCursor::new(data);

    let content_type = c.int_field(1)?.map(|v| v as u8);
    if content_type.value != TlsContentType::Handshake.as_u8() {
        return Err(TlsParserError::NotHandshakeData(content_type.value));
    }

    let version = c.int_field(2)?.map(|v| v as u16);
    let length = c.int_field(2)?.map(|v| v as u16);
    let declared = length.value as usize;
    if data.len() != declared + RECORD_HEADER_LEN {
        return Err(TlsParserError::IncorrectHandshakeLength {
            declared,
            actual: data.len().saturating_sub(RECORD_HEADER_LEN),
        });
    }

    debug!(
        "Strict decode: record version=0x{:04x}, length={}, expecting {:?}",
        version.value, declared, expected
    );

    let handshake = c.nested(declared, |bytes| decode_handshake(bytes, expected, parse))?;

    Ok(HelloRecord {
        content_type,
        version,
        length,
        handshake,
    })
}

fn decode_handshake<M>(
    bytes: &[u8],
    expected: HandshakeMessageType,
    parse: impl FnOnce(&mut DualCursor<'_>) -> Result<M, TlsParserError>,
) -> Result<Handshake<M>, TlsParserError> {
    let mut c = DualCursor::new(bytes);

    let handshake_type = c.int_field(1)?.map(|v| v as u8);
    if handshake_type.value != expected.as_u8() {
        return Err(match expected {
            HandshakeMessageType::ServerHello => {
                TlsParserError::NotServerHello(handshake_type.value)
            }
            _ => TlsParserError::NotClientHello(handshake_type.value),
        });
    }

    let handshake_length = c.int_field(3)?;
    let declared = handshake_length.value as usize;
    if bytes.len() != declared + HANDSHAKE_HEADER_LEN {
        return Err(TlsParserError::InsufficientClientHelloData {
            declared,
            actual: bytes.len().saturating_sub(HANDSHAKE_HEADER_LEN),
        });
    }

    let message = parse(&mut c)?;
    if c.has_more() {
        trace!("{} trailing bytes after hello message", c.remaining());
        return Err(TlsParserError::TrailingHandshakeData {
            declared,
            trailing: c.remaining(),
        });
    }

    Ok(Handshake {
        handshake_type,
        handshake_length,
        message,
    })
}

fn parse_client_hello(
    c: &mut DualCursor<'_>,
    registry: &Registry,
) -> Result<ClientHello, TlsParserError> {
    let hello_version = c.int_field(2)?.map(|v| v as u16);
    let random = c.bytes_field(RANDOM_LEN)?;

    let session_id_length = c.int_field(1)?.map(|v| v as u8);
    let session_id = c.bytes_field(session_id_length.value as usize)?;

    let cipher_suites_length = c.int_field(2)?.map(|v| v as u16);
    let cipher_suites = c.nested(cipher_suites_length.value as usize, |bytes| {
        parse_cipher_suites(bytes, registry)
    })?;

    let compression_methods_length = c.int_field(1)?.map(|v| v as u8);
    let compression_methods = c.nested(
        compression_methods_length.value as usize,
        parse_compression_methods,
    )?;

    let (extensions_length, extensions) = parse_extensions_block(c, registry)?;

    Ok(ClientHello {
        hello_version,
        random,
        session_id_length,
        session_id,
        cipher_suites_length,
        cipher_suites,
        compression_methods_length,
        compression_methods,
        extensions_length,
        extensions,
    })
}

fn parse_server_hello(
    c: &mut DualCursor<'_>,
    registry: &Registry,
) -> Result<ServerHello, TlsParserError> {
    let server_version = c.int_field(2)?.map(|v| v as u16);
    let random = c.bytes_field(RANDOM_LEN)?;

    let session_id_length = c.int_field(1)?.map(|v| v as u8);
    let session_id = c.bytes_field(session_id_length.value as usize)?;

    let cipher_suite = c
        .int_field(2)?
        .map(|v| registry.cipher_suite_label(v as u16));
    let compression_method = c.int_field(1)?.map(|v| v as u8);

    let (extensions_length, extensions) = parse_extensions_block(c, registry)?;

    Ok(ServerHello {
        server_version,
        random,
        session_id_length,
        session_id,
        cipher_suite,
        compression_method,
        extensions_length,
        extensions,
    })
}

/// The extensions block is optional: a hello that ends right after its compression
/// method(s) carries an empty list.
fn parse_extensions_block(
    c: &mut DualCursor<'_>,
    registry: &Registry,
) -> Result<(Field<u16>, Field<Vec<Extension>>), TlsParserError> {
    if !c.has_more() {
        let empty_len = Field {
            data: Vec::new(),
            value: 0,
        };
        let empty = Field {
            data: Vec::new(),
            value: Vec::new(),
        };
        return Ok((empty_len, empty));
    }

    let extensions_length = c.int_field(2)?.map(|v| v as u16);
    let extensions = c.nested(extensions_length.value as usize, |bytes| {
        parse_extensions(bytes, registry)
    })?;
    Ok((extensions_length, extensions))
}

fn parse_cipher_suites(
    bytes: &[u8],
    registry: &Registry,
) -> Result<Vec<Field<String>>, TlsParserError> {
    let mut c = DualCursor::new(bytes);
    let mut suites = Vec::with_capacity(bytes.len() / 2);
    while c.has_more() {
        let suite = c
            .int_field(2)?
            .map(|v| registry.cipher_suite_label(v as u16));
        suites.push(suite);
    }
    Ok(suites)
}

fn parse_compression_methods(bytes: &[u8]) -> Result<Vec<Field<u8>>, TlsParserError> {
    let mut c = DualCursor::new(bytes);
    let mut methods = Vec::with_capacity(bytes.len());
    while c.has_more() {
        methods.push(c.int_field(1)?.map(|v| v as u8));
    }
    Ok(methods)
}

fn parse_extensions(bytes: &[u8], registry: &Registry) -> Result<Vec<Extension>, TlsParserError> {
    let mut c = DualCursor::new(bytes);
    let mut extensions = Vec::new();
    while c.has_more() {
        let extension_type = c
            .int_field(2)?
            .map(|v| registry.extension_label(v as u16));
        let length = c.int_field(2)?.map(|v| v as u16);
        let value = c.bytes_field(length.value as usize)?;
        extensions.push(Extension {
            extension_type,
            length,
            value,
        });
    }
    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_handshake(msg_type: u8, body: &[u8]) -> Vec<u8> {
        let mut hs = vec![msg_type];
        hs.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
        hs.extend_from_slice(body);
        let mut record = vec![0x16, 0x03, 0x01];
        record.extend_from_slice(&(hs.len() as u16).to_be_bytes());
        record.extend_from_slice(&hs);
        record
    }

    fn minimal_client_hello_body() -> Vec<u8> {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x11; 32]);
        body.push(0x00); // session id
        body.extend_from_slice(&[0x00, 0x04, 0x13, 0x01, 0x0a, 0x0a]);
        body.extend_from_slice(&[0x01, 0x00]);
        // extensions: server_name (empty) + unknown 0x7777 with two bytes
        body.extend_from_slice(&[0x00, 0x0a]);
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        body.extend_from_slice(&[0x77, 0x77, 0x00, 0x02, 0xbe, 0xef]);
        body
    }

    #[test]
    fn decodes_every_field_with_raw_bytes() {
        let record = wrap_handshake(0x01, &minimal_client_hello_body());
        let parsed = decode_client_hello(&record).unwrap();

        assert_eq!(parsed.content_type.value, 0x16);
        assert_eq!(parsed.version.data, vec![0x03, 0x01]);
        assert_eq!(parsed.version.value, 0x0301);
        assert_eq!(parsed.handshake.data, record[5..].to_vec());

        let hello = parsed.message();
        assert_eq!(hello.hello_version.value, 0x0303);
        assert_eq!(hello.random.value, vec![0x11; 32]);
        assert!(hello.session_id.value.is_empty());

        let suites: Vec<&str> = hello
            .cipher_suites
            .value
            .iter()
            .map(|s| s.value.as_str())
            .collect();
        assert_eq!(suites, vec!["TLS_AES_128_GCM_SHA256", "GREASE"]);
        assert_eq!(hello.cipher_suites.value[1].data, vec![0x0a, 0x0a]);

        let exts = hello.extensions();
        assert_eq!(exts.len(), 2);
        assert_eq!(exts[0].extension_type.value, "server_name");
        assert_eq!(exts[1].extension_type.value, "unknown");
        assert_eq!(exts[1].code(), 0x7777);
        assert_eq!(exts[1].value.value, vec![0xbe, 0xef]);
    }

    #[test]
    fn rejects_application_data() {
        let mut record = wrap_handshake(0x01, &minimal_client_hello_body());
        record[0] = 0x17;
        assert_eq!(
            decode_client_hello(&record).unwrap_err(),
            TlsParserError::NotHandshakeData(0x17)
        );
    }

    #[test]
    fn rejects_record_length_mismatch() {
        let mut record = wrap_handshake(0x01, &minimal_client_hello_body());
        record.push(0x00);
        assert!(matches!(
            decode_client_hello(&record),
            Err(TlsParserError::IncorrectHandshakeLength { .. })
        ));
    }

    #[test]
    fn rejects_server_hello_as_client_hello() {
        let record = wrap_handshake(0x02, &minimal_client_hello_body());
        assert_eq!(
            decode_client_hello(&record).unwrap_err(),
            TlsParserError::NotClientHello(0x02)
        );
    }

    #[test]
    fn rejects_short_cipher_list() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x00; 32]);
        body.push(0x00);
        body.extend_from_slice(&[0x00, 0x08, 0x13, 0x01]);
        let record = wrap_handshake(0x01, &body);
        assert!(matches!(
            decode_client_hello(&record),
            Err(TlsParserError::Incomplete { .. })
        ));
    }

    #[test]
    fn rejects_bytes_after_extensions() {
        let mut body = minimal_client_hello_body();
        body.extend_from_slice(&[0xde, 0xad]);
        let record = wrap_handshake(0x01, &body);
        assert_eq!(
            decode_client_hello(&record).unwrap_err(),
            TlsParserError::TrailingHandshakeData {
                declared: body.len(),
                trailing: 2,
            }
        );
    }

    #[test]
    fn missing_extensions_block_is_empty() {
        let mut body = vec![0x03, 0x01];
        body.extend_from_slice(&[0x00; 32]);
        body.push(0x00);
        body.extend_from_slice(&[0x00, 0x02, 0x00, 0x2f, 0x01, 0x00]);
        let record = wrap_handshake(0x01, &body);
        let parsed = decode_client_hello(&record).unwrap();
        assert!(parsed.message().extensions().is_empty());
        assert!(parsed.message().extensions_length.data.is_empty());
    }

    #[test]
    fn decodes_server_hello() {
        let mut body = vec![0x03, 0x03];
        body.extend_from_slice(&[0x22; 32]);
        body.push(0x00);
        body.extend_from_slice(&[0x13, 0x02, 0x00]);
        body.extend_from_slice(&[0x00, 0x06, 0x00, 0x2b, 0x00, 0x02, 0x03, 0x04]);
        let record = wrap_handshake(0x02, &body);
        let parsed = decode_server_hello(&record).unwrap();
        let hello = parsed.message();
        assert_eq!(hello.cipher_suite.value, "TLS_AES_256_GCM_SHA384");
        assert_eq!(hello.extensions()[0].extension_type.value, "supported_versions");

        assert_eq!(
            decode_server_hello(&wrap_handshake(0x01, &body)).unwrap_err(),
            TlsParserError::NotServerHello(0x01)
        );
    }
}
