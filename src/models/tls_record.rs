use serde::Serialize;

fn is_false(flag: &bool) -> bool {
    !*flag
}

// ==========
// RECORD LAYER

/// One record as read from the stream. `length` is always the declared length; when fewer
/// bytes were available `truncated` is set and only the available prefix was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsRecord {
    #[serde(rename = "type")]
    pub content_type: String,
    pub version: String,
    pub length: u16,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<RecordValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordValue {
    Handshake(Handshake),
    Raw(String),
}

impl TlsRecord {
    pub fn handshake(&self) -> Option<&Handshake> {
        match &self.value {
            Some(RecordValue::Handshake(hs)) => Some(hs),
            _ => None,
        }
    }
}

/// Handshake header plus the decoded body. Sub-fields that could not be read are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handshake {
    pub handshake_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handshake_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<HandshakeMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeMessage {
    ClientHello(ClientHelloMessage),
    ServerHello(ServerHelloMessage),
    NewSessionTicket(NewSessionTicketMessage),
    Certificate(CertificateMessage),
    CertificateRequest(CertificateRequestMessage),
    CertificateVerify(CertificateVerifyMessage),
    HandshakeValue(String),
}

// ==========
// SHARED SHAPES

/// Length-prefixed run of fixed-width entries, each rendered as hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexList {
    pub length: u32,
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

/// Length-prefixed opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HexBlob {
    pub length: u32,
    pub value: String,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

/// Length-prefixed run of length-prefixed entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobList {
    pub length: u32,
    pub entries: Vec<HexBlob>,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionEntry {
    #[serde(rename = "type")]
    pub extension_type: String,
    pub length: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionList {
    pub length: u16,
    pub entries: Vec<ExtensionEntry>,
    #[serde(skip_serializing_if = "is_false")]
    pub truncated: bool,
}

// ==========
// HANDSHAKE BODIES

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientHelloMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher_suites: Option<HexList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_methods: Option<HexList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionList>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerHelloMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher_suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionList>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewSessionTicketMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_lifetime_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<HexBlob>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_list: Option<BlobList>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateRequestMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_types: Option<HexList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_signature_algorithms: Option<HexList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_authorities: Option<BlobList>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignatureAndHash {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateVerifyMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SignatureAndHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<HexBlob>,
}
