// src/services/registry.rs

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

// Extension Types (2 bytes)
pub const EXTENSION_TYPE_SERVER_NAME: u16 = 0x0000;
pub const EXTENSION_TYPE_SIGNATURE_ALGORITHMS: u16 = 0x000D;
pub const EXTENSION_TYPE_ALPN: u16 = 0x0010;
pub const EXTENSION_TYPE_SUPPORTED_VERSIONS: u16 = 0x002B;

// RFC 8701
pub const GREASE_VALUES: [u16; 16] = [
    0x0a0a, 0x1a1a, 0x2a2a, 0x3a3a, 0x4a4a, 0x5a5a, 0x6a6a, 0x7a7a, 0x8a8a, 0x9a9a, 0xaaaa, 0xbaba,
    0xcaca, 0xdada, 0xeaea, 0xfafa,
];

pub const GREASE_LABEL: &str = "GREASE";
pub const UNKNOWN_CIPHER_LABEL: &str = "Unknown";
pub const UNKNOWN_EXTENSION_LABEL: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TlsContentType {
    ChangeCipherSpec = 0x14,
    Alert = 0x15,
    Handshake = 0x16,
    ApplicationData = 0x17,
    Heartbeat = 0x18,
}

impl TlsContentType {
    pub const ALL: [TlsContentType; 5] = [
        TlsContentType::ChangeCipherSpec,
        TlsContentType::Alert,
        TlsContentType::Handshake,
        TlsContentType::ApplicationData,
        TlsContentType::Heartbeat,
    ];

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn try_from_u8(value: u8) -> Option<Self> {
        match value {
            0x14 => Some(TlsContentType::ChangeCipherSpec),
            0x15 => Some(TlsContentType::Alert),
            0x16 => Some(TlsContentType::Handshake),
            0x17 => Some(TlsContentType::ApplicationData),
            0x18 => Some(TlsContentType::Heartbeat),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TlsContentType::ChangeCipherSpec => "change_cipher_spec",
            TlsContentType::Alert => "alert",
            TlsContentType::Handshake => "handshake",
            TlsContentType::ApplicationData => "application_data",
            TlsContentType::Heartbeat => "heartbeat",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum HandshakeMessageType {
    HelloRequest = 0x00,
    ClientHello = 0x01,
    ServerHello = 0x02,
    HelloVerifyRequest = 0x03,
    NewSessionTicket = 0x04,
    EndOfEarlyData = 0x05,
    HelloRetryRequest = 0x06,
    EncryptedExtensions = 0x08,
    Certificate = 0x0B,
    ServerKeyExchange = 0x0C,
    CertificateRequest = 0x0D,
    ServerHelloDone = 0x0E,
    CertificateVerify = 0x0F,
    ClientKeyExchange = 0x10,
    Finished = 0x14,
    CertificateUrl = 0x15,
    CertificateStatus = 0x16,
    KeyUpdate = 0x18,
    MessageHash = 0xFE,
}

impl HandshakeMessageType {
    pub const ALL: [HandshakeMessageType; 19] = [
        HandshakeMessageType::HelloRequest,
        HandshakeMessageType::ClientHello,
        HandshakeMessageType::ServerHello,
        HandshakeMessageType::HelloVerifyRequest,
        HandshakeMessageType::NewSessionTicket,
        HandshakeMessageType::EndOfEarlyData,
        HandshakeMessageType::HelloRetryRequest,
        HandshakeMessageType::EncryptedExtensions,
        HandshakeMessageType::Certificate,
        HandshakeMessageType::ServerKeyExchange,
        HandshakeMessageType::CertificateRequest,
        HandshakeMessageType::ServerHelloDone,
        HandshakeMessageType::CertificateVerify,
        HandshakeMessageType::ClientKeyExchange,
        HandshakeMessageType::Finished,
        HandshakeMessageType::CertificateUrl,
        HandshakeMessageType::CertificateStatus,
        HandshakeMessageType::KeyUpdate,
        HandshakeMessageType::MessageHash,
    ];

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn try_from_u8(value: u8) -> Option<Self> {
        HandshakeMessageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_u8() == value)
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandshakeMessageType::HelloRequest => "hello_request",
            HandshakeMessageType::ClientHello => "client_hello",
            HandshakeMessageType::ServerHello => "server_hello",
            HandshakeMessageType::HelloVerifyRequest => "hello_verify_request",
            HandshakeMessageType::NewSessionTicket => "new_session_ticket",
            HandshakeMessageType::EndOfEarlyData => "end_of_early_data",
            HandshakeMessageType::HelloRetryRequest => "hello_retry_request",
            HandshakeMessageType::EncryptedExtensions => "encrypted_extensions",
            HandshakeMessageType::Certificate => "certificate",
            HandshakeMessageType::ServerKeyExchange => "server_key_exchange",
            HandshakeMessageType::CertificateRequest => "certificate_request",
            HandshakeMessageType::ServerHelloDone => "server_hello_done",
            HandshakeMessageType::CertificateVerify => "certificate_verify",
            HandshakeMessageType::ClientKeyExchange => "client_key_exchange",
            HandshakeMessageType::Finished => "finished",
            HandshakeMessageType::CertificateUrl => "certificate_url",
            HandshakeMessageType::CertificateStatus => "certificate_status",
            HandshakeMessageType::KeyUpdate => "key_update",
            HandshakeMessageType::MessageHash => "message_hash",
        }
    }
}

const EXTENSION_TYPES: &[(u16, &str)] = &[
    (0x0000, "server_name"),
    (0x0001, "max_fragment_length"),
    (0x0002, "client_certificate_url"),
    (0x0003, "trusted_ca_keys"),
    (0x0004, "truncated_hmac"),
    (0x0005, "status_request"),
    (0x0006, "user_mapping"),
    (0x0007, "client_authz"),
    (0x0008, "server_authz"),
    (0x0009, "cert_type"),
    (0x000a, "supported_groups"),
    (0x000b, "ec_point_formats"),
    (0x000c, "srp"),
    (0x000d, "signature_algorithms"),
    (0x000e, "use_srtp"),
    (0x000f, "heartbeat"),
    (0x0010, "application_layer_protocol_negotiation"),
    (0x0011, "status_request_v2"),
    (0x0012, "signed_certificate_timestamp"),
    (0x0013, "client_certificate_type"),
    (0x0014, "server_certificate_type"),
    (0x0015, "padding"),
    (0x0016, "encrypt_then_mac"),
    (0x0017, "extended_master_secret"),
    (0x0018, "token_binding"),
    (0x0019, "cached_info"),
    (0x001a, "tls_lts"),
    (0x001b, "compress_certificate"),
    (0x001c, "record_size_limit"),
    (0x001d, "pwd_protect"),
    (0x001e, "pwd_clear"),
    (0x001f, "password_salt"),
    (0x0020, "ticket_pinning"),
    (0x0021, "tls_cert_with_extern_psk"),
    (0x0022, "delegated_credential"),
    (0x0023, "session_ticket"),
    (0x0024, "TLMSP"),
    (0x0025, "TLMSP_proxying"),
    (0x0026, "TLMSP_delegate"),
    (0x0027, "supported_ekt_ciphers"),
    (0x0029, "pre_shared_key"),
    (0x002a, "early_data"),
    (0x002b, "supported_versions"),
    (0x002c, "cookie"),
    (0x002d, "psk_key_exchange_modes"),
    (0x002f, "certificate_authorities"),
    (0x0030, "oid_filters"),
    (0x0031, "post_handshake_auth"),
    (0x0032, "signature_algorithms_cert"),
    (0x0033, "key_share"),
    (0x0034, "transparency_info"),
    (0x0035, "connection_id_deprecated"),
    (0x0036, "connection_id"),
    (0x0037, "external_id_hash"),
    (0x0038, "external_session_id"),
    (0x0039, "quic_transport_parameters"),
    (0x003a, "ticket_request"),
    (0x003b, "dnssec_chain"),
    (0x003c, "sequence_number_encryption_algorithms"),
    (0x003d, "rrc"),
    (0x4469, "application_settings"),
    (0xfd00, "ech_outer_extensions"),
    (0xfe0d, "encrypted_client_hello"),
    (0xff01, "renegotiation_info"),
];

const CIPHER_SUITES: &[(u16, &str)] = &[
    (0x0000, "TLS_NULL_WITH_NULL_NULL"),
    (0x0001, "TLS_RSA_WITH_NULL_MD5"),
    (0x0002, "TLS_RSA_WITH_NULL_SHA"),
    (0x0003, "TLS_RSA_EXPORT_WITH_RC4_40_MD5"),
    (0x0004, "TLS_RSA_WITH_RC4_128_MD5"),
    (0x0005, "TLS_RSA_WITH_RC4_128_SHA"),
    (0x0006, "TLS_RSA_EXPORT_WITH_RC2_CBC_40_MD5"),
    (0x0007, "TLS_RSA_WITH_IDEA_CBC_SHA"),
    (0x0008, "TLS_RSA_EXPORT_WITH_DES40_CBC_SHA"),
    (0x0009, "TLS_RSA_WITH_DES_CBC_SHA"),
    (0x000a, "TLS_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x000d, "TLS_DH_DSS_WITH_3DES_EDE_CBC_SHA"),
    (0x0010, "TLS_DH_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x0013, "TLS_DHE_DSS_WITH_3DES_EDE_CBC_SHA"),
    (0x0016, "TLS_DHE_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0x0018, "TLS_DH_anon_WITH_RC4_128_MD5"),
    (0x001b, "TLS_DH_anon_WITH_3DES_EDE_CBC_SHA"),
    (0x002f, "TLS_RSA_WITH_AES_128_CBC_SHA"),
    (0x0030, "TLS_DH_DSS_WITH_AES_128_CBC_SHA"),
    (0x0031, "TLS_DH_RSA_WITH_AES_128_CBC_SHA"),
    (0x0032, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA"),
    (0x0033, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA"),
    (0x0034, "TLS_DH_anon_WITH_AES_128_CBC_SHA"),
    (0x0035, "TLS_RSA_WITH_AES_256_CBC_SHA"),
    (0x0036, "TLS_DH_DSS_WITH_AES_256_CBC_SHA"),
    (0x0037, "TLS_DH_RSA_WITH_AES_256_CBC_SHA"),
    (0x0038, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA"),
    (0x0039, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA"),
    (0x003a, "TLS_DH_anon_WITH_AES_256_CBC_SHA"),
    (0x003b, "TLS_RSA_WITH_NULL_SHA256"),
    (0x003c, "TLS_RSA_WITH_AES_128_CBC_SHA256"),
    (0x003d, "TLS_RSA_WITH_AES_256_CBC_SHA256"),
    (0x0040, "TLS_DHE_DSS_WITH_AES_128_CBC_SHA256"),
    (0x0041, "TLS_RSA_WITH_CAMELLIA_128_CBC_SHA"),
    (0x0045, "TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA"),
    (0x0067, "TLS_DHE_RSA_WITH_AES_128_CBC_SHA256"),
    (0x006a, "TLS_DHE_DSS_WITH_AES_256_CBC_SHA256"),
    (0x006b, "TLS_DHE_RSA_WITH_AES_256_CBC_SHA256"),
    (0x0084, "TLS_RSA_WITH_CAMELLIA_256_CBC_SHA"),
    (0x0088, "TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA"),
    (0x008c, "TLS_PSK_WITH_AES_128_CBC_SHA"),
    (0x008d, "TLS_PSK_WITH_AES_256_CBC_SHA"),
    (0x0096, "TLS_RSA_WITH_SEED_CBC_SHA"),
    (0x009c, "TLS_RSA_WITH_AES_128_GCM_SHA256"),
    (0x009d, "TLS_RSA_WITH_AES_256_GCM_SHA384"),
    (0x009e, "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256"),
    (0x009f, "TLS_DHE_RSA_WITH_AES_256_GCM_SHA384"),
    (0x00a2, "TLS_DHE_DSS_WITH_AES_128_GCM_SHA256"),
    (0x00a3, "TLS_DHE_DSS_WITH_AES_256_GCM_SHA384"),
    (0x00a8, "TLS_PSK_WITH_AES_128_GCM_SHA256"),
    (0x00a9, "TLS_PSK_WITH_AES_256_GCM_SHA384"),
    (0x00ae, "TLS_PSK_WITH_AES_128_CBC_SHA256"),
    (0x00af, "TLS_PSK_WITH_AES_256_CBC_SHA384"),
    (0x00ba, "TLS_RSA_WITH_CAMELLIA_128_CBC_SHA256"),
    (0x00be, "TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA256"),
    (0x00c0, "TLS_RSA_WITH_CAMELLIA_256_CBC_SHA256"),
    (0x00c4, "TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA256"),
    (0x00ff, "TLS_EMPTY_RENEGOTIATION_INFO_SCSV"),
    (0x1301, "TLS_AES_128_GCM_SHA256"),
    (0x1302, "TLS_AES_256_GCM_SHA384"),
    (0x1303, "TLS_CHACHA20_POLY1305_SHA256"),
    (0x1304, "TLS_AES_128_CCM_SHA256"),
    (0x1305, "TLS_AES_128_CCM_8_SHA256"),
    (0x5600, "TLS_FALLBACK_SCSV"),
    (0xc001, "TLS_ECDH_ECDSA_WITH_NULL_SHA"),
    (0xc002, "TLS_ECDH_ECDSA_WITH_RC4_128_SHA"),
    (0xc003, "TLS_ECDH_ECDSA_WITH_3DES_EDE_CBC_SHA"),
    (0xc004, "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA"),
    (0xc005, "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA"),
    (0xc006, "TLS_ECDHE_ECDSA_WITH_NULL_SHA"),
    (0xc007, "TLS_ECDHE_ECDSA_WITH_RC4_128_SHA"),
    (0xc008, "TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA"),
    (0xc009, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA"),
    (0xc00a, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA"),
    (0xc00b, "TLS_ECDH_RSA_WITH_NULL_SHA"),
    (0xc00c, "TLS_ECDH_RSA_WITH_RC4_128_SHA"),
    (0xc00d, "TLS_ECDH_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0xc00e, "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA"),
    (0xc00f, "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA"),
    (0xc010, "TLS_ECDHE_RSA_WITH_NULL_SHA"),
    (0xc011, "TLS_ECDHE_RSA_WITH_RC4_128_SHA"),
    (0xc012, "TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA"),
    (0xc013, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA"),
    (0xc014, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA"),
    (0xc023, "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256"),
    (0xc024, "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384"),
    (0xc025, "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA256"),
    (0xc026, "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA384"),
    (0xc027, "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256"),
    (0xc028, "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384"),
    (0xc029, "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA256"),
    (0xc02a, "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA384"),
    (0xc02b, "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"),
    (0xc02c, "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"),
    (0xc02d, "TLS_ECDH_ECDSA_WITH_AES_128_GCM_SHA256"),
    (0xc02e, "TLS_ECDH_ECDSA_WITH_AES_256_GCM_SHA384"),
    (0xc02f, "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
    (0xc030, "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
    (0xc031, "TLS_ECDH_RSA_WITH_AES_128_GCM_SHA256"),
    (0xc032, "TLS_ECDH_RSA_WITH_AES_256_GCM_SHA384"),
    (0xc035, "TLS_ECDHE_PSK_WITH_AES_128_CBC_SHA"),
    (0xc036, "TLS_ECDHE_PSK_WITH_AES_256_CBC_SHA"),
    (0xc09c, "TLS_RSA_WITH_AES_128_CCM"),
    (0xc09d, "TLS_RSA_WITH_AES_256_CCM"),
    (0xc09e, "TLS_DHE_RSA_WITH_AES_128_CCM"),
    (0xc09f, "TLS_DHE_RSA_WITH_AES_256_CCM"),
    (0xc0a0, "TLS_RSA_WITH_AES_128_CCM_8"),
    (0xc0a1, "TLS_RSA_WITH_AES_256_CCM_8"),
    (0xc0ac, "TLS_ECDHE_ECDSA_WITH_AES_128_CCM"),
    (0xc0ad, "TLS_ECDHE_ECDSA_WITH_AES_256_CCM"),
    (0xc0ae, "TLS_ECDHE_ECDSA_WITH_AES_128_CCM_8"),
    (0xc0af, "TLS_ECDHE_ECDSA_WITH_AES_256_CCM_8"),
    (0xcca8, "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
    (0xcca9, "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"),
    (0xccaa, "TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
    (0xccab, "TLS_PSK_WITH_CHACHA20_POLY1305_SHA256"),
    (0xccac, "TLS_ECDHE_PSK_WITH_CHACHA20_POLY1305_SHA256"),
    (0xccad, "TLS_DHE_PSK_WITH_CHACHA20_POLY1305_SHA256"),
    (0xccae, "TLS_RSA_PSK_WITH_CHACHA20_POLY1305_SHA256"),
    (0xd001, "TLS_ECDHE_PSK_WITH_AES_128_GCM_SHA256"),
    (0xd002, "TLS_ECDHE_PSK_WITH_AES_256_GCM_SHA384"),
];

static STANDARD: Lazy<Registry> = Lazy::new(Registry::standard_tables);

/// Integer-to-name lookup tables consulted by both decoders.
///
/// `lookup`-style accessors return `None` for unlisted codes; the `*_label` accessors apply
/// the fallback each decoder needs.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    content_types: HashMap<u8, String>,
    handshake_types: HashMap<u8, String>,
    extension_types: HashMap<u16, String>,
    cipher_suites: HashMap<u16, String>,
    grease: HashSet<u16>,
}

impl Registry {
    /// Shared registry seeded with the IANA tables.
    pub fn standard() -> &'static Registry {
        &STANDARD
    }

    /// Registry with no names at all; only the fallbacks apply.
    pub fn empty() -> Self {
        Registry::default()
    }

    fn standard_tables() -> Self {
        let mut registry = Registry::empty();
        for t in TlsContentType::ALL {
            registry.content_types.insert(t.as_u8(), t.name().to_string());
        }
        for t in HandshakeMessageType::ALL {
            registry.handshake_types.insert(t.as_u8(), t.name().to_string());
        }
        for (code, name) in EXTENSION_TYPES {
            registry.extension_types.insert(*code, (*name).to_string());
        }
        for (code, name) in CIPHER_SUITES {
            registry.cipher_suites.insert(*code, (*name).to_string());
        }
        registry.grease.extend(GREASE_VALUES);
        registry
    }

    pub fn with_content_type(mut self, code: u8, name: &str) -> Self {
        self.content_types.insert(code, name.to_string());
        self
    }

    pub fn with_handshake_type(mut self, code: u8, name: &str) -> Self {
        self.handshake_types.insert(code, name.to_string());
        self
    }

    pub fn with_extension_type(mut self, code: u16, name: &str) -> Self {
        self.extension_types.insert(code, name.to_string());
        self
    }

    pub fn with_cipher_suite(mut self, code: u16, name: &str) -> Self {
        self.cipher_suites.insert(code, name.to_string());
        self
    }

    pub fn with_grease(mut self, code: u16) -> Self {
        self.grease.insert(code);
        self
    }

    pub fn content_type(&self, code: u8) -> Option<&str> {
        self.content_types.get(&code).map(String::as_str)
    }

    pub fn handshake_type(&self, code: u8) -> Option<&str> {
        self.handshake_types.get(&code).map(String::as_str)
    }

    pub fn extension_type(&self, code: u16) -> Option<&str> {
        self.extension_types.get(&code).map(String::as_str)
    }

    pub fn cipher_suite(&self, code: u16) -> Option<&str> {
        self.cipher_suites.get(&code).map(String::as_str)
    }

    pub fn is_grease(&self, code: u16) -> bool {
        self.grease.contains(&code)
    }

    /// Content type name, or the decimal code.
    pub fn content_type_label(&self, code: u8) -> String {
        self.content_type(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// Handshake type name, or the decimal code.
    pub fn handshake_type_label(&self, code: u8) -> String {
        self.handshake_type(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    /// `GREASE`, the suite name, or `Unknown`.
    pub fn cipher_suite_label(&self, code: u16) -> String {
        if self.is_grease(code) {
            return GREASE_LABEL.to_string();
        }
        self.cipher_suite(code)
            .unwrap_or(UNKNOWN_CIPHER_LABEL)
            .to_string()
    }

    /// `GREASE`, the extension name, or `unknown`.
    pub fn extension_label(&self, code: u16) -> String {
        if self.is_grease(code) {
            return GREASE_LABEL.to_string();
        }
        self.extension_type(code)
            .unwrap_or(UNKNOWN_EXTENSION_LABEL)
            .to_string()
    }

    /// Extension name, or `0x` followed by the four hex digits.
    pub fn extension_label_or_hex(&self, code: u16) -> String {
        self.extension_type(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("0x{:04x}", code))
    }
}
