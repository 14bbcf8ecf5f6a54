//! Builders for hello messages and record streams.

#![allow(dead_code)]

pub fn handshake(handshake_type: u8, body: &[u8]) -> Vec<u8> {
    let mut hs = vec![handshake_type];
    hs.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]);
    hs.extend_from_slice(body);
    hs
}

pub fn record(content_type: u8, version: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![content_type];
    out.extend_from_slice(&version.to_be_bytes());
    out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn extensions_block(extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut block = Vec::new();
    for (code, value) in extensions {
        block.extend_from_slice(&code.to_be_bytes());
        block.extend_from_slice(&(value.len() as u16).to_be_bytes());
        block.extend_from_slice(value);
    }
    let mut out = (block.len() as u16).to_be_bytes().to_vec();
    out.extend_from_slice(&block);
    out
}

pub fn client_hello_body(ciphers: &[u16], extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut body = vec![0x03, 0x03];
    body.extend_from_slice(&[0x42; 32]);
    body.push(0x20);
    body.extend_from_slice(&[0x07; 32]);
    body.extend_from_slice(&((ciphers.len() * 2) as u16).to_be_bytes());
    for c in ciphers {
        body.extend_from_slice(&c.to_be_bytes());
    }
    body.extend_from_slice(&[0x01, 0x00]);
    body.extend_from_slice(&extensions_block(extensions));
    body
}

pub fn client_hello(ciphers: &[u16], extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
    record(0x16, 0x0301, &handshake(0x01, &client_hello_body(ciphers, extensions)))
}

pub fn server_hello_body(cipher: u16, extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut body = vec![0x03, 0x03];
    body.extend_from_slice(&[0x24; 32]);
    body.push(0x00);
    body.extend_from_slice(&cipher.to_be_bytes());
    body.push(0x00);
    body.extend_from_slice(&extensions_block(extensions));
    body
}

pub fn server_hello(cipher: u16, extensions: &[(u16, Vec<u8>)]) -> Vec<u8> {
    record(0x16, 0x0303, &handshake(0x02, &server_hello_body(cipher, extensions)))
}

pub fn sni(host: &str) -> (u16, Vec<u8>) {
    let name = host.as_bytes();
    let mut value = ((name.len() + 3) as u16).to_be_bytes().to_vec();
    value.push(0x00);
    value.extend_from_slice(&(name.len() as u16).to_be_bytes());
    value.extend_from_slice(name);
    (0x0000, value)
}

pub fn alpn(protocols: &[&str]) -> (u16, Vec<u8>) {
    let mut list = Vec::new();
    for p in protocols {
        list.push(p.len() as u8);
        list.extend_from_slice(p.as_bytes());
    }
    let mut value = (list.len() as u16).to_be_bytes().to_vec();
    value.extend_from_slice(&list);
    (0x0010, value)
}

pub fn supported_versions(versions: &[u16]) -> (u16, Vec<u8>) {
    let mut value = vec![(versions.len() * 2) as u8];
    for v in versions {
        value.extend_from_slice(&v.to_be_bytes());
    }
    (0x002b, value)
}

pub fn signature_algorithms(algs: &[u16]) -> (u16, Vec<u8>) {
    let mut value = ((algs.len() * 2) as u16).to_be_bytes().to_vec();
    for a in algs {
        value.extend_from_slice(&a.to_be_bytes());
    }
    (0x000d, value)
}

/// A browser-shaped hello: GREASE cipher and extensions, SNI, ALPN, TLS 1.3.
pub fn browser_client_hello() -> Vec<u8> {
    client_hello(
        &[0x3a3a, 0x1301, 0x1302, 0x1303, 0xc02b, 0xc02f, 0xc02c, 0xc030, 0xcca9, 0xcca8],
        &[
            (0x2a2a, vec![]),
            sni("example.com"),
            (0x0017, vec![]),
            (0xff01, vec![0x00]),
            (0x000a, vec![0x00, 0x06, 0x6a, 0x6a, 0x00, 0x1d, 0x00, 0x17]),
            (0x000b, vec![0x01, 0x00]),
            (0x0023, vec![]),
            alpn(&["h2", "http/1.1"]),
            signature_algorithms(&[0x0403, 0x0804, 0x0401, 0x0503]),
            supported_versions(&[0x7a7a, 0x0304, 0x0303]),
            (0x0033, vec![0x00, 0x00]),
            (0x1a1a, vec![0x00]),
        ],
    )
}
