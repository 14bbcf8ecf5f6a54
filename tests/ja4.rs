mod common;

use common::*;
use hello_inspector::services::ja4::{hash12, ja4, ja4s};
use hello_inspector::services::tls_parser::{decode_client_hello, decode_server_hello};
use proptest::prelude::*;

const BROWSER_CIPHERS_SORTED: &str = "1301,1302,1303,c02b,c02c,c02f,c030,cca8,cca9";
const BROWSER_CIPHERS_WIRE: &str = "1301,1302,1303,c02b,c02f,c02c,c030,cca9,cca8";
const BROWSER_EXTS_SORTED: &str = "000a,000b,000d,0017,0023,002b,0033,ff01_0403,0804,0401,0503";
const BROWSER_EXTS_WIRE: &str = "0017,ff01,000a,000b,0023,000d,002b,0033_0403,0804,0401,0503";

#[test]
fn browser_hello_fingerprints() {
    let record = decode_client_hello(&browser_client_hello()).unwrap();
    let fp = ja4(&record);

    assert_eq!(
        fp.ja4_r,
        format!("t13d0910h2_{}_{}", BROWSER_CIPHERS_SORTED, BROWSER_EXTS_SORTED)
    );
    assert_eq!(
        fp.ja4_ro,
        format!("t13d0910h2_{}_{}", BROWSER_CIPHERS_WIRE, BROWSER_EXTS_WIRE)
    );
    assert_eq!(
        fp.ja4,
        format!(
            "t13d0910h2_{}_{}",
            hash12(BROWSER_CIPHERS_SORTED),
            hash12(BROWSER_EXTS_SORTED)
        )
    );
    assert_eq!(
        fp.ja4_o,
        format!(
            "t13d0910h2_{}_{}",
            hash12(BROWSER_CIPHERS_WIRE),
            hash12(BROWSER_EXTS_WIRE)
        )
    );
}

#[test]
fn grease_cipher_scenario() {
    let record = decode_client_hello(&client_hello(&[0x0a0a, 0x1301, 0x1302], &[])).unwrap();
    let fp = ja4(&record);
    assert_eq!(&fp.ja4[4..6], "02");
    assert!(fp.ja4_r.contains("_1301,1302_"));
}

#[test]
fn supported_versions_scenario() {
    let data = client_hello(&[0x1301], &[supported_versions(&[0x0a0a, 0x0304])]);
    let fp = ja4(&decode_client_hello(&data).unwrap());
    assert_eq!(&fp.ja4[1..3], "13");
}

#[test]
fn version_falls_back_to_record_version() {
    let fp = ja4(&decode_client_hello(&client_hello(&[0x002f], &[])).unwrap());
    assert!(fp.ja4.starts_with("t10i"));
}

#[test]
fn destination_does_not_move_extension_hash() {
    let a = client_hello(&[0x1301], &[sni("a.example"), alpn(&["h2"]), (0x0017, vec![])]);
    let b = client_hello(&[0x1301], &[sni("b.example.org"), alpn(&["h2"]), (0x0017, vec![])]);
    let fa = ja4(&decode_client_hello(&a).unwrap());
    let fb = ja4(&decode_client_hello(&b).unwrap());
    assert_eq!(fa, fb);
    assert!(!fa.ja4_r.contains("0000"));
    assert!(!fa.ja4_r.contains("0010"));
}

#[test]
fn server_fingerprint() {
    let data = server_hello(0x1302, &[supported_versions_selected(0x0304), (0x0033, vec![0x00, 0x1d])]);
    let fp = ja4s(&decode_server_hello(&data).unwrap());
    assert_eq!(fp.ja4s_r, "t130200_1302_002b,0033");
    assert_eq!(fp.ja4s, format!("t130200_1302_{}", hash12("002b,0033")));
}

fn supported_versions_selected(version: u16) -> (u16, Vec<u8>) {
    (0x002b, version.to_be_bytes().to_vec())
}

fn count_is_two_digits(field: &str) -> bool {
    field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit())
}

proptest! {
    #[test]
    fn count_fields_are_two_ascii_digits(
        ciphers in proptest::collection::vec(any::<u16>(), 0..200),
        ext_codes in proptest::collection::hash_set(1u16..0x0100, 0..150),
    ) {
        let extensions: Vec<(u16, Vec<u8>)> = ext_codes
            .into_iter()
            .filter(|c| *c != 0x0010 && *c != 0x002b && *c != 0x000d)
            .map(|c| (c, vec![]))
            .collect();
        let record = decode_client_hello(&client_hello(&ciphers, &extensions)).unwrap();
        let fp = ja4(&record);

        prop_assert!(count_is_two_digits(&fp.ja4[4..6]), "{}", fp.ja4);
        prop_assert!(count_is_two_digits(&fp.ja4[6..8]), "{}", fp.ja4);
        prop_assert_eq!(fp.ja4.len(), 10 + 1 + 12 + 1 + 12);
    }

    #[test]
    fn cipher_order_only_moves_original_variants(
        mut ciphers in proptest::collection::vec(0x1300u16..0x1400, 2..20),
    ) {
        let first = ja4(&decode_client_hello(&client_hello(&ciphers, &[])).unwrap());
        ciphers.reverse();
        let second = ja4(&decode_client_hello(&client_hello(&ciphers, &[])).unwrap());
        prop_assert_eq!(first.ja4, second.ja4);
        prop_assert_eq!(first.ja4_r, second.ja4_r);
    }
}
