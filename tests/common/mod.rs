#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Frame a JSON header document with its 2-byte little-endian length prefix
/// and append the given body bytes.
pub fn set_file(header_json: &str, body: &[u8]) -> Vec<u8> {
    let mut bytes = (header_json.len() as u16).to_le_bytes().to_vec();
    bytes.extend_from_slice(header_json.as_bytes());
    bytes.extend_from_slice(body);
    bytes
}

/// One full-set body record: issuer hash, serial count, serials.
pub fn record(issuer: &[u8; 32], serials: &[&[u8]]) -> Vec<u8> {
    let mut bytes = issuer.to_vec();
    bytes.extend_from_slice(&serials_block(serials));
    bytes
}

/// A count-prefixed block of length-prefixed serials, as used by both full
/// bodies and delta operations.
pub fn serials_block(serials: &[&[u8]]) -> Vec<u8> {
    let mut bytes = (serials.len() as u32).to_le_bytes().to_vec();
    for serial in serials {
        bytes.push(serial.len() as u8);
        bytes.extend_from_slice(serial);
    }
    bytes
}

pub fn spki_b64(hash: &[u8]) -> String {
    BASE64.encode(hash)
}
