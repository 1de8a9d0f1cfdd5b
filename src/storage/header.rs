use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::error::{CrlSetError, CrlSetResult};

/// The only header version this crate reads or writes
pub(crate) const FORMAT_VERSION: u64 = 0;

/// Length of a SHA-256 SPKI hash
pub(crate) const SPKI_HASH_LEN: usize = 32;

/// JSON header document prefixed to every set file, full or delta.
///
/// Field declaration order is the serialization order, which keeps the
/// encoded header deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Header {
    #[serde(rename = "Version")]
    pub version: u64,

    #[serde(rename = "Sequence")]
    pub sequence: u32,

    #[serde(rename = "NotAfter", default)]
    pub not_after: u64,

    /// Base64-encoded SHA-256 hashes of globally blocked SPKIs
    #[serde(rename = "BlockedSPKIs", default)]
    pub blocked_spkis: Vec<String>,

    /// Sequence of the base this blob patches; 0 or absent for a full set
    #[serde(rename = "DeltaFrom", default, skip_serializing_if = "is_zero")]
    pub delta_from: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Split off the 2-byte little-endian length prefix, decode the header
/// document it frames, and return the header together with the body bytes
/// that follow it.
pub(crate) fn read_header(bytes: &[u8]) -> CrlSetResult<(Header, &[u8])> {
    if bytes.len() < 2 {
        return Err(CrlSetError::Truncated("header length prefix"));
    }
    let header_len = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    let rest = &bytes[2..];
    if rest.len() < header_len {
        return Err(CrlSetError::Truncated("header document"));
    }
    let (document, body) = rest.split_at(header_len);
    let header: Header = serde_json::from_slice(document)?;
    if header.version != FORMAT_VERSION {
        return Err(CrlSetError::UnsupportedVersion(header.version));
    }
    Ok((header, body))
}

impl Header {
    /// Decode the blocked-SPKI entries into raw 32-byte hashes. Any entry
    /// that fails to decode poisons the whole header: revocation data is
    /// security data and is never partially accepted.
    pub fn decode_blocked_spkis(&self) -> CrlSetResult<Vec<Vec<u8>>> {
        let mut hashes = Vec::with_capacity(self.blocked_spkis.len());
        for encoded in &self.blocked_spkis {
            let hash = BASE64.decode(encoded)?;
            if hash.len() != SPKI_HASH_LEN {
                return Err(CrlSetError::BlockedSpkiLength(hash.len()));
            }
            hashes.push(hash);
        }
        Ok(hashes)
    }

    /// Encode into the length-prefixed wire form.
    pub fn encode(&self) -> CrlSetResult<Vec<u8>> {
        let document = serde_json::to_vec(self)?;
        let header_len = u16::try_from(document.len())
            .map_err(|_| CrlSetError::HeaderTooLarge(document.len()))?;
        let mut out = Vec::with_capacity(2 + document.len());
        out.extend_from_slice(&header_len.to_le_bytes());
        out.extend_from_slice(&document);
        Ok(out)
    }
}

pub(crate) fn encode_spki(hash: &[u8]) -> String {
    BASE64.encode(hash)
}
