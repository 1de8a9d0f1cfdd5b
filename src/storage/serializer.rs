use crate::error::{CrlSetError, CrlSetResult};
use crate::set::CrlSet;
use crate::storage::header::{self, FORMAT_VERSION, Header};

/// Serialize a set into the format consumed by [`super::parse`].
///
/// Output is deterministic: header fields in declaration order, issuers and
/// blocked SPKIs in the set's stored order. A set built by `parse` or
/// `apply_delta` always serializes cleanly; the length-field checks only
/// trip on hand-built sets that exceed the format's limits.
pub fn serialize(set: &CrlSet) -> CrlSetResult<Vec<u8>> {
    let header = Header {
        version: FORMAT_VERSION,
        sequence: set.sequence(),
        not_after: set.not_after(),
        blocked_spkis: set
            .blocked_spkis()
            .iter()
            .map(|hash| header::encode_spki(hash))
            .collect(),
        delta_from: 0,
    };
    let mut out = header.encode()?;

    for entry in set.crls() {
        out.extend_from_slice(&entry.issuer_spki_hash);
        let count = u32::try_from(entry.revoked_serials.len())
            .map_err(|_| CrlSetError::TooManySerials(entry.revoked_serials.len()))?;
        out.extend_from_slice(&count.to_le_bytes());
        for serial in &entry.revoked_serials {
            let len = u8::try_from(serial.len())
                .map_err(|_| CrlSetError::OversizedSerial(serial.len()))?;
            out.push(len);
            out.extend_from_slice(serial);
        }
    }

    tracing::debug!(
        sequence = set.sequence(),
        bytes = out.len(),
        "serialized CRL set"
    );
    Ok(out)
}
