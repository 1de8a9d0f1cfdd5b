use std::collections::HashSet;

use crate::error::{CrlSetError, CrlSetResult};
use crate::set::{CrlEntry, CrlSet, trim_serial};
use crate::storage::header::{self, SPKI_HASH_LEN};
use crate::storage::reader::ByteReader;

/// Parse a full serialized CRL set.
///
/// Fails on any structural or semantic defect without constructing a
/// partial set; the caller keeps whatever set it already trusted.
pub fn parse(bytes: &[u8]) -> CrlSetResult<CrlSet> {
    let (header, body) = header::read_header(bytes)?;
    if header.delta_from != 0 {
        return Err(CrlSetError::UnexpectedDelta(header.delta_from));
    }
    let blocked_spkis = header.decode_blocked_spkis()?;

    let mut reader = ByteReader::new(body);
    let mut crls = Vec::new();
    let mut seen_issuers = HashSet::new();
    while !reader.is_empty() {
        let issuer_spki_hash = reader.take(SPKI_HASH_LEN, "issuer SPKI hash")?.to_vec();
        if !seen_issuers.insert(issuer_spki_hash.clone()) {
            return Err(CrlSetError::DuplicateIssuer(hex::encode(&issuer_spki_hash)));
        }
        let revoked_serials = read_serials(&mut reader)?;
        crls.push(CrlEntry {
            issuer_spki_hash,
            revoked_serials,
        });
    }

    let set = CrlSet::build(header.sequence, header.not_after, crls, blocked_spkis);
    tracing::info!(
        sequence = set.sequence(),
        issuers = set.crls().len(),
        blocked_spkis = set.blocked_spkis().len(),
        "parsed full CRL set"
    );
    Ok(set)
}

/// Classify a blob as full set or delta update by reading only its header.
/// Errors out when the header itself cannot be parsed, so a caller can
/// route bytes to [`parse`] or [`super::apply_delta`] cheaply.
pub fn is_delta_update(bytes: &[u8]) -> CrlSetResult<bool> {
    let (header, _) = header::read_header(bytes)?;
    Ok(header.delta_from != 0)
}

/// Read a count-prefixed block of length-prefixed serial numbers, storing
/// each in canonical form.
pub(crate) fn read_serials(reader: &mut ByteReader<'_>) -> CrlSetResult<Vec<Vec<u8>>> {
    let count = reader.u32_le("serial count")?;
    // The count is untrusted; let the buffer bound allocation instead.
    let mut serials = Vec::new();
    for _ in 0..count {
        let len = reader.u8("serial length")? as usize;
        let raw = reader.take(len, "serial")?;
        serials.push(canonical_serial(raw)?);
    }
    Ok(serials)
}

/// Validate and canonicalize one serial: non-empty, sign bit clear, leading
/// zero bytes stripped.
fn canonical_serial(raw: &[u8]) -> CrlSetResult<Vec<u8>> {
    match raw.first() {
        None => Err(CrlSetError::EmptySerial),
        Some(first) if first & 0x80 != 0 => Err(CrlSetError::NegativeSerial),
        Some(_) => Ok(trim_serial(raw).to_vec()),
    }
}
