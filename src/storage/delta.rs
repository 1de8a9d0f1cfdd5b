use crate::error::{CrlSetError, CrlSetResult};
use crate::set::{CrlEntry, CrlSet};
use crate::storage::header::{self, SPKI_HASH_LEN};
use crate::storage::parser::read_serials;
use crate::storage::reader::ByteReader;

const OP_END: u8 = 0x00;
const OP_ADD_ISSUER: u8 = 0x01;
const OP_ADD_SERIALS: u8 = 0x02;
const OP_REMOVE_SERIALS: u8 = 0x03;

/// Apply a delta update against a base set, producing a new set.
///
/// The base is never mutated; the edit operations run against a working
/// copy, and any failure discards that copy wholesale. The delta header
/// fully replaces the header fields of the base — `DeltaFrom` is the only
/// diff marker in it.
pub fn apply_delta(base: &CrlSet, delta_bytes: &[u8]) -> CrlSetResult<CrlSet> {
    let (header, body) = header::read_header(delta_bytes)?;
    if header.delta_from == 0 {
        return Err(CrlSetError::NotADelta);
    }
    if header.delta_from != base.sequence() {
        return Err(CrlSetError::DeltaFromMismatch {
            delta_from: header.delta_from,
            base: base.sequence(),
        });
    }
    if header.sequence <= base.sequence() {
        tracing::warn!(
            base = base.sequence(),
            delta = header.sequence,
            "delta update does not advance the sequence"
        );
    }
    let blocked_spkis = header.decode_blocked_spkis()?;

    // Issuer indices in the op stream address the base set's ordering, so
    // bounds are checked against the base length even after adds.
    let base_len = base.crls().len();
    let mut crls: Vec<CrlEntry> = base.crls().to_vec();

    let mut reader = ByteReader::new(body);
    loop {
        match reader.u8("delta opcode")? {
            OP_END => break,
            OP_ADD_ISSUER => {
                let issuer_spki_hash = reader.take(SPKI_HASH_LEN, "issuer SPKI hash")?.to_vec();
                if crls.iter().any(|e| e.issuer_spki_hash == issuer_spki_hash) {
                    return Err(CrlSetError::DuplicateIssuer(hex::encode(&issuer_spki_hash)));
                }
                let revoked_serials = read_serials(&mut reader)?;
                crls.push(CrlEntry {
                    issuer_spki_hash,
                    revoked_serials,
                });
            }
            OP_ADD_SERIALS => {
                let index = read_issuer_index(&mut reader, base_len)?;
                let serials = read_serials(&mut reader)?;
                crls[index].revoked_serials.extend(serials);
            }
            OP_REMOVE_SERIALS => {
                let index = read_issuer_index(&mut reader, base_len)?;
                let serials = read_serials(&mut reader)?;
                remove_serials(&mut crls[index], &serials)?;
            }
            other => return Err(CrlSetError::UnknownOpcode(other)),
        }
    }
    if !reader.is_empty() {
        return Err(CrlSetError::TrailingData(reader.remaining()));
    }

    let set = CrlSet::build(header.sequence, header.not_after, crls, blocked_spkis);
    tracing::info!(
        from = base.sequence(),
        to = set.sequence(),
        issuers = set.crls().len(),
        "applied delta update"
    );
    Ok(set)
}

fn read_issuer_index(reader: &mut ByteReader<'_>, base_len: usize) -> CrlSetResult<usize> {
    let index = reader.u32_le("issuer index")?;
    if index as usize >= base_len {
        return Err(CrlSetError::IssuerIndexOutOfRange(index));
    }
    Ok(index as usize)
}

/// Remove each listed serial by exact byte match. A serial the entry does
/// not carry means the delta disagrees with its stated base.
fn remove_serials(entry: &mut CrlEntry, serials: &[Vec<u8>]) -> CrlSetResult<()> {
    for serial in serials {
        let position = entry
            .revoked_serials
            .iter()
            .position(|s| s == serial)
            .ok_or_else(|| CrlSetError::SerialNotFound {
                issuer: hex::encode(&entry.issuer_spki_hash),
                serial: hex::encode(serial),
            })?;
        entry.revoked_serials.remove(position);
    }
    Ok(())
}
