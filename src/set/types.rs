use chrono::Utc;
use std::collections::HashMap;

/// Verdict of a revocation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The certificate or key is revoked
    Revoked,
    /// No revocation data is known for the query
    Unknown,
    /// Affirmatively known not to be revoked
    Good,
}

/// Revocation data for one issuer: the SHA-256 hash of its
/// SubjectPublicKeyInfo and the serial numbers it has revoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlEntry {
    /// SHA-256 hash of the issuer's SPKI (32 bytes)
    pub issuer_spki_hash: Vec<u8>,

    /// Revoked serial numbers, leading zero bytes stripped
    pub revoked_serials: Vec<Vec<u8>>,
}

/// Compact revocation database keyed by issuer SPKI hash.
///
/// Entry order in `crls` is significant: delta updates address issuers by
/// index into the base set's ordering. The issuer index is derived from
/// `crls` and rebuilt whenever a new set is constructed.
#[derive(Debug)]
pub struct CrlSet {
    pub(crate) sequence: u32,
    pub(crate) not_after: u64,
    pub(crate) crls: Vec<CrlEntry>,
    pub(crate) crls_index_by_issuer: HashMap<Vec<u8>, usize>,
    pub(crate) blocked_spkis: Vec<Vec<u8>>,
}

impl CrlSet {
    /// Assemble a set and derive the issuer index. Callers must have
    /// rejected duplicate issuer hashes already; the last one would
    /// silently win in the index otherwise.
    pub(crate) fn build(
        sequence: u32,
        not_after: u64,
        crls: Vec<CrlEntry>,
        blocked_spkis: Vec<Vec<u8>>,
    ) -> Self {
        let crls_index_by_issuer = crls
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.issuer_spki_hash.clone(), i))
            .collect();
        Self {
            sequence,
            not_after,
            crls,
            crls_index_by_issuer,
            blocked_spkis,
        }
    }

    /// Check whether a public key is blocked outright, regardless of which
    /// issuer signed the certificate carrying it.
    ///
    /// Membership in the blocked list is exhaustively known, so the answer
    /// is never [`CheckResult::Unknown`].
    pub fn check_spki(&self, spki_hash: &[u8]) -> CheckResult {
        if self.blocked_spkis.iter().any(|h| h.as_slice() == spki_hash) {
            CheckResult::Revoked
        } else {
            CheckResult::Good
        }
    }

    /// Check a certificate serial number against the issuer's revocation
    /// list.
    ///
    /// Returns [`CheckResult::Unknown`] when no list is carried for the
    /// issuer. When a list is present, absence from it counts as
    /// [`CheckResult::Good`]: the set generator includes an issuer's full
    /// revocation list whenever it includes the issuer at all.
    pub fn check_serial(&self, serial: &[u8], issuer_spki_hash: &[u8]) -> CheckResult {
        // DER-negative serials are never emitted by the set generator, so a
        // match could only come from a parsing mismatch. Refuse to answer.
        if serial.first().is_some_and(|b| b & 0x80 != 0) {
            return CheckResult::Unknown;
        }
        let serial = trim_serial(serial);

        let Some(&index) = self.crls_index_by_issuer.get(issuer_spki_hash) else {
            return CheckResult::Unknown;
        };
        if self.crls[index]
            .revoked_serials
            .iter()
            .any(|s| s.as_slice() == serial)
        {
            CheckResult::Revoked
        } else {
            CheckResult::Good
        }
    }

    /// Whether the set has passed its declared expiry time. A set with no
    /// declared expiry never expires.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp().max(0) as u64)
    }

    /// Expiry check against an explicit clock, in UNIX seconds.
    pub fn is_expired_at(&self, now_unix: u64) -> bool {
        self.not_after != 0 && now_unix > self.not_after
    }

    /// Version number of this set
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Declared expiry as a UNIX timestamp, 0 meaning none
    pub fn not_after(&self) -> u64 {
        self.not_after
    }

    /// Per-issuer revocation entries, in stored order
    pub fn crls(&self) -> &[CrlEntry] {
        &self.crls
    }

    /// Globally blocked SPKI hashes, in stored order
    pub fn blocked_spkis(&self) -> &[Vec<u8>] {
        &self.blocked_spkis
    }

    /// An empty set at sequence 0 with no expiry
    pub fn empty_for_testing() -> Self {
        Self::build(0, 0, Vec::new(), Vec::new())
    }

    /// Build a set directly from its parts, bypassing the wire format
    pub fn for_testing(
        sequence: u32,
        not_after: u64,
        crls: Vec<CrlEntry>,
        blocked_spkis: Vec<Vec<u8>>,
    ) -> Self {
        Self::build(sequence, not_after, crls, blocked_spkis)
    }
}

/// Canonical serial form: strip leading zero bytes while more than one byte
/// remains. An all-zero serial collapses to a single zero byte.
pub(crate) fn trim_serial(mut serial: &[u8]) -> &[u8] {
    while serial.len() > 1 && serial[0] == 0x00 {
        serial = &serial[1..];
    }
    serial
}
