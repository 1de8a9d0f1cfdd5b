use thiserror::Error;

/// Errors from parsing, delta application, serialization and the update
/// manager. Set bytes may arrive from a network update, so every malformed
/// input maps to an error here rather than a panic.
#[derive(Error, Debug)]
pub enum CrlSetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("header document parsing failed: {0}")]
    Header(#[from] serde_json::Error),

    #[error("input truncated while reading {0}")]
    Truncated(&'static str),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u64),

    #[error("header document is {0} bytes, too large for a 16-bit length prefix")]
    HeaderTooLarge(usize),

    #[error("blocked SPKI entry is not valid base64: {0}")]
    BlockedSpkiEncoding(#[from] base64::DecodeError),

    #[error("blocked SPKI hash decodes to {0} bytes, expected 32")]
    BlockedSpkiLength(usize),

    #[error("serial number has the sign bit set")]
    NegativeSerial,

    #[error("serial number is empty")]
    EmptySerial,

    #[error("serial number is {0} bytes, longest encodable is 255")]
    OversizedSerial(usize),

    #[error("issuer lists {0} serials, more than the format can encode")]
    TooManySerials(usize),

    #[error("expected a full set but the header declares DeltaFrom {0}")]
    UnexpectedDelta(u32),

    #[error("expected a delta update but the header declares none")]
    NotADelta,

    #[error("delta applies to sequence {delta_from} but the base is at sequence {base}")]
    DeltaFromMismatch { delta_from: u32, base: u32 },

    #[error("issuer index {0} is out of range for the base set")]
    IssuerIndexOutOfRange(u32),

    #[error("issuer {0} is already present in the set")]
    DuplicateIssuer(String),

    #[error("serial {serial} not found under issuer {issuer}")]
    SerialNotFound { issuer: String, serial: String },

    #[error("unknown delta opcode {0:#04x}")]
    UnknownOpcode(u8),

    #[error("{0} trailing bytes after the delta end marker")]
    TrailingData(usize),

    #[error("no CRL set loaded")]
    NotLoaded,

    #[error("no file path configured")]
    NoFilePath,

    #[error("update sequence {update} is not newer than current sequence {current}")]
    StaleSequence { update: u32, current: u32 },
}

/// Convenient Result type alias
pub type CrlSetResult<T> = Result<T, CrlSetError>;
