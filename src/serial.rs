//! Binary cache for compiled rule lists.
//!
//! Layout: a fixed 32-byte header, then a bincode payload.
//!
//! ```text
//! Offset  Size  Field
//! 0       4     b"KDRL"
//! 4       2     Format version (u16 LE)
//! 6       2     Flags (u16 LE); bit 0 set when a source digest is stored
//! 8       4     Rule count (u32 LE)
//! 12      4     Payload length (u32 LE)
//! 16      16    First 16 bytes of the payload's BLAKE3 hash
//! 32..          Payload
//! ```
//!
//! A blob written by any other format version is refused with
//! [`DeserializeError::IncompatibleVersion`]; there is no migration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Action, Field, Pattern, Rule, RuleList};

const MAGIC: [u8; 4] = *b"KDRL";
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = 32;
const FLAG_SOURCE_DIGEST: u16 = 0b1;

/// Failure to write a rule list cache.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("cannot encode rule list: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("rule list too large for the cache format")]
    TooLarge,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure to read a rule list cache.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a keepdrop rule cache (bad magic)")]
    BadMagic,

    #[error("rule cache format v{blob} is not readable by this build (v{supported})")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("rule cache is corrupt: checksum does not match payload")]
    ChecksumMismatch,

    #[error("rule cache truncated: expected {expected} bytes, found {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("cannot decode rule cache payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("rule cache is inconsistent: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    version: u16,
    flags: u16,
    rule_count: u32,
    payload_len: u32,
    checksum: [u8; 16],
}

impl Header {
    fn for_payload(payload: &[u8], flags: u16, rule_count: u32) -> Result<Self, SerializeError> {
        let payload_len = u32::try_from(payload.len()).map_err(|_| SerializeError::TooLarge)?;
        let mut checksum = [0u8; 16];
        checksum.copy_from_slice(&blake3::hash(payload).as_bytes()[..16]);
        Ok(Self {
            version: FORMAT_VERSION,
            flags,
            rule_count,
            payload_len,
            checksum,
        })
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.rule_count.to_le_bytes());
        out.extend_from_slice(&self.payload_len.to_le_bytes());
        out.extend_from_slice(&self.checksum);
    }

    fn read(bytes: &[u8]) -> Result<Self, DeserializeError> {
        let Some(header) = bytes.get(..HEADER_LEN) else {
            return Err(DeserializeError::LengthMismatch {
                expected: HEADER_LEN as u32,
                actual: bytes.len(),
            });
        };
        if header[..4] != MAGIC {
            return Err(DeserializeError::BadMagic);
        }

        let u16_at = |at: usize| u16::from_le_bytes([header[at], header[at + 1]]);
        let u32_at = |at: usize| {
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        let mut checksum = [0u8; 16];
        checksum.copy_from_slice(&header[16..HEADER_LEN]);

        Ok(Self {
            version: u16_at(4),
            flags: u16_at(6),
            rule_count: u32_at(8),
            payload_len: u32_at(12),
            checksum,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    source_digest: Option<[u8; 32]>,
    rules: Vec<StoredRule>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRule {
    index: usize,
    keep: bool,
    /// `None` is a wildcard field.
    fields: [Option<String>; 4],
    line: String,
}

fn store_field(field: &Field) -> Option<String> {
    match field {
        Field::Wildcard => None,
        Field::Literal(s) => Some(s.clone()),
    }
}

fn load_field(field: Option<String>) -> Field {
    field.map_or(Field::Wildcard, Field::Literal)
}

fn to_payload(list: &RuleList, source_text: Option<&str>) -> Payload {
    Payload {
        source_digest: source_text.map(|s| *blake3::hash(s.as_bytes()).as_bytes()),
        rules: list
            .rules
            .iter()
            .map(|rule| StoredRule {
                index: rule.source_index,
                keep: rule.action == Action::Keep,
                fields: rule.pattern.fields().each_ref().map(store_field),
                line: rule.line.clone(),
            })
            .collect(),
    }
}

/// Check that every stored rule is still what its own source line compiles to.
fn check_rules(rules: &[StoredRule]) -> Result<(), DeserializeError> {
    for (position, stored) in rules.iter().enumerate() {
        if stored.index != position {
            return Err(DeserializeError::Validation(format!(
                "rule at position {position} claims index {}",
                stored.index
            )));
        }

        let compiled = crate::compile::compile_rule(&stored.line, stored.index)
            .map_err(|e| DeserializeError::Validation(e.to_string()))?;
        let fields = compiled.pattern.fields().each_ref().map(store_field);
        if (compiled.action == Action::Keep) != stored.keep || fields != stored.fields {
            return Err(DeserializeError::Validation(format!(
                "rule {position} disagrees with its line '{}'",
                stored.line
            )));
        }
    }
    Ok(())
}

fn from_payload(payload: Payload) -> RuleList {
    let rules = payload
        .rules
        .into_iter()
        .map(|stored| Rule {
            action: if stored.keep { Action::Keep } else { Action::Drop },
            pattern: Pattern::new(stored.fields.map(load_field)),
            source_index: stored.index,
            line: stored.line,
        })
        .collect();
    RuleList { rules }
}

pub(crate) fn encode(list: &RuleList, source_text: Option<&str>) -> Result<Vec<u8>, SerializeError> {
    let payload = to_payload(list, source_text);
    let bytes = bincode::serde::encode_to_vec(&payload, bincode::config::standard())?;

    let flags = if payload.source_digest.is_some() {
        FLAG_SOURCE_DIGEST
    } else {
        0
    };
    let rule_count = u32::try_from(payload.rules.len()).map_err(|_| SerializeError::TooLarge)?;
    let header = Header::for_payload(&bytes, flags, rule_count)?;

    let mut out = Vec::with_capacity(HEADER_LEN + bytes.len());
    header.write(&mut out);
    out.extend_from_slice(&bytes);
    Ok(out)
}

fn read_payload(bytes: &[u8]) -> Result<Payload, DeserializeError> {
    let header = Header::read(bytes)?;
    if header.version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: header.version,
            supported: FORMAT_VERSION,
        });
    }

    let body = &bytes[HEADER_LEN..];
    let Some(body) = body.get(..header.payload_len as usize) else {
        return Err(DeserializeError::LengthMismatch {
            expected: header.payload_len,
            actual: body.len(),
        });
    };
    if blake3::hash(body).as_bytes()[..16] != header.checksum {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (payload, _): (Payload, usize) =
        bincode::serde::decode_from_slice(body, bincode::config::standard())?;

    if payload.rules.len() != header.rule_count as usize {
        return Err(DeserializeError::Validation(format!(
            "header declares {} rules, payload holds {}",
            header.rule_count,
            payload.rules.len()
        )));
    }
    if payload.source_digest.is_some() != (header.flags & FLAG_SOURCE_DIGEST != 0) {
        return Err(DeserializeError::Validation(
            "source digest flag disagrees with payload".to_string(),
        ));
    }
    Ok(payload)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<RuleList, DeserializeError> {
    let payload = read_payload(bytes)?;
    check_rules(&payload.rules)?;
    Ok(from_payload(payload))
}

/// BLAKE3 digest of the source text recorded when the blob was written, if any.
///
/// Compare against `blake3::hash(current_source)` to decide whether a cached
/// rule list is stale.
///
/// # Errors
///
/// Returns [`DeserializeError`] if the blob itself is invalid.
pub fn source_digest(bytes: &[u8]) -> Result<Option<[u8; 32]>, DeserializeError> {
    Ok(read_payload(bytes)?.source_digest)
}
