// src/domain/report_id.rs
use crate::errors::ServerError;
use rand::{rngs::OsRng, RngCore};
use std::fmt;

/// 12-byte report identifier rendered as 24 lowercase hex characters.
/// The first four bytes are the creation time in Unix seconds (big-endian),
/// so ids sort roughly by creation; the rest is random.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportId(String);

const ID_BYTES: usize = 12;

impl ReportId {
    pub fn generate(now_unix: i64) -> Self {
        let mut raw = [0u8; ID_BYTES];
        raw[..4].copy_from_slice(&(now_unix as u32).to_be_bytes());
        OsRng.fill_bytes(&mut raw[4..]);
        Self(hex::encode(raw))
    }

    /// Accepts exactly 24 ASCII hex digits in either case.
    pub fn parse(raw: &str) -> Result<Self, ServerError> {
        let mut bytes = [0u8; ID_BYTES];
        hex::decode_to_slice(raw, &mut bytes)
            .map_err(|_| ServerError::BadRequest("Invalid report ID format".into()))?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
