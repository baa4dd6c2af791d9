use crate::crc;
use crate::prelude::*;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// 8-char marker the app-level transport inserts before the real response.
pub const RESPONSE_MARKER: &str = "2b2b2b2b";

/// Valid frames start with slave id 1 and one of the two read functions.
const FRAME_PREFIXES: [&str; 2] = ["0103", "0104"];

/// Shortest parseable frame: 6 bytes of header plus CRC trailer.
const MIN_FRAME_HEX_LEN: usize = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
pub enum FunctionCode {
    ReadHold = 3,
    ReadInput = 4,
}

/// One extracted response frame:
/// `[slave_id:1][function:1][byte_count:1][body][crc:2 LE]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub slave_id: u8,
    pub function: FunctionCode,
    pub declared_len: u8,
    pub body: Vec<u8>,
    pub crc_ok: bool,
}

impl Frame {
    /// Locate and split a frame inside `raw` hex text.
    ///
    /// A CRC mismatch is logged and tolerated; the transport is known to
    /// deliver the occasional CRC-imperfect frame that is otherwise intact.
    /// Malformed hex, a missing prefix, or an empty body with a nonzero
    /// byte-count are unrecoverable.
    pub fn extract(raw: &str, diag: &dyn Diagnostics) -> Result<Self, DecodeError> {
        let raw = raw.trim().to_ascii_lowercase();

        let candidate = match raw.find(RESPONSE_MARKER) {
            Some(pos) => {
                let after = &raw[pos + RESPONSE_MARKER.len()..];
                if !has_frame_prefix(after) {
                    return Err(DecodeError::NoFrame);
                }
                after
            }
            None if has_frame_prefix(&raw) => raw.as_str(),
            None => return Err(DecodeError::NoFrame),
        };

        if candidate.len() < MIN_FRAME_HEX_LEN {
            return Err(DecodeError::FrameTooShort(candidate.len()));
        }

        let check = crc::verify(candidate)?;
        match check.detail() {
            None => diag.info("frame CRC ok"),
            Some(detail) => diag.warn(&detail),
        }

        let bytes = hex::decode(candidate)?;
        let slave_id = bytes[0];
        let function =
            FunctionCode::try_from(bytes[1]).map_err(|_| DecodeError::BadFunction(bytes[1]))?;
        let declared_len = bytes[2];
        let body = bytes[3..bytes.len() - 2].to_vec();

        if body.len() != declared_len as usize {
            diag.warn(&format!(
                "byte-count declares {} body bytes but {} decoded; using decoded bytes",
                declared_len,
                body.len()
            ));
        }
        if body.is_empty() && declared_len != 0 {
            return Err(DecodeError::EmptyBody {
                declared: declared_len,
            });
        }

        Ok(Self {
            slave_id,
            function,
            declared_len,
            body,
            crc_ok: check.matches,
        })
    }
}

fn has_frame_prefix(candidate: &str) -> bool {
    FRAME_PREFIXES.iter().any(|p| candidate.starts_with(p))
}
