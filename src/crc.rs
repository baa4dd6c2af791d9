use crate::prelude::*;

/// CRC-16/MODBUS over `data` (reflected, poly 0xA001, init 0xFFFF).
pub fn compute(data: &[u8]) -> u16 {
    crc16::State::<crc16::MODBUS>::calculate(data)
}

/// Outcome of checking a frame's trailing CRC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrcCheck {
    pub matches: bool,
    pub computed: u16,
    pub received: u16,
}

impl CrcCheck {
    pub fn detail(&self) -> Option<String> {
        if self.matches {
            None
        } else {
            Some(format!(
                "checksum mismatch: computed {:#06x}, frame carries {:#06x}",
                self.computed, self.received
            ))
        }
    }
}

/// Check the trailing 4 hex chars of `frame_hex` (little-endian CRC) against
/// the CRC of everything before them.
///
/// Fails only on malformed hex: odd length, non-hex characters, or fewer
/// than 4 hex chars. A mismatch is reported in the returned `CrcCheck`, not
/// as an error; callers treat it as a diagnostic and keep going.
pub fn verify(frame_hex: &str) -> Result<CrcCheck, DecodeError> {
    if frame_hex.len() < 4 {
        return Err(DecodeError::FrameTooShort(frame_hex.len()));
    }
    if frame_hex.len() % 2 != 0 {
        return Err(DecodeError::MalformedHex(hex::FromHexError::OddLength));
    }

    let bytes = hex::decode(frame_hex)?;
    let (payload, trailer) = bytes.split_at(bytes.len() - 2);
    let received = u16::from_le_bytes([trailer[0], trailer[1]]);
    let computed = compute(payload);

    Ok(CrcCheck {
        matches: computed == received,
        computed,
        received,
    })
}
