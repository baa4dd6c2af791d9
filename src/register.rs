use crate::prelude::*;

/// Register widths the device uses. Addresses are in 2-byte register words,
/// so a double word spans two consecutive registers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterWidth {
    Word,
    DoubleWord,
}

impl RegisterWidth {
    pub const fn bytes(self) -> usize {
        match self {
            RegisterWidth::Word => 2,
            RegisterWidth::DoubleWord => 4,
        }
    }
}

/// Static description of one telemetry register: where it lives and how its
/// raw value becomes a number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegisterDef {
    pub address: u16,
    pub signed: bool,
    pub width: RegisterWidth,
    pub scale: f64,
}

impl RegisterDef {
    pub const fn unsigned(address: u16, width: RegisterWidth, scale: f64) -> Self {
        Self {
            address,
            signed: false,
            width,
            scale,
        }
    }

    pub const fn signed(address: u16, width: RegisterWidth, scale: f64) -> Self {
        Self {
            address,
            signed: true,
            width,
            scale,
        }
    }
}

/// Read one register as a scaled number, rounded to 3 decimal places.
///
/// Big-endian, two's-complement when signed. Out-of-bounds reads are an
/// error, never a panic, for any body length including zero.
pub fn read_number(body: &[u8], def: RegisterDef) -> Result<f64, FieldError> {
    let offset = def.address as usize * 2;
    let width = def.width.bytes();
    if offset + width > body.len() {
        return Err(FieldError::OutOfBounds {
            address: def.address,
            offset,
            width,
            body_len: body.len(),
        });
    }

    let raw = match (def.width, def.signed) {
        (RegisterWidth::Word, false) => Utils::be_u16(body, offset) as f64,
        (RegisterWidth::Word, true) => Utils::be_u16(body, offset) as i16 as f64,
        (RegisterWidth::DoubleWord, false) => Utils::be_u32(body, offset) as f64,
        (RegisterWidth::DoubleWord, true) => Utils::be_u32(body, offset) as i32 as f64,
    };

    let scaled = raw * def.scale;
    if !scaled.is_finite() {
        return Err(FieldError::NotFinite);
    }

    Ok(Utils::round(scaled, 3))
}

/// Read `word_count` registers as a fixed-length ASCII string. Non-ASCII
/// bytes are ignored, NULs stripped, surrounding whitespace trimmed.
pub fn read_ascii(body: &[u8], address: u16, word_count: usize) -> Result<String, FieldError> {
    let offset = address as usize * 2;
    let width = word_count * 2;
    if offset + width > body.len() {
        return Err(FieldError::OutOfBounds {
            address,
            offset,
            width,
            body_len: body.len(),
        });
    }

    let text: String = body[offset..offset + width]
        .iter()
        .copied()
        .filter(|b| b.is_ascii() && *b != 0)
        .map(char::from)
        .collect();
    let text = text.trim();

    if text.is_empty() {
        Err(FieldError::EmptyString)
    } else {
        Ok(text.to_string())
    }
}
