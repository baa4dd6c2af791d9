use thiserror::Error;

/// Unrecoverable decode failures. Anything here means "no usable update
/// this cycle"; the public entry point maps these to `None`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no recognizable frame in payload")]
    NoFrame,

    #[error("frame too short: {0} hex chars")]
    FrameTooShort(usize),

    #[error("malformed hex: {0}")]
    MalformedHex(#[from] hex::FromHexError),

    #[error("unsupported function code {0:#04x}")]
    BadFunction(u8),

    #[error("declared body of {declared} bytes but none decoded")]
    EmptyBody { declared: u8 },

    #[error("unrecognized frame size: {0} body bytes")]
    UnrecognizedLength(usize),

    #[error("no fields decoded from frame")]
    EmptySnapshot,
}

/// Per-field decode failures. A field error drops that one field from the
/// snapshot and never aborts the remaining fields.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("register {address} out of bounds: offset {offset}+{width} exceeds body of {body_len}")]
    OutOfBounds {
        address: u16,
        offset: usize,
        width: usize,
        body_len: usize,
    },

    #[error("scaled value is not finite")]
    NotFinite,

    #[error("value {value} outside plausible range")]
    Implausible { value: f64 },

    #[error("string register decoded to nothing")]
    EmptyString,
}
