// Module declarations for the protocol core
pub mod cells;       // Battery cell voltage frame decoding
pub mod command;     // Outbound read-request encoding
pub mod crc;         // CRC-16/MODBUS frame integrity
pub mod decoder;     // Decode entry point and payload dispatch
pub mod diagnostics; // Injectable diagnostics sink
pub mod error;       // Decode and field error types
pub mod frame;       // Frame extraction from raw hex payloads
pub mod prelude;     // Common imports and types
pub mod register;    // Bounds-checked register primitives
pub mod telemetry;   // Main telemetry register map and decoding
pub mod utils;       // Utility functions

pub use cells::CellSummary;
pub use command::build_read_command;
pub use decoder::{DecodedMessage, Decoder};
pub use error::{DecodeError, FieldError};
pub use frame::{Frame, FunctionCode};
pub use telemetry::{Snapshot, Value};
