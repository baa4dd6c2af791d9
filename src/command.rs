use crate::crc;
use crate::frame::FunctionCode;

/// The main telemetry poll reads registers 0-94.
pub const MAIN_REGISTER_START: u16 = 0;
pub const MAIN_REGISTER_COUNT: u16 = 95;

/// The battery cell poll reads 50 registers from 250.
pub const CELL_REGISTER_START: u16 = 250;
pub const CELL_REGISTER_COUNT: u16 = 50;

/// Build a hex-encoded read-request ADU:
/// `[slave_id][function][start BE][count BE][crc LE]`.
pub fn build_read_command(
    slave_id: u8,
    function: FunctionCode,
    start_address: u16,
    register_count: u16,
) -> String {
    let mut adu = Vec::with_capacity(8);
    adu.push(slave_id);
    adu.push(function.into());
    adu.extend_from_slice(&start_address.to_be_bytes());
    adu.extend_from_slice(&register_count.to_be_bytes());
    adu.extend_from_slice(&crc::compute(&adu).to_le_bytes());
    hex::encode(adu)
}
