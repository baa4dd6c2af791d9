pub struct Utils;

impl Utils {
    /// Round to a fixed number of decimal places.
    pub fn round(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    /// Big-endian u16 at `offset`. Caller has already bounds-checked.
    pub fn be_u16(data: &[u8], offset: usize) -> u16 {
        u16::from_be_bytes([data[offset], data[offset + 1]])
    }

    /// Big-endian u32 at `offset`. Caller has already bounds-checked.
    pub fn be_u32(data: &[u8], offset: usize) -> u32 {
        u32::from_be_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }
}
