use crate::prelude::*;

use serde::Serialize;
use std::collections::BTreeMap;

/// Number of body bytes in a battery cell response (50 registers).
pub const CELL_BODY_LEN: usize = 100;

/// Registers in one cell response.
pub const CELL_COUNT: usize = 50;

// A real cell reads strictly inside this band; 0 mV slots are unpopulated
// positions and anything at 5 V or beyond is line noise.
const PLAUSIBLE_MIN_VOLTS: f64 = 1.0;
const PLAUSIBLE_MAX_VOLTS: f64 = 5.0;

/// Aggregate over the plausible cells of one battery cell frame. Keys in
/// `cells` carry the original 1-based register position (`cell_07`),
/// regardless of how many earlier positions were discarded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellSummary {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub spread: f64,
    pub cells: BTreeMap<String, f64>,
}

/// Decode a 100-byte cell body: 50 unsigned millivolt registers.
///
/// Fails only when not a single cell reads plausibly.
pub fn decode(body: &[u8]) -> Result<CellSummary, DecodeError> {
    let mut cells = BTreeMap::new();

    for index in 0..CELL_COUNT {
        let offset = index * 2;
        if offset + 2 > body.len() {
            break;
        }
        let millivolts = Utils::be_u16(body, offset);
        let volts = Utils::round(millivolts as f64 / 1000.0, 3);
        if volts > PLAUSIBLE_MIN_VOLTS && volts < PLAUSIBLE_MAX_VOLTS {
            cells.insert(format!("cell_{:02}", index + 1), volts);
        }
    }

    if cells.is_empty() {
        return Err(DecodeError::EmptySnapshot);
    }

    let min = cells.values().copied().fold(f64::INFINITY, f64::min);
    let max = cells.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = cells.values().sum();
    let count = cells.len();

    Ok(CellSummary {
        count,
        average: Utils::round(sum / count as f64, 3),
        min,
        max,
        spread: Utils::round(max - min, 3),
        cells,
    })
}
