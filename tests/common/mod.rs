#![allow(dead_code)]

use lumentree_protocol::crc;
use lumentree_protocol::diagnostics::Diagnostics;
use std::sync::{Arc, Mutex};

pub const TELEMETRY_BODY_LEN: usize = 190;
pub const CELL_BODY_LEN: usize = 100;

pub struct Factory;

impl Factory {
    /// A well-formed response frame around `body`, CRC included.
    pub fn frame_hex(function: u8, body: &[u8]) -> String {
        Self::frame_hex_with_declared(function, body.len() as u8, body)
    }

    /// Same, but with the byte-count field forced to `declared`.
    pub fn frame_hex_with_declared(function: u8, declared: u8, body: &[u8]) -> String {
        let mut adu = vec![1u8, function, declared];
        adu.extend_from_slice(body);
        adu.extend_from_slice(&crc::compute(&adu).to_le_bytes());
        hex::encode(adu)
    }

    /// A 190-byte main telemetry body with the given register words set.
    pub fn telemetry_body(regs: &[(u16, u16)]) -> Vec<u8> {
        let mut body = vec![0u8; TELEMETRY_BODY_LEN];
        for (address, value) in regs {
            Self::set_reg(&mut body, *address, *value);
        }
        body
    }

    /// A 100-byte cell body with the given (0-based) registers set, in mV.
    pub fn cell_body(cells: &[(u16, u16)]) -> Vec<u8> {
        let mut body = vec![0u8; CELL_BODY_LEN];
        for (index, millivolts) in cells {
            Self::set_reg(&mut body, *index, *millivolts);
        }
        body
    }

    pub fn set_reg(body: &mut [u8], address: u16, value: u16) {
        let offset = address as usize * 2;
        body[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }
}

/// Captures everything the decoder reports, for asserting on diagnostics.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    infos: Arc<Mutex<Vec<String>>>,
    warnings: Arc<Mutex<Vec<String>>>,
}

impl RecordingDiagnostics {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
