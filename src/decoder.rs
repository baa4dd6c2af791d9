use crate::cells::{self, CellSummary, CELL_BODY_LEN};
use crate::frame::Frame;
use crate::prelude::*;
use crate::telemetry::{self, Snapshot, TELEMETRY_BODY_LEN};

use serde::Serialize;

/// One decoded inbound message, selected by body length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DecodedMessage {
    Telemetry(Snapshot),
    BatteryCells(CellSummary),
}

/// The decode entry point. Stateless and re-entrant: each call works only
/// on the caller's buffer, so concurrent use needs no locks.
pub struct Decoder {
    diag: Box<dyn Diagnostics>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_diagnostics(Box::new(LogDiagnostics))
    }

    pub fn with_diagnostics(diag: Box<dyn Diagnostics>) -> Self {
        Self { diag }
    }

    /// Decode one raw hex payload, or `None` when it yields no usable
    /// update this cycle. Failures never escape as panics.
    pub fn decode(&self, raw: &str) -> Option<DecodedMessage> {
        match self.try_decode(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                self.diag.warn(&format!("decode failed: {}", e));
                None
            }
        }
    }

    /// Like `decode`, but surfaces the typed failure reason.
    pub fn try_decode(&self, raw: &str) -> Result<DecodedMessage, DecodeError> {
        let frame = Frame::extract(raw, self.diag.as_ref())?;

        match frame.body.len() {
            TELEMETRY_BODY_LEN => {
                let snapshot = telemetry::decode(&frame.body, self.diag.as_ref())?;
                self.diag
                    .info(&format!("decoded {} telemetry fields", snapshot.len()));
                Ok(DecodedMessage::Telemetry(snapshot))
            }
            CELL_BODY_LEN => {
                let summary = cells::decode(&frame.body)?;
                self.diag
                    .info(&format!("decoded {} battery cells", summary.count));
                Ok(DecodedMessage::BatteryCells(summary))
            }
            other => Err(DecodeError::UnrecognizedLength(other)),
        }
    }
}
