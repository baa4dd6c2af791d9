pub use log::{debug, error, info, trace, warn};

pub use crate::diagnostics::{Diagnostics, LogDiagnostics, NullDiagnostics};
pub use crate::error::{DecodeError, FieldError};
pub use crate::utils::Utils;
