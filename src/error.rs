use thiserror::Error;

/// Usage errors the engine's control surface can report. These correspond to
/// programmer mistakes (bad call sequencing, malformed parameters) rather
/// than recoverable runtime conditions — the engine's numeric degeneracies
/// (TIR, zero-length normalize, empty-weight pixels) are handled locally
/// with defined fallbacks and never reach this type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid image dimensions {width}x{height}: both must be > 0")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("unknown reconstruction filter id {0}")]
    UnknownFilter(i32),
}
