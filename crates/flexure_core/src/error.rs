use thiserror::Error;

/// Every way a flexure solve can fail.
///
/// This is a closed set: the FD pipeline, the boundary-condition
/// rewriter, and the method dispatcher only ever produce one of these
/// variants, never a raw panic or an unannotated string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FlexureError {
    #[error("unsupported method {0:?}; expected one of Fd, Spa, SpaNg, Fft")]
    InvalidMethod(String),

    #[error("incompatible boundary conditions west={west:?} east={east:?}: {reason}")]
    InvalidBoundary {
        west: String,
        east: String,
        reason: String,
    },

    #[error("boundary condition {bc:?} requires {expected} Te, got {got}")]
    InvalidTeForBC {
        bc: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("sparse solve failed: operator is singular ({0})")]
    SingularOperator(String),

    #[error("poisoned stencil: non-finite coefficient at row {row} ({diagonal})")]
    PoisonedStencil { row: usize, diagonal: &'static str },

    #[error("method {0:?} is not implemented")]
    MethodNotImplemented(String),

    #[error(
        "Stewart1 boundary condition row coefficients are unspecified; \
         the source this was ported from never defines them, so this \
         fails loudly instead of guessing"
    )]
    StewartUnspecified,
}

pub type FlexureResult<T> = Result<T, FlexureError>;
