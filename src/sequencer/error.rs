// ABOUTME: Error types for the sequencer: construction misuse and per-item
// ABOUTME: work outcomes delivered through an OutcomeHandle.

/// Error returned when a sequencer cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerError {
    /// The rate was zero, negative, NaN, or infinite.
    InvalidRate(f64),
    /// No Tokio runtime was available to run the drain loop on.
    NoRuntime,
}

impl std::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequencerError::InvalidRate(rate) => {
                write!(f, "max rate must be a positive, finite number (got {})", rate)
            }
            SequencerError::NoRuntime => {
                write!(f, "sequencer must be created inside a Tokio runtime")
            }
        }
    }
}

impl std::error::Error for SequencerError {}

/// Failure of a single work item, as seen through its outcome handle.
///
/// `Failed` carries the work's own error untouched. The other variants
/// only occur when the work never produced an error value of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkError<E> {
    /// The work completed with an error.
    Failed(E),
    /// The work panicked. The panic is contained to this item.
    Panicked(String),
    /// The item was dropped before it settled (the runtime shut down).
    Abandoned,
}

impl<E> WorkError<E> {
    /// Returns the work's own error, if that is what this is.
    pub fn into_failed(self) -> Option<E> {
        match self {
            WorkError::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for WorkError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkError::Failed(e) => write!(f, "{}", e),
            WorkError::Panicked(msg) => write!(f, "work panicked: {}", msg),
            WorkError::Abandoned => write!(f, "work was abandoned before it settled"),
        }
    }
}

impl<E> std::error::Error for WorkError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkError::Failed(e) => e.source(),
            _ => None,
        }
    }
}
