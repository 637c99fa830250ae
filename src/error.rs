use thiserror::Error;

/// Errors raised when building a sketch or tracker.
///
/// Every operation after construction is total, so this is the only failure
/// the crate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: `{name}` must be at least 1")]
    InvalidConfig { name: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn ensure_positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidConfig { name });
    }
    Ok(())
}
