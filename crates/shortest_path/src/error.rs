use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum Error {
    /// Edge weights must be finite and non-negative.
    #[error("invalid edge weight: {weight}")]
    InvalidWeight { weight: f64 },
}

#[inline]
pub(crate) fn check_weight(weight: f64) -> Result<f64> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(Error::InvalidWeight { weight })
    }
}
