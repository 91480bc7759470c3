use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid duration '{0}', expected a whole number followed by one of s, m, h or d")]
    InvalidDuration(String),
    #[error("Duration '{0}' must be greater than zero")]
    NonPositiveDuration(String),
    #[error("Duration '{0}' is too large")]
    DurationOutOfRange(String),
}
