//! The outcome of one retrieval attempt.

/// What a single call to an external source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The resource exists and was decoded.
    Found(T),
    /// The resource does not exist or is unusable (bad status, wrong
    /// content type, undecodable payload). Retrying will not help.
    NotFound,
    /// A connection error or timeout. Worth retrying a bounded number of times.
    Transient(String),
}

impl<T> Fetched<T> {
    /// The found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is a transient failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Map the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Found(v) => Fetched::Found(f(v)),
            Self::NotFound => Fetched::NotFound,
            Self::Transient(reason) => Fetched::Transient(reason),
        }
    }
}

/// Classify a transport error: timeouts and connection failures are worth
/// retrying, anything else is treated as the resource being unavailable.
pub fn classify<T>(err: &reqwest::Error) -> Fetched<T> {
    if err.is_timeout() || err.is_connect() {
        Fetched::Transient(err.to_string())
    } else {
        Fetched::NotFound
    }
}

/// Call `attempt` until it yields something other than a transient failure,
/// at most `max_attempts` times. The last transient failure is returned if
/// every attempt was transient.
pub fn with_retries<T>(
    max_attempts: u32,
    what: &str,
    mut attempt: impl FnMut() -> Fetched<T>,
) -> Fetched<T> {
    let max_attempts = max_attempts.max(1);
    let mut n = 1;
    loop {
        match attempt() {
            Fetched::Transient(reason) if n < max_attempts => {
                tracing::debug!(what, attempt = n, %reason, "transient failure, retrying");
                n += 1;
            }
            other => return other,
        }
    }
}
