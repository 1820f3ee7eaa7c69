use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    AStar,
    Bfs,
    Bidirectional,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Method::AStar => write!(f, "a-star"),
            Method::Bfs => write!(f, "bfs"),
            Method::Bidirectional => write!(f, "bidirectional"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMethodErr(String);

impl Display for ParseMethodErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown method: {}", self.0)
    }
}

impl Error for ParseMethodErr {}

impl FromStr for Method {
    type Err = ParseMethodErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-star" | "astar" => Ok(Method::AStar),
            "bfs" => Ok(Method::Bfs),
            "bidirectional" => Ok(Method::Bidirectional),
            _ => Err(ParseMethodErr(s.to_string())),
        }
    }
}

/// Resources a single search may use before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_expansions: u64,
    pub timeout: Option<Duration>,
}

impl Limits {
    pub const DEFAULT_MAX_EXPANSIONS: u64 = 10_000_000;

    pub fn new(max_expansions: u64, timeout: Option<Duration>) -> Self {
        Limits {
            max_expansions,
            timeout,
        }
    }

    pub fn with_max_expansions(self, max_expansions: u64) -> Self {
        Limits {
            max_expansions,
            ..self
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Limits {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Fractional seconds like the CLI takes them, negative and NaN mean no time at all.
    pub fn with_timeout_secs(self, secs: f64) -> Self {
        let secs = if secs.is_finite() && secs > 0.0 {
            secs
        } else {
            0.0
        };
        self.with_timeout(Duration::from_secs_f64(secs))
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::new(Limits::DEFAULT_MAX_EXPANSIONS, None)
    }
}

impl Display for Limits {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "max expansions: {}", self.max_expansions)?;
        match self.timeout {
            Some(timeout) => write!(f, ", timeout: {:.3} s", timeout.as_secs_f64()),
            None => write!(f, ", no timeout"),
        }
    }
}
