//! Signal names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a signal within one agent's pipeline, e.g. `"front_gap"`.
///
/// Clones share one allocation, so names can be copied into specs, bus
/// entries and errors freely.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct SignalName(Arc<str>);

impl SignalName {
    pub fn new(name: &str) -> Self {
        SignalName(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SignalName {
    fn from(name: &str) -> Self {
        SignalName::new(name)
    }
}

impl From<String> for SignalName {
    fn from(name: String) -> Self {
        SignalName(Arc::from(name))
    }
}

impl Borrow<str> for SignalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
