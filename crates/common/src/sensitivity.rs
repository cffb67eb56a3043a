use serde::{Deserialize, Serialize};

/// Outcome of a sensitivity evaluation.
///
/// `Unknown` means the signal was suppressed: the surface, the node
/// shape, or the entry point made the question inapplicable. It is
/// *not* the same as `NotSensitive`, which is an explicit answer --
/// callers hide sensitivity UI on `Unknown` but may act on an
/// explicit `NotSensitive` (e.g. an unentitled account is forced
/// visible, never merely undecided).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sensitivity {
    Sensitive,
    NotSensitive,
    Unknown,
}

impl Sensitivity {
    pub fn from_flag(sensitive: bool) -> Self {
        if sensitive {
            Sensitivity::Sensitive
        } else {
            Sensitivity::NotSensitive
        }
    }

    pub fn is_sensitive(&self) -> bool {
        matches!(self, Sensitivity::Sensitive)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Sensitivity::Unknown)
    }

    /// Collapse to a boolean where `Unknown` has no answer.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Sensitivity::Sensitive => Some(true),
            Sensitivity::NotSensitive => Some(false),
            Sensitivity::Unknown => None,
        }
    }
}
