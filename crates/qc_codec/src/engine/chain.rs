use core::fmt::{self, Debug, Display, Formatter};

use crate::key::TypeKey;

/// The keys being resolved when a resolution error happened, outermost
/// first.
///
/// Only recorded with the `debug` feature; otherwise always empty.
///
/// `Display` renders ` (via `Foo` -> `Vec<String>`)`, or nothing when empty,
/// so it can be appended to an error message.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolutionChain {
    keys: Vec<TypeKey>,
}

impl ResolutionChain {
    /// Create a new empty [`ResolutionChain`].
    #[inline]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    #[cfg(feature = "debug")]
    pub(crate) fn capture(pending: &[TypeKey], last: Option<&TypeKey>) -> Self {
        let keys = pending.iter().chain(last).cloned().collect();
        Self { keys }
    }

    #[cfg(not(feature = "debug"))]
    #[inline(always)]
    pub(crate) fn capture(_pending: &[TypeKey], _last: Option<&TypeKey>) -> Self {
        Self::new()
    }

    /// Returns the recorded keys, outermost first.
    #[inline]
    pub fn keys(&self) -> &[TypeKey] {
        &self.keys
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Display for ResolutionChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.keys.iter();

        if let Some(first) = iter.next() {
            write!(f, " (via {first:?}")?;
            for key in iter {
                write!(f, " -> {key:?}")?;
            }
            f.write_str(")")?;
        }

        Ok(())
    }
}

impl Debug for ResolutionChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys.iter()).finish()
    }
}
