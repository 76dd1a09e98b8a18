use thiserror::Error;

use crate::engine::ResolutionChain;
use crate::key::{QualifierError, TypeKey};

/// Failures of [`CodecEngine::codec_for`](crate::CodecEngine::codec_for).
///
/// Resolution errors come from static misconfiguration: they are never
/// retried and nothing is cached for the failing key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every factory declined the key.
    #[error("no codec factory matches {key:?}{chain}")]
    NoFactoryMatch { key: TypeKey, chain: ResolutionChain },
    /// A factory asked for a key that is already being resolved on the
    /// same path.
    #[error("cyclic resolution of {key:?}{chain}")]
    CyclicResolution { key: TypeKey, chain: ResolutionChain },
    /// A factory consumed a qualifier the key does not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] QualifierError),
    /// A factory claimed the key but its shape is not supported.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: TypeKey, reason: &'static str },
    /// [`Resolver::next_codec_for`](crate::Resolver::next_codec_for) was
    /// given a factory that is not registered on the engine.
    #[error("factory `{name}` is not registered")]
    UnknownFactory { name: &'static str },
}

impl ResolveError {
    /// Returns the key the error is about, if any.
    pub fn key(&self) -> Option<&TypeKey> {
        match self {
            Self::NoFactoryMatch { key, .. }
            | Self::CyclicResolution { key, .. }
            | Self::InvalidKey { key, .. } => Some(key),
            Self::InvariantViolation(_) | Self::UnknownFactory { .. } => None,
        }
    }

    /// Returns the resolution chain, if the error carries one.
    pub fn chain(&self) -> Option<&ResolutionChain> {
        match self {
            Self::NoFactoryMatch { chain, .. } | Self::CyclicResolution { chain, .. } => {
                Some(chain)
            }
            _ => None,
        }
    }
}
