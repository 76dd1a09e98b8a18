use core::cell::RefCell;
use core::ptr;
use std::sync::Arc;

use qc_utils::hash::Hashed;

use crate::codec::CodecRef;
use crate::engine::{CodecEngine, ResolutionChain, ResolveError};
use crate::factory::CodecFactory;
use crate::key::TypeKey;
use crate::meta::TypeTable;

// -----------------------------------------------------------------------------
// Resolver

/// The capability handed to factories: resolve nested keys through the
/// engine that is asking.
///
/// A resolver lives for one top-level [`CodecEngine::codec_for`] call and
/// tracks the keys in progress on that path. Asking again for a key that is
/// still in progress fails with [`ResolveError::CyclicResolution`] instead
/// of recursing forever. Resolutions on other threads have their own
/// resolver and never see each other's progress.
pub struct Resolver<'a> {
    engine: &'a CodecEngine,
    pending: RefCell<Vec<TypeKey>>,
}

impl<'a> Resolver<'a> {
    #[inline]
    pub(crate) fn new(engine: &'a CodecEngine) -> Self {
        Self {
            engine,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Returns the engine being extended.
    #[inline]
    pub fn engine(&self) -> &'a CodecEngine {
        self.engine
    }

    /// Returns the struct metadata registered on the engine.
    #[inline]
    pub fn types(&self) -> &'a TypeTable {
        self.engine.types()
    }

    /// Resolves `key`: cache first, then every factory in order.
    ///
    /// The produced codec is cached under `key`; if another thread cached
    /// one first, that one is returned instead.
    pub fn codec_for(&self, key: &TypeKey) -> Result<CodecRef, ResolveError> {
        let hashed = Hashed::new(key.clone());

        if let Some(codec) = self.engine.lookup(&hashed) {
            log::trace!("codec cache hit for {key:?}");
            return Ok(codec);
        }

        if self.is_pending(key) {
            log::warn!("cyclic resolution of {key:?}");
            return Err(ResolveError::CyclicResolution {
                key: key.clone(),
                chain: self.chain(Some(key)),
            });
        }

        self.pending.borrow_mut().push(key.clone());
        let result = self.create(key, self.engine.registered());
        self.pending.borrow_mut().pop();

        Ok(self.engine.store(&hashed, result?))
    }

    /// Resolves `key` with the factories registered after `skip_past` only.
    ///
    /// This lets a factory decorate the codec another factory would produce
    /// for the very same key. The result is not cached under `key`.
    pub fn next_codec_for(
        &self,
        skip_past: &dyn CodecFactory,
        key: &TypeKey,
    ) -> Result<CodecRef, ResolveError> {
        let factories = self.engine.registered();
        let Some(index) = factories
            .iter()
            .position(|factory| ptr::addr_eq(Arc::as_ptr(factory), skip_past))
        else {
            return Err(ResolveError::UnknownFactory {
                name: skip_past.name(),
            });
        };

        let pushed = !self.is_pending(key);
        if pushed {
            self.pending.borrow_mut().push(key.clone());
        }
        let result = self.create(key, &factories[index + 1..]);
        if pushed {
            self.pending.borrow_mut().pop();
        }
        result
    }

    fn is_pending(&self, key: &TypeKey) -> bool {
        self.pending.borrow().contains(key)
    }

    fn chain(&self, last: Option<&TypeKey>) -> ResolutionChain {
        ResolutionChain::capture(&self.pending.borrow(), last)
    }

    fn create(
        &self,
        key: &TypeKey,
        factories: &[Arc<dyn CodecFactory>],
    ) -> Result<CodecRef, ResolveError> {
        for factory in factories {
            if let Some(codec) = factory.try_create(key, self)? {
                log::debug!("`{}` created the codec for {key:?}", factory.name());
                return Ok(codec);
            }
        }

        log::warn!("no codec factory matches {key:?}");
        Err(ResolveError::NoFactoryMatch {
            key: key.clone(),
            chain: self.chain(None),
        })
    }
}
