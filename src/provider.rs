//! Capability provider slots and the binding API.
//!
//! Each capability has exactly one `ProviderSlot` per registry, holding either
//! nothing (unbound) or one shared provider. Binding is "last write wins": a
//! new `set_provider` replaces whatever was bound before.
//!
//! Slots are guarded by a `RwLock`, so once `set_provider` returns every
//! subsequent `get_provider` on any thread observes the new binding.

use crate::guard::UnboundPolicy;
use serde::Serialize;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, trace};

/// A named cross-cutting service contract.
///
/// Implemented by zero-sized marker types; `Provider` is the trait object
/// type providers must implement, so conformance is checked at compile time.
pub trait Capability: 'static {
    /// Unique name, also the translation-key prefix (e.g., "cache")
    const NAME: &'static str;

    /// Behavior of guarded operations while no provider is bound
    const POLICY: UnboundPolicy;

    /// The contract, usually `dyn SomeProvider`
    type Provider: ?Sized + Send + Sync + 'static;
}

/// The binding for one capability.
pub struct ProviderSlot<C: Capability> {
    binding: RwLock<Option<Arc<C::Provider>>>,
}

impl<C: Capability> ProviderSlot<C> {
    fn new() -> Self {
        Self {
            binding: RwLock::new(None),
        }
    }

    /// Bind `provider`, returning the previous binding.
    pub fn set(&self, provider: Arc<C::Provider>) -> Option<Arc<C::Provider>> {
        self.binding
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(provider)
    }

    pub fn get(&self) -> Option<Arc<C::Provider>> {
        self.binding
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Restore the unbound state, returning the previous binding.
    pub fn reset(&self) -> Option<Arc<C::Provider>> {
        self.binding
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_bound(&self) -> bool {
        self.binding
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Type-erased view of a slot for diagnostics and bulk reset.
trait SlotState: Send + Sync {
    fn capability(&self) -> &'static str;
    fn policy(&self) -> UnboundPolicy;
    fn is_bound(&self) -> bool;
    fn reset(&self);
}

impl<C: Capability> SlotState for ProviderSlot<C> {
    fn capability(&self) -> &'static str {
        C::NAME
    }

    fn policy(&self) -> UnboundPolicy {
        C::POLICY
    }

    fn is_bound(&self) -> bool {
        ProviderSlot::is_bound(self)
    }

    fn reset(&self) {
        ProviderSlot::reset(self);
    }
}

struct SlotEntry {
    typed: Arc<dyn Any + Send + Sync>,
    state: Arc<dyn SlotState>,
}

/// Diagnostic view of one capability slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub capability: &'static str,
    pub policy: UnboundPolicy,
    pub bound: bool,
}

/// All provider slots of a process (or of a test-scoped context).
///
/// Slots are created lazily, unbound, the first time a capability is touched.
pub struct ProviderRegistry {
    slots: RwLock<HashMap<TypeId, SlotEntry>>,
    logger_fallback_noticed: AtomicBool,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            logger_fallback_noticed: AtomicBool::new(false),
        }
    }

    /// Get the process-wide registry used by the capability facades.
    pub fn global() -> &'static ProviderRegistry {
        REGISTRY.get_or_init(ProviderRegistry::new)
    }

    /// The slot for capability `C`, created unbound on first access.
    ///
    /// # Panics
    /// Never in practice: slots are keyed by `TypeId::of::<C>()`, so the stored
    /// slot always has type `ProviderSlot<C>`.
    pub fn slot<C: Capability>(&self) -> Arc<ProviderSlot<C>> {
        let existing = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<C>())
            .map(|entry| Arc::clone(&entry.typed));

        let typed = match existing {
            Some(typed) => typed,
            None => {
                let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
                let entry = slots.entry(TypeId::of::<C>()).or_insert_with(|| {
                    let slot = Arc::new(ProviderSlot::<C>::new());
                    SlotEntry {
                        typed: slot.clone(),
                        state: slot,
                    }
                });
                Arc::clone(&entry.typed)
            }
        };

        typed
            .downcast::<ProviderSlot<C>>()
            .unwrap_or_else(|_| panic!("slot for '{}' has a foreign type", C::NAME))
    }

    /// Bind `provider` to capability `C`, replacing any existing binding.
    pub fn set_provider<C: Capability>(&self, provider: Arc<C::Provider>) {
        let new_id = provider_id(&provider);
        match self.slot::<C>().set(provider) {
            Some(previous) if provider_id(&previous) == new_id => {
                trace!(capability = C::NAME, provider = %format_id(new_id), "Provider rebound to the same instance");
            }
            Some(previous) => {
                debug!(
                    capability = C::NAME,
                    previous = %format_id(provider_id(&previous)),
                    new = %format_id(new_id),
                    "Provider replaced"
                );
            }
            None => {
                debug!(capability = C::NAME, new = %format_id(new_id), "Provider bound");
            }
        }
    }

    /// The provider bound to `C`, or `None` when unbound.
    pub fn get_provider<C: Capability>(&self) -> Option<Arc<C::Provider>> {
        self.slot::<C>().get()
    }

    /// Restore `C` to the unbound state.
    pub fn reset_provider<C: Capability>(&self) {
        if let Some(previous) = self.slot::<C>().reset() {
            debug!(
                capability = C::NAME,
                previous = %format_id(provider_id(&previous)),
                "Provider reset"
            );
        }
    }

    pub fn is_bound<C: Capability>(&self) -> bool {
        self.slot::<C>().is_bound()
    }

    /// Restore every known slot to the unbound state.
    pub fn reset_all(&self) {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        for entry in slots.values() {
            entry.state.reset();
        }
        debug!(slots = slots.len(), "All providers reset");
    }

    /// True exactly once per registry: the first time the built-in log
    /// writer stands in for an unbound logger.
    pub(crate) fn first_logger_fallback(&self) -> bool {
        !self.logger_fallback_noticed.swap(true, Ordering::Relaxed)
    }

    /// Status of every slot touched so far, sorted by capability name.
    pub fn status(&self) -> Vec<SlotStatus> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut status: Vec<SlotStatus> = slots
            .values()
            .map(|entry| SlotStatus {
                capability: entry.state.capability(),
                policy: entry.state.policy(),
                bound: entry.state.is_bound(),
            })
            .collect();
        status.sort_by_key(|s| s.capability);
        status
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Address of the provider object, used as its identity in logs.
fn provider_id<P: ?Sized>(provider: &Arc<P>) -> usize {
    Arc::as_ptr(provider).cast::<()>() as usize
}

fn format_id(id: usize) -> String {
    format!("{:#x}", id)
}

/// Bind `provider` to `C` in the global registry.
pub fn set_provider<C: Capability>(provider: Arc<C::Provider>) {
    ProviderRegistry::global().set_provider::<C>(provider);
}

/// The provider bound to `C` in the global registry.
pub fn get_provider<C: Capability>() -> Option<Arc<C::Provider>> {
    ProviderRegistry::global().get_provider::<C>()
}

/// Unbind `C` in the global registry.
pub fn reset_provider<C: Capability>() {
    ProviderRegistry::global().reset_provider::<C>();
}

type Binder = Box<dyn FnOnce(&ProviderRegistry) + Send>;

/// A set of bindings applied together at start-up.
///
/// ```rust,ignore
/// let bindings = Bindings::new()
///     .bind::<Cache>(Arc::new(MemoryCache::new()))
///     .bind::<Logger>(Arc::new(TracingLogger::new()));
/// ```
#[derive(Default)]
pub struct Bindings {
    binders: Vec<(&'static str, Binder)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind<C: Capability>(mut self, provider: Arc<C::Provider>) -> Self {
        self.binders.push((
            C::NAME,
            Box::new(move |registry: &ProviderRegistry| registry.set_provider::<C>(provider)),
        ));
        self
    }

    /// Capability names in binding order.
    pub fn capabilities(&self) -> Vec<&'static str> {
        self.binders.iter().map(|(name, _)| *name).collect()
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }

    /// Apply every binding to `registry`, in order.
    pub fn apply(self, registry: &ProviderRegistry) {
        for (_, binder) in self.binders {
            binder(registry);
        }
    }
}
