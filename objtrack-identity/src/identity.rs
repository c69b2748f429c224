//! Process-local identity tokens, resolved by an ordered handler chain.
//!
//! The default chain, first match wins:
//!
//! 1. double-wrap guard (pojo already is a token or bookmark)
//! 2. services: fixed service id
//! 3. entities: entity capability over the live pojo
//! 4. values: empty token
//! 5. view models: memento
//! 6. anything else: random identifier

use crate::{guard_against_double_wrap, is_double_wrapped, ResolverConfig};
use objtrack_model::{Kind, ObjectHandle};
use objtrack_types::{Error, IdentityToken, Result};
use tracing::warn;
use uuid::Uuid;

/// One link of the identity chain.
pub trait IdentityHandler: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns true if this handler is responsible for the handle.
    fn handles(&self, handle: &ObjectHandle) -> bool;

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken>;
}

/// Rejects handles whose pojo is itself an identity token or bookmark.
pub struct GuardAgainstDoubleWrap;

impl IdentityHandler for GuardAgainstDoubleWrap {
    fn name(&self) -> &'static str {
        "guard-against-double-wrap"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        is_double_wrapped(handle)
    }

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        Err(guard_against_double_wrap(handle))
    }
}

/// Services are singletons: one fixed local id per type.
pub struct ServiceIdentity {
    service_id: String,
}

impl ServiceIdentity {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
        }
    }
}

impl IdentityHandler for ServiceIdentity {
    fn name(&self) -> &'static str {
        "service"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Service
    }

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        Ok(IdentityToken::new(
            handle.descriptor().type_identifier(),
            self.service_id.as_str(),
        ))
    }
}

/// Entities derive their id from live state; a detached pojo or a missing
/// capability means the object was mis-classified.
pub struct EntityIdentity;

impl IdentityHandler for EntityIdentity {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Entity
    }

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        let missing = || Error::MissingCapability {
            kind: handle.kind().to_string(),
            capability: "entity",
        };
        let pojo = handle.pojo().ok_or_else(missing)?;
        let capability = handle.descriptor().entity_capability().ok_or_else(missing)?;
        let id = capability.identifier_of(pojo).ok_or_else(missing)?;
        Ok(IdentityToken::new(handle.descriptor().type_identifier(), id))
    }
}

/// Values carry no persistent identity.
pub struct ValueIdentity;

impl IdentityHandler for ValueIdentity {
    fn name(&self) -> &'static str {
        "value"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Value
    }

    fn identify(&self, _handle: &ObjectHandle) -> Result<IdentityToken> {
        Ok(IdentityToken::empty())
    }
}

pub struct ViewModelIdentity;

impl IdentityHandler for ViewModelIdentity {
    fn name(&self) -> &'static str {
        "view-model"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::ViewModel
    }

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        let missing = || Error::MissingCapability {
            kind: handle.kind().to_string(),
            capability: "view-model",
        };
        let pojo = handle.pojo().ok_or_else(missing)?;
        let capability = handle
            .descriptor()
            .view_model_capability()
            .ok_or_else(missing)?;
        let memento = capability.memento_of(pojo).ok_or_else(missing)?;
        Ok(IdentityToken::new(handle.descriptor().type_identifier(), memento))
    }
}

/// Matches everything. Each call yields a fresh identifier.
pub struct FallbackIdentity;

impl IdentityHandler for FallbackIdentity {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn handles(&self, _handle: &ObjectHandle) -> bool {
        true
    }

    fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        let id = Uuid::new_v4().to_string();
        warn!(
            logical_type = %handle.logical_type_name(),
            kind = %handle.kind(),
            local_id = %id,
            "object has no natural identity, using a random one"
        );
        Ok(IdentityToken::new(handle.descriptor().type_identifier(), id))
    }
}

/// Derives identity tokens by running the handler chain in order.
pub struct IdentityResolver {
    handlers: Vec<Box<dyn IdentityHandler>>,
}

impl IdentityResolver {
    /// Creates a resolver with the default chain.
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_handlers(vec![
            Box::new(GuardAgainstDoubleWrap),
            Box::new(ServiceIdentity::new(config.service_id.as_str())),
            Box::new(EntityIdentity),
            Box::new(ValueIdentity),
            Box::new(ViewModelIdentity),
            Box::new(FallbackIdentity),
        ])
    }

    /// Creates a resolver from an explicit chain.
    pub fn with_handlers(handlers: Vec<Box<dyn IdentityHandler>>) -> Self {
        Self { handlers }
    }

    /// Names of the handlers, in evaluation order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Resolves the identity token of a handle. Does not memoize.
    pub fn identify(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.handles(handle))
            .ok_or_else(|| {
                Error::UnresolvedIdentity(format!(
                    "{} ({})",
                    handle.logical_type_name(),
                    handle.kind()
                ))
            })?;
        handler.identify(handle)
    }

    /// Returns the memoized token, or resolves one and memoizes it when the
    /// handle's kind has a stable identity.
    pub fn identify_memoized(&self, handle: &ObjectHandle) -> Result<IdentityToken> {
        if let Some(token) = handle.memoized_identity() {
            return Ok(token.clone());
        }
        let token = self.identify(handle)?;
        if handle.kind().has_stable_identity() {
            handle.memoize_identity(token.clone());
        }
        Ok(token)
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}
