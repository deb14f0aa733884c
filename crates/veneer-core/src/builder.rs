//! Build entry points
//!
//! Two ways in: [`build`] is generic over a [`Contract`] and returns the
//! typed facade; [`ProxyBuilder`] takes a descriptor composed at run time
//! and returns the generic [`Proxy`]. Both go through the process-wide
//! layout registry, so repeated builds of one interface synthesize once and
//! only allocate a fresh instance.

use crate::iface::{Contract, InterfaceDescriptor};
use crate::proxy::{Middleware, Proxy, Target};
use crate::registry;
use crate::synth::SynthesisError;

/// Errors raised while building a proxy
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The interface shape could not be synthesized
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// No middleware function was supplied
    #[error("proxy instantiation requires a middleware function")]
    MissingMiddleware,

    /// No target object was supplied
    #[error("proxy instantiation requires a target object")]
    MissingTarget,
}

/// Build a typed proxy for the contract `C`.
///
/// Looks the contract's descriptor up in the process-wide cache,
/// synthesizing the layout on first use, then wraps a fresh instance —
/// a new instance on every call, cache hit or not.
pub fn build<C: Contract>(target: Target, middleware: Middleware) -> Result<C, BuildError> {
    let descriptor = C::descriptor();
    let layout = registry::layout_for(&descriptor)?;
    Ok(C::wrap(Proxy::new(layout, target, middleware)))
}

/// Builder for proxies over run-time-composed descriptors.
///
/// Target and middleware are supplied separately; [`build`](Self::build)
/// reports whichever is missing as an instantiation error.
pub struct ProxyBuilder {
    descriptor: InterfaceDescriptor,
    target: Option<Target>,
    middleware: Option<Middleware>,
}

impl ProxyBuilder {
    /// Start building a proxy for a descriptor
    pub fn new(descriptor: InterfaceDescriptor) -> Self {
        Self {
            descriptor,
            target: None,
            middleware: None,
        }
    }

    /// Supply the target object
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Supply the middleware callback
    pub fn middleware(mut self, middleware: Middleware) -> Self {
        self.middleware = Some(middleware);
        self
    }

    /// Build the proxy instance
    pub fn build(self) -> Result<Proxy, BuildError> {
        let middleware = self.middleware.ok_or(BuildError::MissingMiddleware)?;
        let target = self.target.ok_or(BuildError::MissingTarget)?;
        let layout = registry::layout_for(&self.descriptor)?;
        Ok(Proxy::new(layout, target, middleware))
    }
}
