//! The proxy instance and its calling convention
//!
//! A [`Proxy`] is one instantiation of a cached [`InterfaceLayout`]: it
//! holds the opaque target reference, the layout's shared method table and
//! the stored middleware callback, plus one independent backing slot per
//! declared property. Method calls resolve a selector to its stable
//! position, check the arguments against the declared signature and forward
//! through the middleware; property accessors read and write the instance's
//! own slots and never touch the middleware.

use crate::iface::MethodSig;
use crate::synth::InterfaceLayout;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use veneer_types::{TypeTag, Value};

/// Opaque reference to the proxied target object
pub type Target = Arc<dyn Any + Send + Sync>;

/// Failure raised inside a middleware callback
pub type MiddlewareFault = Box<dyn std::error::Error + Send + Sync>;

/// The interception callback every method call is routed through.
///
/// Receives `(proxy instance, declared return kind, target object, original
/// method descriptor, raw ordered arguments)` and produces the call's
/// return value. Runs synchronously on the caller's thread.
pub type Middleware = Arc<
    dyn Fn(&Proxy, TypeTag, &Target, &MethodSig, &[Value]) -> Result<Value, MiddlewareFault>
        + Send
        + Sync,
>;

/// Wrap a closure as a [`Middleware`] handle
pub fn middleware<F>(f: F) -> Middleware
where
    F: Fn(&Proxy, TypeTag, &Target, &MethodSig, &[Value]) -> Result<Value, MiddlewareFault>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Errors raised by an intercepted call or a property access
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No method with this selector on the interface
    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    /// No property with this name on the interface
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    /// Wrong number of arguments
    #[error("method `{method}` expects {expected} argument(s), got {got}")]
    Arity {
        /// Method selector
        method: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// An argument's kind does not match the declared parameter
    #[error("argument {index} of `{method}`: expected {expected}, got {got}")]
    ArgumentMismatch {
        /// Method selector
        method: String,
        /// Zero-based argument position
        index: usize,
        /// Declared parameter kind
        expected: TypeTag,
        /// Actual value kind
        got: &'static str,
    },

    /// The middleware's result does not match the declared return kind
    #[error("return value of `{method}`: expected {expected}, got {got}")]
    ReturnMismatch {
        /// Method selector
        method: String,
        /// Declared return kind
        expected: TypeTag,
        /// Actual value kind
        got: &'static str,
    },

    /// A written value does not match the property's declared kind
    #[error("property `{property}`: expected {expected}, got {got}")]
    PropertyMismatch {
        /// Property name
        property: String,
        /// Declared value kind
        expected: TypeTag,
        /// Actual value kind
        got: &'static str,
    },

    /// The middleware raised; propagated untranslated
    #[error(transparent)]
    Middleware(MiddlewareFault),
}

/// A proxy instance implementing one synthesized interface.
///
/// Instances are caller-owned and independent: each `build` returns a fresh
/// one, sharing only the immutable layout with its siblings.
pub struct Proxy {
    target: Target,
    // Shared with the cached layout; position-addressed at call time
    methods: Arc<[MethodSig]>,
    layout: Arc<InterfaceLayout>,
    middleware: Middleware,
    // One independent slot per property, in property-declaration order
    slots: Vec<Mutex<Value>>,
}

impl Proxy {
    pub(crate) fn new(layout: Arc<InterfaceLayout>, target: Target, middleware: Middleware) -> Self {
        let methods = Arc::clone(layout.methods());
        let slots = layout
            .properties()
            .iter()
            .map(|slot| Mutex::new(slot.initial.clone()))
            .collect();
        Self {
            target,
            methods,
            layout,
            middleware,
            slots,
        }
    }

    /// Invoke an interface method through the middleware.
    ///
    /// The selector resolves to the method's stable position; the raw
    /// argument sequence is checked against the declared signature, the
    /// middleware invoked with `(self, return kind, target, descriptor,
    /// args)`, and its result coerced against the declared return kind.
    pub fn call(&self, selector: &str, args: &[Value]) -> Result<Value, CallError> {
        let position = self
            .layout
            .method_position(selector)
            .ok_or_else(|| CallError::UnknownMethod(selector.to_string()))?;
        let sig = &self.methods[position];

        if args.len() != sig.arity() {
            return Err(CallError::Arity {
                method: sig.name.clone(),
                expected: sig.arity(),
                got: args.len(),
            });
        }
        for (index, (param, value)) in sig.params.iter().zip(args).enumerate() {
            if !param.admits(value) {
                return Err(CallError::ArgumentMismatch {
                    method: sig.name.clone(),
                    index,
                    expected: *param,
                    got: value.type_name(),
                });
            }
        }

        let result = (self.middleware)(self, sig.ret, &self.target, sig, args)
            .map_err(CallError::Middleware)?;

        if !sig.ret.admits(&result) {
            return Err(CallError::ReturnMismatch {
                method: sig.name.clone(),
                expected: sig.ret,
                got: result.type_name(),
            });
        }
        Ok(result)
    }

    /// Read a property's backing slot.
    ///
    /// Field-backed by design: property access never goes through the
    /// middleware, and the slot's state is fully separate from the target
    /// object's own state.
    pub fn get(&self, property: &str) -> Result<Value, CallError> {
        let index = self
            .layout
            .property_position(property)
            .ok_or_else(|| CallError::UnknownProperty(property.to_string()))?;
        Ok(self.slots[index].lock().clone())
    }

    /// Write a property's backing slot, checking the value's kind.
    pub fn set(&self, property: &str, value: Value) -> Result<(), CallError> {
        let index = self
            .layout
            .property_position(property)
            .ok_or_else(|| CallError::UnknownProperty(property.to_string()))?;
        let declared = self.layout.properties()[index].value;
        if !declared.admits(&value) {
            return Err(CallError::PropertyMismatch {
                property: property.to_string(),
                expected: declared,
                got: value.type_name(),
            });
        }
        *self.slots[index].lock() = value;
        Ok(())
    }

    /// The proxied target object
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The shared method-descriptor table, in synthesis order
    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }

    /// The cached layout this instance was built from.
    ///
    /// Two instances of one interface share a pointer-equal layout.
    pub fn layout(&self) -> &Arc<InterfaceLayout> {
        &self.layout
    }

    /// Name of the implemented interface
    pub fn interface_name(&self) -> &str {
        self.layout.interface_name()
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("interface", &self.layout.interface_name())
            .field("methods", &self.methods.len())
            .field("properties", &self.slots.len())
            .finish()
    }
}
