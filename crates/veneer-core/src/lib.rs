//! Veneer dynamic interface proxies
//!
//! This crate synthesizes proxy implementations of abstract interface
//! descriptors at run time:
//! - Interface descriptors (method + property signatures) as cache keys
//! - One synthesized layout per interface per process, never evicted
//! - A generic [`Proxy`] instance forwarding every method call through a
//!   single stored middleware callback
//! - Field-backed property slots that bypass the middleware by design
//! - A [`Multicast`] dispatcher with per-handler fault isolation

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod builder;
pub mod events;
pub mod iface;
pub mod proxy;
pub mod registry;
pub mod synth;

pub use builder::{build, BuildError, ProxyBuilder};
pub use events::{handler, Handler, HandlerFault, Multicast};
pub use iface::{Contract, EventSig, InterfaceDescriptor, Member, MethodSig, PropertySig};
pub use proxy::{middleware, CallError, Middleware, MiddlewareFault, Proxy, Target};
pub use registry::{cached_layouts, layout_for};
pub use synth::{InterfaceLayout, PropertySlot, SynthesisError, GETTER_PREFIX, SETTER_PREFIX};

pub use veneer_types::{args, Args, FromValue, IntoValue, TypeTag, Value, ValueError};
