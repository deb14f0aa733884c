//! Interface descriptors
//!
//! An [`InterfaceDescriptor`] is the identity of an abstract contract: the
//! declaration-ordered method, property and event signatures to synthesize
//! a proxy for. Descriptors are value types — cheap to clone, hashable, and
//! never mutated after construction; the layout registry uses them directly
//! as cache keys.

use crate::proxy::Proxy;
use std::fmt;
use veneer_types::TypeTag;

/// A method signature: name, parameter kinds in declaration order, and the
/// declared return kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSig {
    /// Method name (the call selector)
    pub name: String,
    /// Parameter kinds in declaration order
    pub params: Vec<TypeTag>,
    /// Declared return kind
    pub ret: TypeTag,
}

impl MethodSig {
    /// Create a method signature
    pub fn new(
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        ret: TypeTag,
    ) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
            ret,
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// A property signature: name and value kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertySig {
    /// Property name
    pub name: String,
    /// Value kind of the backing slot
    pub value: TypeTag,
}

/// An event signature.
///
/// Interfaces may declare events, but proxy synthesis has no representation
/// for them; a descriptor carrying one fails synthesis with an
/// unsupported-member error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventSig {
    /// Event name
    pub name: String,
}

/// One interface member, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    /// A callable method (the interception surface)
    Method(MethodSig),
    /// A property with an instance-local backing slot
    Property(PropertySig),
    /// An event (unsupported by synthesis)
    Event(EventSig),
}

/// The identity of an abstract contract.
///
/// Equality and hashing are structural: two descriptors with the same name
/// and member list are the same interface and share one synthesized layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceDescriptor {
    /// Interface name (diagnostics only; part of the identity)
    pub name: String,
    /// Members in declaration order
    pub members: Vec<Member>,
}

impl InterfaceDescriptor {
    /// Start building a descriptor
    pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Iterate declared methods in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodSig> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(sig) => Some(sig),
            _ => None,
        })
    }

    /// Iterate declared properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &PropertySig> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(sig) => Some(sig),
            _ => None,
        })
    }
}

/// Fluent builder for [`InterfaceDescriptor`]
pub struct InterfaceBuilder {
    name: String,
    members: Vec<Member>,
}

impl InterfaceBuilder {
    /// Declare a method
    pub fn method(
        mut self,
        name: impl Into<String>,
        params: impl IntoIterator<Item = TypeTag>,
        ret: TypeTag,
    ) -> Self {
        self.members
            .push(Member::Method(MethodSig::new(name, params, ret)));
        self
    }

    /// Declare a property
    pub fn property(mut self, name: impl Into<String>, value: TypeTag) -> Self {
        self.members.push(Member::Property(PropertySig {
            name: name.into(),
            value,
        }));
        self
    }

    /// Declare an event
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.members.push(Member::Event(EventSig { name: name.into() }));
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> InterfaceDescriptor {
        InterfaceDescriptor {
            name: self.name,
            members: self.members,
        }
    }
}

/// A typed facade over a proxy.
///
/// Implementors name their interface shape and wrap the generic [`Proxy`]
/// into a typed surface; [`crate::build`] is generic over this trait.
pub trait Contract: Sized + 'static {
    /// The interface this contract proxies
    fn descriptor() -> InterfaceDescriptor;

    /// Wrap a freshly built proxy instance
    fn wrap(proxy: Proxy) -> Self;
}
