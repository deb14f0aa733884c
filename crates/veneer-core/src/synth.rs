//! Layout synthesis
//!
//! Synthesis turns an [`InterfaceDescriptor`] into an [`InterfaceLayout`]:
//! the ordered method table whose positions are the stable call-site
//! identity, the selector maps resolving names to positions, and the plan
//! for the instance-local property slots. A layout is the cached artifact
//! the registry hands out; proxy instances share it by `Arc`.

use crate::iface::{InterfaceDescriptor, Member, MethodSig};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use veneer_types::{TypeTag, Value};

/// Reserved prefix identifying getter accessor methods
pub const GETTER_PREFIX: &str = "get_";
/// Reserved prefix identifying setter accessor methods
pub const SETTER_PREFIX: &str = "set_";

/// Errors turning an interface shape into a layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The interface declares a member kind synthesis cannot represent
    #[error("interface `{interface}` declares unsupported member `{member}`")]
    UnsupportedMember {
        /// Interface name
        interface: String,
        /// Offending member name
        member: String,
    },

    /// Two members resolve to one selector after accessor-name mangling
    #[error("interface `{interface}`: selector `{selector}` declared more than once")]
    NameCollision {
        /// Interface name
        interface: String,
        /// The duplicated selector
        selector: String,
    },

    /// A property's value kind has no default-constructible backing
    #[error("interface `{interface}`: property `{property}` of kind {value} has no default value")]
    UnsupportedPropertyType {
        /// Interface name
        interface: String,
        /// Property name
        property: String,
        /// The property's declared kind
        value: TypeTag,
    },
}

/// Backing-slot plan for one property
#[derive(Debug, Clone)]
pub struct PropertySlot {
    /// Property name
    pub name: String,
    /// Declared value kind
    pub value: TypeTag,
    /// Default-constructed initial value for the slot
    pub initial: Value,
}

/// The synthesized artifact for one interface: method table, selector maps
/// and property plan.
///
/// Created at most once per distinct descriptor for the process lifetime
/// and shared by every proxy instance of that interface. The method table's
/// order is the deterministic declaration order of the descriptor; a
/// method's zero-based position in it is its stable identity at call time.
#[derive(Debug)]
pub struct InterfaceLayout {
    name: String,
    methods: Arc<[MethodSig]>,
    selectors: FxHashMap<String, usize>,
    properties: Vec<PropertySlot>,
    prop_selectors: FxHashMap<String, usize>,
}

impl InterfaceLayout {
    /// Synthesize a layout from an interface descriptor.
    ///
    /// Walks members in declaration order. Methods carrying a reserved
    /// accessor prefix (`get_` / `set_`) are property accessors and are
    /// excluded from the interception table; every other method is appended
    /// and given the next position. Each property contributes a typed
    /// backing-slot plan plus mangled `get_`/`set_` accessor selectors.
    /// Nothing is committed on failure.
    pub fn synthesize(descriptor: &InterfaceDescriptor) -> Result<Self, SynthesisError> {
        let mut methods = Vec::new();
        let mut selectors = FxHashMap::default();
        let mut properties = Vec::new();
        let mut prop_selectors = FxHashMap::default();
        // All selector names the layout exposes, accessor mangling included
        let mut taken: FxHashSet<String> = FxHashSet::default();

        let claim = |taken: &mut FxHashSet<String>, selector: &str| {
            if taken.insert(selector.to_string()) {
                Ok(())
            } else {
                Err(SynthesisError::NameCollision {
                    interface: descriptor.name.clone(),
                    selector: selector.to_string(),
                })
            }
        };

        for member in &descriptor.members {
            match member {
                Member::Method(sig) => {
                    if sig.name.starts_with(GETTER_PREFIX) || sig.name.starts_with(SETTER_PREFIX) {
                        // Declared accessor of one of the interface's own
                        // properties; the property member supplies the slot.
                        continue;
                    }
                    claim(&mut taken, &sig.name)?;
                    selectors.insert(sig.name.clone(), methods.len());
                    methods.push(sig.clone());
                }
                Member::Property(sig) => {
                    let initial = sig.value.zero_value().ok_or_else(|| {
                        SynthesisError::UnsupportedPropertyType {
                            interface: descriptor.name.clone(),
                            property: sig.name.clone(),
                            value: sig.value,
                        }
                    })?;
                    claim(&mut taken, &format!("{}{}", GETTER_PREFIX, sig.name))?;
                    claim(&mut taken, &format!("{}{}", SETTER_PREFIX, sig.name))?;
                    prop_selectors.insert(sig.name.clone(), properties.len());
                    properties.push(PropertySlot {
                        name: sig.name.clone(),
                        value: sig.value,
                        initial,
                    });
                }
                Member::Event(sig) => {
                    return Err(SynthesisError::UnsupportedMember {
                        interface: descriptor.name.clone(),
                        member: sig.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            name: descriptor.name.clone(),
            methods: methods.into(),
            selectors,
            properties,
            prop_selectors,
        })
    }

    /// Name of the synthesized interface
    pub fn interface_name(&self) -> &str {
        &self.name
    }

    /// The shared, position-addressable method table
    pub fn methods(&self) -> &Arc<[MethodSig]> {
        &self.methods
    }

    /// Number of interceptable methods
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Resolve a method selector to its stable position
    pub fn method_position(&self, selector: &str) -> Option<usize> {
        self.selectors.get(selector).copied()
    }

    /// The property slot plan, in property-declaration order
    pub fn properties(&self) -> &[PropertySlot] {
        &self.properties
    }

    /// Resolve a property name to its slot index
    pub fn property_position(&self, name: &str) -> Option<usize> {
        self.prop_selectors.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iface::InterfaceDescriptor;

    fn calc() -> InterfaceDescriptor {
        InterfaceDescriptor::builder("ICalc")
            .method("add", [TypeTag::I32, TypeTag::I32], TypeTag::I32)
            .property("Precision", TypeTag::I32)
            .method("describe", [], TypeTag::Str)
            .build()
    }

    #[test]
    fn test_positions_follow_declaration_order() {
        let layout = InterfaceLayout::synthesize(&calc()).unwrap();

        assert_eq!(layout.method_count(), 2);
        assert_eq!(layout.method_position("add"), Some(0));
        assert_eq!(layout.method_position("describe"), Some(1));
        assert_eq!(layout.method_position("missing"), None);

        assert_eq!(layout.methods()[0].name, "add");
        assert_eq!(layout.methods()[1].name, "describe");
    }

    #[test]
    fn test_accessor_named_methods_are_excluded() {
        let desc = InterfaceDescriptor::builder("IColored")
            .method("get_Color", [], TypeTag::Str)
            .method("set_Color", [TypeTag::Str], TypeTag::Unit)
            .property("Color", TypeTag::Str)
            .method("paint", [TypeTag::Str], TypeTag::Unit)
            .build();

        let layout = InterfaceLayout::synthesize(&desc).unwrap();
        assert_eq!(layout.method_count(), 1);
        assert_eq!(layout.method_position("paint"), Some(0));
        assert_eq!(layout.method_position("get_Color"), None);
        assert_eq!(layout.property_position("Color"), Some(0));
    }

    #[test]
    fn test_property_slots_carry_zero_values() {
        let layout = InterfaceLayout::synthesize(&calc()).unwrap();
        let slots = layout.properties();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].name, "Precision");
        assert_eq!(slots[0].initial, Value::i32(0));
    }

    #[test]
    fn test_duplicate_method_collides() {
        let desc = InterfaceDescriptor::builder("IDup")
            .method("go", [], TypeTag::Unit)
            .method("go", [TypeTag::I32], TypeTag::Unit)
            .build();

        let err = InterfaceLayout::synthesize(&desc).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::NameCollision {
                interface: "IDup".to_string(),
                selector: "go".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_property_collides_after_mangling() {
        let desc = InterfaceDescriptor::builder("IDup")
            .property("X", TypeTag::I32)
            .property("X", TypeTag::Str)
            .build();

        let err = InterfaceLayout::synthesize(&desc).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::NameCollision {
                interface: "IDup".to_string(),
                selector: "get_X".to_string(),
            }
        );
    }

    #[test]
    fn test_event_member_is_unsupported() {
        let desc = InterfaceDescriptor::builder("INotify")
            .event("Changed")
            .build();

        let err = InterfaceLayout::synthesize(&desc).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnsupportedMember {
                interface: "INotify".to_string(),
                member: "Changed".to_string(),
            }
        );
    }

    #[test]
    fn test_opaque_property_has_no_backing() {
        let desc = InterfaceDescriptor::builder("IBlob")
            .property("Payload", TypeTag::Opaque)
            .build();

        let err = InterfaceLayout::synthesize(&desc).unwrap_err();
        assert_eq!(
            err,
            SynthesisError::UnsupportedPropertyType {
                interface: "IBlob".to_string(),
                property: "Payload".to_string(),
                value: TypeTag::Opaque,
            }
        );
    }
}
