//! Process-wide layout registry
//!
//! One synthesis per distinct interface descriptor for the lifetime of the
//! process: the registry starts empty, grows monotonically and never
//! evicts. Lookups and the insert-if-absent commit go through a shared
//! [`DashMap`], so concurrent first-use of one descriptor from many threads
//! still commits exactly one layout.

use crate::iface::InterfaceDescriptor;
use crate::synth::{InterfaceLayout, SynthesisError};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;

static LAYOUTS: Lazy<DashMap<InterfaceDescriptor, Arc<InterfaceLayout>>> =
    Lazy::new(DashMap::new);

/// Get the cached layout for a descriptor, synthesizing it on first use.
///
/// Every call for one descriptor returns the same `Arc` (pointer-equal).
/// Two threads racing past the miss may both synthesize, but only one
/// layout commits; the loser's result is dropped and the committed one
/// returned to both. A failed synthesis commits nothing, so a later call
/// with a corrected descriptor is a clean first use.
pub fn layout_for(
    descriptor: &InterfaceDescriptor,
) -> Result<Arc<InterfaceLayout>, SynthesisError> {
    if let Some(cached) = LAYOUTS.get(descriptor) {
        return Ok(Arc::clone(cached.value()));
    }
    let fresh = Arc::new(InterfaceLayout::synthesize(descriptor)?);
    let committed = LAYOUTS.entry(descriptor.clone()).or_insert(fresh);
    Ok(Arc::clone(committed.value()))
}

/// Number of layouts synthesized so far in this process
pub fn cached_layouts() -> usize {
    LAYOUTS.len()
}
