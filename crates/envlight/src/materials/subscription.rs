//! Materials that follow the reflection capture
//!
//! After every capture the subscription pushes the cube texture handle into
//! each registered material. There is no dependency tracking: the full set
//! is written every time, and each material records the capture generation
//! it was given.

use std::collections::HashMap;

use crate::reflection::CubeRenderTarget;

use super::{MaterialRef, MaterialStore};

/// Registry of materials whose env map tracks the capture target
#[derive(Debug, Default)]
pub struct MaterialSubscription {
    /// Registered materials and their intensity override, if any
    subscribers: HashMap<MaterialRef, Option<f64>>,
}

impl MaterialSubscription {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a material, keeping its own env map intensity
    ///
    /// Registering the same material again has no effect. Returns whether the
    /// material was newly added.
    pub fn register(&mut self, material: MaterialRef) -> bool {
        if self.subscribers.contains_key(&material) {
            return false;
        }
        self.subscribers.insert(material, None);
        true
    }

    /// Subscribe a material with a fixed env map intensity
    ///
    /// A material that is already subscribed keeps its single entry; only
    /// the intensity it receives on notify changes.
    pub fn register_with_intensity(&mut self, material: MaterialRef, intensity: f64) -> bool {
        self.subscribers.insert(material, Some(intensity.max(0.0))).is_none()
    }

    /// Stop pushing captures to a material
    pub fn unregister(&mut self, material: MaterialRef) -> bool {
        self.subscribers.remove(&material).is_some()
    }

    /// Whether a material is subscribed
    pub fn contains(&self, material: MaterialRef) -> bool {
        self.subscribers.contains_key(&material)
    }

    /// Number of subscribed materials
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Push `target` into every subscribed material
    ///
    /// Each material gets the target handle, its intensity multiplier and the
    /// capture generation, and is marked for a GPU refresh. Materials that no
    /// longer exist in `materials` are dropped from the registry. Returns the
    /// number of materials updated.
    pub fn notify(&mut self, target: &CubeRenderTarget, materials: &mut MaterialStore) -> usize {
        let handle = target.handle();
        let generation = target.generation();
        let mut updated = 0;

        self.subscribers.retain(|&key, intensity| match materials.get_mut(key) {
            Some(material) => {
                let intensity = intensity.unwrap_or(material.env_map_intensity);
                material.set_env_map(handle, intensity, generation);
                updated += 1;
                true
            }
            None => {
                log::debug!("Dropping subscription for removed material {key:?}");
                false
            }
        });

        log::trace!("Pushed {handle:?} generation {generation} to {updated} materials");
        updated
    }
}
