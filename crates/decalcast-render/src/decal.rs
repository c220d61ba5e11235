//! Event-scoped binding of decal textures onto materials.

use std::sync::Arc;

use decalcast_core::ImageFrame;
use glam::Mat4;

use crate::engine::{MaterialBindings, RenderQueueId};

/// One quad's staged decal for the current tick.
#[derive(Debug, Clone)]
struct StagedDecal {
    frame: Arc<ImageFrame>,
    projection: Mat4,
}

#[derive(Debug, Clone, Default)]
struct BindingSlot {
    material: Option<String>,
    staged: Option<StagedDecal>,
    bound: bool,
}

/// Attaches and detaches decal textures around the render pass that should
/// receive them.
///
/// A projective decal is global state on its material, so the binder binds at
/// `pre_render_queue` and unbinds at `post_render_queue`; geometry sharing the
/// material outside that window is unaffected. The display controller stages
/// one frame per quad per tick (or suppresses the quad) before the engine
/// fires the queue events.
#[derive(Debug, Default)]
pub struct DecalBinder {
    slots: Vec<BindingSlot>,
}

impl DecalBinder {
    /// Creates a binder with no slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the slot set for a new quad count.
    ///
    /// Call [`DecalBinder::release_all`] first if any decals are bound.
    pub fn resize(&mut self, count: usize) {
        self.slots = vec![BindingSlot::default(); count];
    }

    /// Returns the slot count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the binder has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sets the material that receives quad `index`'s decal.
    pub fn set_material(&mut self, index: usize, material: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.material = Some(material.into());
        }
    }

    /// Stages `frame` to be bound for quad `index` at the next queue event.
    pub fn stage(&mut self, index: usize, frame: Arc<ImageFrame>, projection: Mat4) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.staged = Some(StagedDecal { frame, projection });
        }
    }

    /// Clears quad `index`'s staged decal so nothing binds this tick.
    pub fn suppress(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.staged = None;
        }
    }

    /// Returns whether quad `index` has a decal staged.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.staged.is_some())
    }

    /// Returns how many quads have a decal staged.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.staged.is_some()).count()
    }

    /// Binds every staged decal; called by the engine before the queue runs.
    pub fn pre_render_queue(&mut self, queue: RenderQueueId, materials: &mut dyn MaterialBindings) {
        if queue != RenderQueueId::MAIN {
            return;
        }
        for slot in &mut self.slots {
            let (Some(material), Some(staged)) = (&slot.material, &slot.staged) else {
                continue;
            };
            materials.bind_decal(material, &staged.frame, staged.projection);
            slot.bound = true;
        }
    }

    /// Unbinds every bound decal; called by the engine after the queue runs.
    pub fn post_render_queue(
        &mut self,
        queue: RenderQueueId,
        materials: &mut dyn MaterialBindings,
    ) {
        if queue != RenderQueueId::MAIN {
            return;
        }
        for slot in &mut self.slots {
            if slot.bound {
                if let Some(material) = &slot.material {
                    materials.unbind_decal(material);
                }
                slot.bound = false;
            }
        }
    }

    /// Detaches everything and clears staged state; used on display disable.
    pub fn release_all(&mut self, materials: &mut dyn MaterialBindings) {
        for slot in &mut self.slots {
            if slot.bound {
                if let Some(material) = &slot.material {
                    materials.unbind_decal(material);
                }
                slot.bound = false;
            }
            slot.staged = None;
        }
    }
}
