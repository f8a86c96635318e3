//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a collider registered in a
    /// [`CollisionWorld`](crate::physics::CollisionWorld)
    ///
    /// Handles are non-owning: holding one never keeps a collider alive and a
    /// handle whose collider was cleared simply stops resolving.
    pub struct ColliderHandle;
}

/// Handle-based map keyed by [`ColliderHandle`]
pub type ColliderMap<T> = SlotMap<ColliderHandle, T>;
