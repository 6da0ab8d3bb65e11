use std::{
    collections::BTreeMap,
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;

use crate::{Drawable, ObjectSettings};

/// Process-wide unique identifier of an [`OutlinedObject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutlinedObjectId(u64);

impl OutlinedObjectId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A drawable that wants to be outlined.
#[derive(Debug)]
pub struct OutlinedObject {
    id: OutlinedObjectId,
    drawable: Drawable,
    settings: ObjectSettings,
}

impl OutlinedObject {
    pub fn new(drawable: Drawable, settings: ObjectSettings) -> Self {
        Self {
            id: OutlinedObjectId::next(),
            drawable,
            settings,
        }
    }

    #[inline]
    pub fn id(&self) -> OutlinedObjectId {
        self.id
    }

    #[inline]
    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    #[inline]
    pub fn settings(&self) -> &ObjectSettings {
        &self.settings
    }
}

/// The set of currently active outlined objects.
///
/// Holds no ownership: an object that is dropped without being unregistered is simply skipped.
/// Every outline pass that should draw the objects gets a handle to the same registry.
#[derive(Default)]
pub struct OutlineRegistry {
    objects: Mutex<BTreeMap<OutlinedObjectId, Weak<OutlinedObject>>>,
}

/// [`OutlineRegistry`] that can be shared between passes and threads.
pub type SharedOutlineRegistry = Arc<OutlineRegistry>;

impl OutlineRegistry {
    pub fn new_shared() -> SharedOutlineRegistry {
        Arc::new(Self::default())
    }

    /// Adds an object. Does nothing if it is already registered.
    pub fn register(&self, object: &Arc<OutlinedObject>) {
        self.objects
            .lock()
            .entry(object.id)
            .or_insert_with(|| Arc::downgrade(object));
    }

    /// Removes an object. Does nothing if it isn't registered.
    pub fn unregister(&self, object: &OutlinedObject) {
        self.remove(object.id);
    }

    /// Registers `object` until the returned guard is dropped.
    ///
    /// Mirrors an object's enabled/disabled lifecycle.
    #[must_use = "the object is unregistered again as soon as the guard is dropped"]
    pub fn activate(self: &Arc<Self>, object: &Arc<OutlinedObject>) -> ActiveOutline {
        self.register(object);
        ActiveOutline {
            registry: Arc::downgrade(self),
            id: object.id,
        }
    }

    pub fn contains(&self, object: &OutlinedObject) -> bool {
        self.objects
            .lock()
            .get(&object.id)
            .is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Number of registered objects that are still alive.
    pub fn len(&self) -> usize {
        self.objects
            .lock()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered objects that are still alive, ordered by id.
    ///
    /// Registration changes made while iterating the snapshot only show up in the next one.
    pub fn snapshot(&self) -> Vec<Arc<OutlinedObject>> {
        re_tracing::profile_function!();

        let mut objects = self.objects.lock();
        let snapshot: Vec<_> = objects.values().filter_map(Weak::upgrade).collect();
        if snapshot.len() != objects.len() {
            re_log::trace!(
                "Pruning {} dropped outlined objects",
                objects.len() - snapshot.len()
            );
            objects.retain(|_, weak| weak.strong_count() > 0);
        }
        snapshot
    }

    fn remove(&self, id: OutlinedObjectId) {
        self.objects.lock().remove(&id);
    }
}

/// Keeps an object registered, see [`OutlineRegistry::activate`].
pub struct ActiveOutline {
    registry: Weak<OutlineRegistry>,
    id: OutlinedObjectId,
}

impl ActiveOutline {
    #[inline]
    pub fn id(&self) -> OutlinedObjectId {
        self.id
    }
}

impl Drop for ActiveOutline {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawableId, MaterialId};

    fn object() -> Arc<OutlinedObject> {
        Arc::new(OutlinedObject::new(
            Drawable::new(DrawableId(0), [MaterialId(0)]),
            ObjectSettings::Inherited,
        ))
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(object().id(), object().id());
    }

    #[test]
    fn dropped_objects_are_pruned() {
        let registry = OutlineRegistry::default();
        let kept = object();
        let dropped = object();
        registry.register(&kept);
        registry.register(&dropped);
        drop(dropped);

        assert_eq!(registry.len(), 1);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(Arc::ptr_eq(&snapshot[0], &kept));
        assert_eq!(registry.objects.lock().len(), 1);
    }

    #[test]
    fn guard_outliving_registry() {
        let registry = OutlineRegistry::new_shared();
        let obj = object();
        let guard = registry.activate(&obj);
        drop(registry);
        drop(guard);
    }
}
