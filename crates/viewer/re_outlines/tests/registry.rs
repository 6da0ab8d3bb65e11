use std::sync::Arc;

use re_outlines::{
    Drawable, DrawableId, MaterialId, ObjectSettings, OutlineRegistry, OutlinedObject,
};

fn object() -> Arc<OutlinedObject> {
    Arc::new(OutlinedObject::new(
        Drawable::new(DrawableId(1), [MaterialId(1)]),
        ObjectSettings::Inherited,
    ))
}

#[test]
fn register_is_idempotent() {
    let registry = OutlineRegistry::default();
    let obj = object();

    registry.register(&obj);
    registry.register(&obj);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.snapshot().len(), 1);
    assert!(registry.contains(&obj));
}

#[test]
fn unregister_absent_is_noop() {
    let registry = OutlineRegistry::default();
    let registered = object();
    let other = object();
    registry.register(&registered);

    registry.unregister(&other);
    assert_eq!(registry.len(), 1);

    registry.unregister(&registered);
    registry.unregister(&registered);
    assert!(registry.is_empty());
    assert!(registry.snapshot().is_empty());
}

#[test]
fn snapshot_is_ordered_by_id() {
    let registry = OutlineRegistry::default();
    let objects = [object(), object(), object()];
    for obj in objects.iter().rev() {
        registry.register(obj);
    }

    let ids: Vec<_> = registry.snapshot().iter().map(|obj| obj.id()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), 3);
}

#[test]
fn snapshot_is_unaffected_by_later_changes() {
    let registry = OutlineRegistry::default();
    let first = object();
    registry.register(&first);

    let snapshot = registry.snapshot();
    registry.unregister(&first);
    registry.register(&object());

    assert_eq!(snapshot.len(), 1);
    assert!(Arc::ptr_eq(&snapshot[0], &first));
}

#[test]
fn active_outline_follows_enable_disable() {
    let registry = OutlineRegistry::new_shared();
    let obj = object();

    let active = registry.activate(&obj);
    assert_eq!(active.id(), obj.id());
    assert!(registry.contains(&obj));

    drop(active);
    assert!(!registry.contains(&obj));
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = OutlineRegistry::new_shared();
    let objects: Vec<_> = (0..8).map(|_| object()).collect();

    std::thread::scope(|scope| {
        for obj in &objects {
            let registry = &registry;
            scope.spawn(move || registry.register(obj));
        }
    });

    assert_eq!(registry.len(), objects.len());
}
