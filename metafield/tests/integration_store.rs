//! Integration tests for persistence and concurrent writers on one database file

use std::sync::{Arc, Barrier};
use std::thread;

use metafield::{
    field::{CreateField, DeleteField, GetField, ListFields},
    schema::{CreateSchema, GetSchema, RemoveFieldFromSchema, UpdateSchemaBindings},
    BindingSpec, FieldConfig, MetafieldContext, MetafieldError, StoreConfig,
};
use tempfile::TempDir;
use test_log::test;

fn file_config(temp: &TempDir) -> StoreConfig {
    StoreConfig::at_path(temp.path().join(".metafield").join("metafield.db"))
}

#[test]
fn test_data_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let field = {
        let ctx = MetafieldContext::open(file_config(&temp)).build().unwrap();
        let field = ctx
            .run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            .unwrap();
        ctx.run(CreateSchema::new("photos", "Quality").with_binding(BindingSpec::new(field.id, 0)))
            .unwrap();
        field
    };

    let ctx = MetafieldContext::open(file_config(&temp)).build().unwrap();
    assert_eq!(ctx.run(GetField::new(field.id)).unwrap(), field);
    let err = ctx.run(DeleteField::new(field.id)).unwrap_err();
    assert!(matches!(err, MetafieldError::InUse { count: 1, .. }));
}

#[test]
fn test_field_bound_twice_is_in_use_until_both_bindings_go() {
    let temp = TempDir::new().unwrap();
    let ctx = MetafieldContext::open(file_config(&temp)).build().unwrap();
    let rating = ctx
        .run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
        .unwrap();
    let a = ctx
        .run(CreateSchema::new("photos", "A").with_binding(BindingSpec::new(rating.id, 0)))
        .unwrap();
    let b = ctx
        .run(CreateSchema::new("photos", "B").with_binding(BindingSpec::new(rating.id, 0)))
        .unwrap();

    let err = ctx.run(DeleteField::new(rating.id)).unwrap_err();
    assert!(matches!(err, MetafieldError::InUse { count: 2, field_id } if field_id == rating.id));

    ctx.run(RemoveFieldFromSchema::new(a.id, rating.id)).unwrap();
    let err = ctx.run(DeleteField::new(rating.id)).unwrap_err();
    assert!(matches!(err, MetafieldError::InUse { count: 1, .. }));

    ctx.run(RemoveFieldFromSchema::new(b.id, rating.id)).unwrap();
    ctx.run(DeleteField::new(rating.id)).unwrap();
    assert!(ctx.run(GetField::new(rating.id)).unwrap_err().is_not_found());
}

#[test]
fn test_concurrent_same_name_create_yields_one_conflict() {
    let temp = TempDir::new().unwrap();
    let contexts: Vec<_> = (0..2)
        .map(|_| MetafieldContext::open(file_config(&temp)).build().unwrap())
        .collect();
    let barrier = Arc::new(Barrier::new(contexts.len()));

    let handles: Vec<_> = contexts
        .into_iter()
        .map(|ctx| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                ctx.run(CreateField::new("photos", "Rating", FieldConfig::scale(5)))
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_conflict()))
        .count();
    assert_eq!(conflicts, 1);

    let ctx = MetafieldContext::open(file_config(&temp)).build().unwrap();
    assert_eq!(ctx.run(ListFields::new("photos")).unwrap().len(), 1);
}

#[test]
fn test_shared_context_across_threads() {
    let ctx = MetafieldContext::in_memory().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ctx = ctx.clone();
            thread::spawn(move || {
                ctx.run(CreateField::new("photos", format!("Field {i}"), FieldConfig::text()))
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(ctx.run(ListFields::new("photos")).unwrap().len(), 8);
}

#[test]
fn test_rejected_batch_leaves_schema_unchanged_on_disk() {
    let temp = TempDir::new().unwrap();
    let ctx = MetafieldContext::open(file_config(&temp)).build().unwrap();
    let fields: Vec<_> = ["A", "B", "C", "D"]
        .iter()
        .map(|name| {
            ctx.run(CreateField::new("photos", *name, FieldConfig::boolean()))
                .unwrap()
        })
        .collect();
    let schema = ctx
        .run(CreateSchema::new("photos", "Checks").with_bindings(
            fields
                .iter()
                .enumerate()
                .map(|(i, f)| BindingSpec::new(f.id, i as i64)),
        ))
        .unwrap();

    let err = ctx
        .run(UpdateSchemaBindings::new(
            schema.id,
            fields.iter().map(|f| BindingSpec::new(f.id, 0).shown()),
        ))
        .unwrap_err();
    assert!(matches!(err, MetafieldError::MaxVisibleExceeded { count: 4, .. }));

    let reopened = MetafieldContext::open(file_config(&temp)).build().unwrap();
    assert_eq!(reopened.run(GetSchema::new(schema.id)).unwrap(), schema);
}
