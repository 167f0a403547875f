//! The union-with-conflicts rule, free of storage.
//!
//! Bindings are walked in schema encounter order, then display order. The
//! first binding seen for a (name, kind) pair wins and later ones with the
//! same name and kind are dropped. When a name turns up with a second kind,
//! every entry under that name is qualified with its schema name.

use std::collections::HashMap;

use metafield_fields::name_key;
use tracing::trace;

use crate::ids::SchemaId;
use crate::types::{Field, ResolvedField};

/// A binding reachable from an item, before conflict handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableBinding {
    pub schema_id: SchemaId,
    pub schema_name: String,
    /// Position of the schema in encounter order
    pub schema_rank: usize,
    pub display_order: u32,
    pub show_on_summary: bool,
    pub field: Field,
}

/// Display name of a field whose name is shared across kinds.
pub fn qualified_name(schema_name: &str, field_name: &str) -> String {
    format!("{schema_name}: {field_name}")
}

/// Compute the effective field list. Values are left unset.
pub fn resolve(mut bindings: Vec<ReachableBinding>) -> Vec<ResolvedField> {
    bindings.sort_by_key(|b| (b.schema_rank, b.display_order));

    let mut entries: Vec<ResolvedField> = Vec::with_capacity(bindings.len());
    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

    for binding in bindings {
        let kind = binding.field.kind();
        let seen = by_name.entry(name_key(&binding.field.name)).or_default();

        if seen.iter().any(|&i| entries[i].field.kind() == kind) {
            trace!(
                field_id = %binding.field.id,
                schema_id = %binding.schema_id,
                "dropping duplicate field"
            );
            continue;
        }

        let conflicted = !seen.is_empty();
        if conflicted {
            for &i in seen.iter() {
                let entry = &mut entries[i];
                if !entry.conflicted {
                    entry.conflicted = true;
                    entry.display_name = qualified_name(&entry.schema_name, &entry.field.name);
                }
            }
        }

        let display_name = if conflicted {
            qualified_name(&binding.schema_name, &binding.field.name)
        } else {
            binding.field.name.clone()
        };
        seen.push(entries.len());
        entries.push(ResolvedField {
            field: binding.field,
            display_name,
            schema_id: binding.schema_id,
            schema_name: binding.schema_name,
            display_order: binding.display_order,
            show_on_summary: binding.show_on_summary,
            conflicted,
            value: None,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{FieldId, Scope};
    use chrono::Utc;
    use metafield_fields::FieldConfig;

    fn binding(schema: (&SchemaId, &str, usize), order: u32, name: &str, config: FieldConfig) -> ReachableBinding {
        let now = Utc::now();
        ReachableBinding {
            schema_id: *schema.0,
            schema_name: schema.1.to_string(),
            schema_rank: schema.2,
            display_order: order,
            show_on_summary: false,
            field: Field {
                id: FieldId::new(),
                scope: Scope::new("photos"),
                name: name.to_string(),
                config,
                created_at: now,
                updated_at: now,
            },
        }
    }

    fn names(resolved: &[ResolvedField]) -> Vec<&str> {
        resolved.iter().map(|r| r.display_name.as_str()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(resolve(Vec::new()).is_empty());
    }

    #[test]
    fn test_union_in_encounter_then_display_order() {
        let q = SchemaId::new();
        let r = SchemaId::new();
        let resolved = resolve(vec![
            binding((&r, "Review", 1), 0, "Notes", FieldConfig::text()),
            binding((&q, "Quality", 0), 1, "Sharp", FieldConfig::boolean()),
            binding((&q, "Quality", 0), 0, "Rating", FieldConfig::scale(5)),
        ]);
        assert_eq!(names(&resolved), ["Rating", "Sharp", "Notes"]);
        assert!(resolved.iter().all(|r| !r.conflicted && r.value.is_none()));
    }

    #[test]
    fn test_type_conflict_qualifies_both() {
        let q = SchemaId::new();
        let c = SchemaId::new();
        let resolved = resolve(vec![
            binding((&q, "Quality", 0), 0, "Rating", FieldConfig::scale(5)),
            binding((&c, "Client", 1), 0, "Rating", FieldConfig::choice(["Good", "Bad"])),
        ]);
        assert_eq!(names(&resolved), ["Quality: Rating", "Client: Rating"]);
        assert!(resolved.iter().all(|r| r.conflicted));
        assert_eq!(resolved[0].schema_id, q);
        assert_eq!(resolved[1].schema_id, c);
    }

    #[test]
    fn test_same_name_same_kind_first_wins() {
        let a = SchemaId::new();
        let b = SchemaId::new();
        let first = binding((&a, "A", 0), 3, "Rating", FieldConfig::scale(5));
        let first_id = first.field.id;
        let resolved = resolve(vec![
            binding((&b, "B", 1), 0, "rating", FieldConfig::scale(10)),
            first,
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].field.id, first_id);
        assert_eq!(resolved[0].display_name, "Rating");
        assert!(!resolved[0].conflicted);
    }

    #[test]
    fn test_three_way_name_sharing() {
        let a = SchemaId::new();
        let b = SchemaId::new();
        let c = SchemaId::new();
        let resolved = resolve(vec![
            binding((&a, "A", 0), 0, "Rating", FieldConfig::scale(5)),
            binding((&b, "B", 1), 0, "Rating", FieldConfig::scale(3)),
            binding((&c, "C", 2), 0, "Rating", FieldConfig::text()),
        ]);
        assert_eq!(names(&resolved), ["A: Rating", "C: Rating"]);
    }

    #[test]
    fn test_same_field_through_two_schemas_appears_once() {
        let a = SchemaId::new();
        let b = SchemaId::new();
        let shared = binding((&a, "A", 0), 0, "Rating", FieldConfig::scale(5));
        let mut again = shared.clone();
        again.schema_id = b;
        again.schema_name = "B".into();
        again.schema_rank = 1;
        let resolved = resolve(vec![shared, again]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].schema_id, a);
    }
}
