//! Display order normalization and the summary visibility limit.
//!
//! Every mutation that touches a schema's bindings computes the complete
//! proposed binding set first, checks it here, and only then writes.

use tracing::warn;

use crate::error::{MetafieldError, Result};
use crate::ids::{FieldId, SchemaId};
use crate::types::BindingSpec;

/// Most bindings of one schema that may be shown on summaries.
pub const MAX_VISIBLE_ON_SUMMARY: usize = 3;

/// A binding with its final, dense display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBinding {
    pub field_id: FieldId,
    pub display_order: u32,
    pub show_on_summary: bool,
}

/// Sort specs by requested order, ties kept in input order, then number
/// them densely from 0.
pub fn place(specs: &[BindingSpec]) -> Vec<PlacedBinding> {
    let mut sorted = specs.to_vec();
    sorted.sort_by_key(|spec| spec.display_order);
    renumber(
        sorted
            .into_iter()
            .map(|spec| (spec.field_id, spec.show_on_summary)),
    )
}

/// Number already-ordered bindings densely from 0.
pub fn renumber(ordered: impl IntoIterator<Item = (FieldId, bool)>) -> Vec<PlacedBinding> {
    ordered
        .into_iter()
        .zip(0u32..)
        .map(|((field_id, show_on_summary), display_order)| PlacedBinding {
            field_id,
            display_order,
            show_on_summary,
        })
        .collect()
}

/// Refuse a proposed binding set that shows too many fields on summaries.
pub fn check_visible_limit(schema_id: &SchemaId, proposed: &[PlacedBinding]) -> Result<()> {
    let count = proposed.iter().filter(|b| b.show_on_summary).count();
    if count > MAX_VISIBLE_ON_SUMMARY {
        warn!(
            schema_id = %schema_id,
            count,
            limit = MAX_VISIBLE_ON_SUMMARY,
            "rejected binding change over summary limit"
        );
        return Err(MetafieldError::MaxVisibleExceeded {
            schema_id: *schema_id,
            count,
            limit: MAX_VISIBLE_ON_SUMMARY,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(n: usize) -> Vec<FieldId> {
        (0..n).map(|_| FieldId::new()).collect()
    }

    #[test]
    fn test_place_sorts_and_densifies() {
        let f = ids(3);
        let placed = place(&[
            BindingSpec::new(f[0], 40),
            BindingSpec::new(f[1], -5),
            BindingSpec::new(f[2], 10),
        ]);
        let order: Vec<_> = placed.iter().map(|b| (b.field_id, b.display_order)).collect();
        assert_eq!(order, [(f[1], 0), (f[2], 1), (f[0], 2)]);
    }

    #[test]
    fn test_place_keeps_input_order_on_ties() {
        let f = ids(3);
        let placed = place(&[
            BindingSpec::new(f[0], 1),
            BindingSpec::new(f[1], 0),
            BindingSpec::new(f[2], 1),
        ]);
        let order: Vec<_> = placed.iter().map(|b| b.field_id).collect();
        assert_eq!(order, [f[1], f[0], f[2]]);
    }

    #[rstest]
    #[case(0, true)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(6, false)]
    fn test_visible_limit(#[case] shown: usize, #[case] ok: bool) {
        let proposed: Vec<_> = renumber(ids(6).into_iter().enumerate().map(|(i, id)| (id, i < shown)));
        let result = check_visible_limit(&SchemaId::new(), &proposed);
        assert_eq!(result.is_ok(), ok);
        if let Err(MetafieldError::MaxVisibleExceeded { count, limit, .. }) = result {
            assert_eq!(count, shown);
            assert_eq!(limit, MAX_VISIBLE_ON_SUMMARY);
        }
    }
}
