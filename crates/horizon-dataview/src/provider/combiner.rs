//! Filter combination strategies.
//!
//! When a caller sets a filter on a [`FilterableLazyDataView`], the view does
//! not blindly overwrite whatever filter the bound component already holds.
//! It asks a [`FilterCombiner`] to merge the two, which lets components
//! layer a configured filter (say, a permanent "only active rows" predicate)
//! under the filters users type in at runtime.
//!
//! [`FilterableLazyDataView`]: super::FilterableLazyDataView

/// Strategy for merging a component's current filter with a newly supplied
/// one.
///
/// A combiner must be pure: no observable side effects, and a result for
/// every pair of filter values the component can produce. How a "no filter
/// yet" sentinel (for example `Option::None` or an empty string) combines is
/// the caller's decision, not this trait's.
///
/// Any `Fn(F, F) -> F` closure is a combiner, so most callers never
/// implement the trait by hand:
///
/// ```
/// use horizon_dataview::FilterCombiner;
///
/// // Chain query fragments instead of replacing them
/// let chain = |current: String, new: String| format!("{current}&{new}");
/// assert_eq!(chain.combine("x=1".into(), "y=2".into()), "x=1&y=2");
/// ```
pub trait FilterCombiner<F>: Send + Sync {
    /// Merges `current` (the filter the component holds now) with `new` (the
    /// filter just supplied) into the single filter to apply.
    fn combine(&self, current: F, new: F) -> F;
}

impl<F, C> FilterCombiner<F> for C
where
    C: Fn(F, F) -> F + Send + Sync,
{
    fn combine(&self, current: F, new: F) -> F {
        self(current, new)
    }
}

/// The default combiner: the new filter fully replaces the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityCombiner;

impl<F> FilterCombiner<F> for IdentityCombiner {
    fn combine(&self, _current: F, new: F) -> F {
        new
    }
}

/// Applies a combiner to a newly supplied filter and the existing one.
///
/// The operand order is fixed here, once, for the whole crate: the existing
/// filter is always the combiner's "current" side and the newly supplied
/// filter is always the "new" side, no matter in which order a call site
/// happens to have them. Swapping them would silently change the semantics
/// of any non-commutative combiner (a "new overrides fields of old" merge,
/// for instance), so call sites go through this function instead of calling
/// [`FilterCombiner::combine`] directly.
pub fn combine_filters<F>(
    combiner: &dyn FilterCombiner<F>,
    new_filter: F,
    existing_filter: F,
) -> F {
    combiner.combine(existing_filter, new_filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_returns_new_filter() {
        let combiner = IdentityCombiner;
        assert_eq!(combiner.combine("old".to_string(), "new".to_string()), "new");
    }

    #[test]
    fn test_closure_is_a_combiner() {
        let and = |current: String, new: String| format!("({current}) AND ({new})");
        assert_eq!(
            and.combine("a=1".to_string(), "b=2".to_string()),
            "(a=1) AND (b=2)"
        );
    }

    #[test]
    fn test_combine_filters_operand_order() {
        // Subtraction is non-commutative, so a swapped operand order would
        // produce -7 instead of 7.
        let diff = |current: i64, new: i64| current - new;
        assert_eq!(combine_filters(&diff, 3, 10), 7);
    }

    #[test]
    fn test_combine_filters_existing_side_first() {
        let concat = |current: String, new: String| format!("{current}&{new}");
        let combined = combine_filters(&concat, "y=2".to_string(), "x=1".to_string());
        assert_eq!(combined, "x=1&y=2");
    }

    #[test]
    fn test_combine_filters_with_identity() {
        let combined = combine_filters(&IdentityCombiner, "b".to_string(), "a".to_string());
        assert_eq!(combined, "b");
    }
}
