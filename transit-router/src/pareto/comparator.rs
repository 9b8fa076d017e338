//! Multi-criteria dominance comparator.
//!
//! The active criteria for one routing request are composed into a
//! single `PathComparator` when the request is configured, so the
//! per-candidate hot path evaluates a fixed closure list instead of
//! re-branching on request flags. Two criteria vectors relate under the
//! standard Pareto rule: left dominates right when it is not worse on
//! any active criterion and strictly better on at least one; equal
//! values on a criterion defer the decision to the next one.

use std::cmp::Ordering;

use crate::domain::{Cost, PathCriteria};

use super::relax::RelaxFunction;

/// Direction the underlying round-based search ran in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Reverse,
}

/// Caller-supplied dominance rule for the secondary cost criterion.
/// `Ordering::Less` means the left cost is better.
pub type CostDominance = Box<dyn Fn(Cost, Cost) -> Ordering + Send + Sync>;

/// Flags selecting the active criteria for one request.
pub struct SearchCriteria {
    /// Compare generalized cost (c1) and total duration.
    pub include_c1: bool,
    /// Timetable view: also compare iteration departure time and duration.
    pub include_timetable_view: bool,
    /// Arrive-by searches prefer the latest departure instead of the
    /// earliest arrival.
    pub prefer_latest_departure: bool,
    pub direction: SearchDirection,
    /// Widen the c1 acceptance bound to keep near-optimal alternatives.
    pub relax_c1: Option<RelaxFunction>,
    /// Dominance rule for the secondary cost, when one is in use.
    pub c2_comparator: Option<CostDominance>,
}

impl SearchCriteria {
    /// The standard depart-after configuration: arrival time, transfers,
    /// duration and cost, forward search.
    pub fn standard() -> Self {
        Self {
            include_c1: true,
            include_timetable_view: false,
            prefer_latest_departure: false,
            direction: SearchDirection::Forward,
            relax_c1: None,
            c2_comparator: None,
        }
    }
}

type CriterionCmp = Box<dyn Fn(&PathCriteria, &PathCriteria) -> Ordering + Send + Sync>;

/// How two criteria vectors relate under the composed criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParetoRelation {
    LeftDominates,
    RightDominates,
    /// Each side is strictly better on some criterion; both are kept.
    MutualNonDominated,
    /// Equal on every active criterion.
    Equal,
}

/// The composed comparator for one request.
///
/// Built once per request and then evaluated identically for every
/// member of a Pareto set over its lifetime.
pub struct PathComparator {
    criteria: Vec<CriterionCmp>,
}

impl PathComparator {
    /// Compose the active criteria into one comparator.
    pub fn build(flags: SearchCriteria) -> Self {
        let mut criteria: Vec<CriterionCmp> = Vec::new();

        if flags.include_timetable_view {
            // Later iteration departure is better.
            criteria.push(Box::new(|l, r| {
                r.iteration_departure_time.cmp(&l.iteration_departure_time)
            }));
        }

        let prefer_latest =
            flags.prefer_latest_departure || flags.direction == SearchDirection::Reverse;
        if prefer_latest {
            criteria.push(Box::new(|l, r| r.departure_time.cmp(&l.departure_time)));
        } else {
            criteria.push(Box::new(|l, r| l.arrival_time.cmp(&r.arrival_time)));
        }

        criteria.push(Box::new(|l, r| l.num_transfers.cmp(&r.num_transfers)));

        if flags.include_c1 || flags.include_timetable_view {
            criteria.push(Box::new(|l, r| l.duration().cmp(&r.duration())));
        }

        if flags.include_c1 {
            match flags.relax_c1 {
                // The widened bound is always computed from the
                // right-hand side of the comparison.
                Some(relax) => criteria.push(Box::new(move |l, r| {
                    if l.c1 > relax.relax(r.c1) {
                        Ordering::Greater
                    } else if r.c1 > relax.relax(l.c1) {
                        Ordering::Less
                    } else {
                        Ordering::Equal
                    }
                })),
                None => criteria.push(Box::new(|l, r| l.c1.cmp(&r.c1))),
            }
        }

        if let Some(c2_cmp) = flags.c2_comparator {
            criteria.push(Box::new(move |l, r| match (l.c2, r.c2) {
                (Some(a), Some(b)) => c2_cmp(a, b),
                _ => Ordering::Equal,
            }));
        }

        Self { criteria }
    }

    /// Relate two criteria vectors under the composed criteria.
    pub fn relation(&self, left: &PathCriteria, right: &PathCriteria) -> ParetoRelation {
        let mut left_better = false;
        let mut right_better = false;

        for criterion in &self.criteria {
            match criterion(left, right) {
                Ordering::Less => left_better = true,
                Ordering::Greater => right_better = true,
                Ordering::Equal => {}
            }
        }

        match (left_better, right_better) {
            (true, false) => ParetoRelation::LeftDominates,
            (false, true) => ParetoRelation::RightDominates,
            (true, true) => ParetoRelation::MutualNonDominated,
            (false, false) => ParetoRelation::Equal,
        }
    }

    /// True when `left` strictly dominates `right`.
    pub fn left_dominates(&self, left: &PathCriteria, right: &PathCriteria) -> bool {
        self.relation(left, right) == ParetoRelation::LeftDominates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransitTime;

    fn criteria(
        departure: (i64, i64),
        arrival: (i64, i64),
        transfers: u32,
        c1: Cost,
    ) -> PathCriteria {
        let dep = TransitTime::hms(departure.0, departure.1, 0);
        PathCriteria {
            iteration_departure_time: dep,
            departure_time: dep,
            arrival_time: TransitTime::hms(arrival.0, arrival.1, 0),
            num_transfers: transfers,
            c1,
            c2: None,
        }
    }

    #[test]
    fn earlier_arrival_dominates() {
        let cmp = PathComparator::build(SearchCriteria::standard());
        let fast = criteria((10, 0), (10, 30), 0, 1_000);
        let slow = criteria((10, 0), (10, 40), 0, 1_000);

        assert_eq!(cmp.relation(&fast, &slow), ParetoRelation::LeftDominates);
        assert_eq!(cmp.relation(&slow, &fast), ParetoRelation::RightDominates);
    }

    #[test]
    fn fewer_transfers_vs_earlier_arrival_is_mutual() {
        let cmp = PathComparator::build(SearchCriteria::standard());
        let direct = criteria((10, 0), (10, 40), 0, 1_000);
        let with_change = criteria((10, 0), (10, 30), 1, 1_000);

        assert_eq!(
            cmp.relation(&direct, &with_change),
            ParetoRelation::MutualNonDominated
        );
    }

    #[test]
    fn equal_vectors() {
        let cmp = PathComparator::build(SearchCriteria::standard());
        let a = criteria((10, 0), (10, 30), 0, 1_000);
        let b = criteria((10, 0), (10, 30), 0, 1_000);

        assert_eq!(cmp.relation(&a, &b), ParetoRelation::Equal);
        assert!(!cmp.left_dominates(&a, &b));
    }

    #[test]
    fn cost_inactive_when_not_included() {
        let cmp = PathComparator::build(SearchCriteria {
            include_c1: false,
            ..SearchCriteria::standard()
        });
        let cheap = criteria((10, 0), (10, 30), 0, 100);
        let dear = criteria((10, 0), (10, 30), 0, 9_000);

        assert_eq!(cmp.relation(&cheap, &dear), ParetoRelation::Equal);
    }

    #[test]
    fn reverse_direction_prefers_late_departure() {
        let cmp = PathComparator::build(SearchCriteria {
            direction: SearchDirection::Reverse,
            ..SearchCriteria::standard()
        });
        // Equal durations and costs: only the departure time separates
        // them, and in a reverse search later is better.
        let early = criteria((10, 0), (11, 0), 0, 1_000);
        let late = criteria((10, 20), (11, 20), 0, 1_000);

        assert_eq!(cmp.relation(&late, &early), ParetoRelation::LeftDominates);
    }

    #[test]
    fn timetable_view_keeps_later_iterations() {
        let cmp = PathComparator::build(SearchCriteria {
            include_timetable_view: true,
            ..SearchCriteria::standard()
        });
        let mut early_iter = criteria((10, 0), (10, 30), 0, 1_000);
        let mut late_iter = criteria((10, 0), (10, 30), 0, 1_000);
        early_iter.iteration_departure_time = TransitTime::hms(9, 0, 0);
        late_iter.iteration_departure_time = TransitTime::hms(9, 30, 0);

        assert_eq!(
            cmp.relation(&late_iter, &early_iter),
            ParetoRelation::LeftDominates
        );
    }

    #[test]
    fn relaxed_cost_boundary() {
        // ratio 1.25, slack 300: bound for 1000 is 1550.
        let cmp = PathComparator::build(SearchCriteria {
            relax_c1: Some(RelaxFunction::new(1.25, 300).unwrap()),
            ..SearchCriteria::standard()
        });
        let reference = criteria((10, 0), (10, 30), 0, 1_000);
        let at_bound = criteria((10, 0), (10, 30), 0, 1_550);
        let past_bound = criteria((10, 0), (10, 30), 0, 1_551);

        // Exactly at the bound: neither side dominates, both retained.
        assert_eq!(cmp.relation(&reference, &at_bound), ParetoRelation::Equal);
        // One past the bound: the reference dominates.
        assert_eq!(
            cmp.relation(&reference, &past_bound),
            ParetoRelation::LeftDominates
        );
    }

    #[test]
    fn c2_uses_supplied_rule() {
        let cmp = PathComparator::build(SearchCriteria {
            // Larger c2 is better under this caller-supplied rule.
            c2_comparator: Some(Box::new(|l, r| r.cmp(&l))),
            ..SearchCriteria::standard()
        });
        let mut low = criteria((10, 0), (10, 30), 0, 1_000);
        let mut high = criteria((10, 0), (10, 30), 0, 1_000);
        low.c2 = Some(1);
        high.c2 = Some(5);

        assert_eq!(cmp.relation(&high, &low), ParetoRelation::LeftDominates);
    }
}
