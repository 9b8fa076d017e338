//! Self-maintaining collection of non-dominated paths.
//!
//! `ParetoPathSet` keeps only mutually non-dominated paths under the
//! comparator it was configured with. Accepting a new path atomically
//! removes every member it dominates; a path dominated by any member,
//! or identical to one, is rejected before anything is removed.

use crate::domain::{Path, PathCriteria};

use super::comparator::{ParetoRelation, PathComparator};

/// A Pareto set of paths.
pub struct ParetoPathSet {
    comparator: PathComparator,
    // Criteria cached beside each path so comparisons never walk legs.
    members: Vec<(PathCriteria, Path)>,
}

impl ParetoPathSet {
    pub fn new(comparator: PathComparator) -> Self {
        Self {
            comparator,
            members: Vec::new(),
        }
    }

    /// Insert a path. Returns `true` if it was accepted.
    ///
    /// Rejection happens before any removal, so a rejected path never
    /// alters the set. Exact duplicates (identical criteria vectors)
    /// are rejected, making insertion idempotent. Paths the comparator
    /// ties without being identical, which happens with a relaxed cost
    /// criterion where each lies within the other's widened bound, are
    /// mutually non-dominated and kept side by side in insertion order.
    pub fn add(&mut self, path: Path) -> bool {
        let candidate = path.criteria();

        for (existing, _) in &self.members {
            if *existing == candidate {
                return false;
            }
            if self.comparator.relation(existing, &candidate) == ParetoRelation::LeftDominates {
                return false;
            }
        }

        let comparator = &self.comparator;
        self.members.retain(|(existing, _)| {
            comparator.relation(&candidate, existing) != ParetoRelation::LeftDominates
        });
        self.members.push((candidate, path));
        true
    }

    /// Cheap pre-check: would a path with these criteria be accepted?
    ///
    /// Lets the search skip building a full path for candidates that
    /// stand no chance.
    pub fn qualify(&self, candidate: &PathCriteria) -> bool {
        !self.members.iter().any(|(existing, _)| {
            existing == candidate
                || self.comparator.relation(existing, candidate) == ParetoRelation::LeftDominates
        })
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// The current members, in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &Path> {
        self.members.iter().map(|(_, path)| path)
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.members.into_iter().map(|(_, path)| path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccessEgress, AccessLeg, Cost, EgressLeg, PathLeg, StopIndex, TransitLeg, TransitTime,
        TripSchedule,
    };
    use crate::pareto::{RelaxFunction, SearchCriteria};
    use chrono::Duration;

    fn t(h: i64, m: i64) -> TransitTime {
        TransitTime::hms(h, m, 0)
    }

    /// A one-ride path departing/arriving at the given times, with extra
    /// intermediate rides to control the transfer count.
    pub(super) fn path(
        departure: (i64, i64),
        arrival: (i64, i64),
        transfers: u32,
        cost: Cost,
    ) -> Path {
        let dep = t(departure.0, departure.1);
        let arr = t(arrival.0, arrival.1);
        let board = dep + Duration::minutes(1);
        let alight = arr - Duration::minutes(1);

        let mut legs = vec![PathLeg::Access(AccessLeg {
            access: AccessEgress::walk(StopIndex(1), Duration::minutes(1), 0),
            from_time: dep,
            to_time: board,
            cost: 0,
        })];

        // transfers + 1 rides, zero-duration intermediate hops.
        let rides = transfers + 1;
        let ride_cost = cost / rides as Cost;
        let mut remainder = cost - ride_cost * rides as Cost;
        for ride in 0..rides {
            let from_stop = StopIndex(1 + ride as usize);
            let to_stop = StopIndex(2 + ride as usize);
            let board_time = if ride == 0 { board } else { alight };
            let trip = TripSchedule::new(
                format!("R{ride}"),
                vec![(from_stop, board_time, board_time), (to_stop, alight, alight)],
            )
            .unwrap();
            legs.push(PathLeg::Transit(TransitLeg {
                trip,
                board_stop: from_stop,
                alight_stop: to_stop,
                board_time,
                alight_time: alight,
                cost: ride_cost + remainder,
            }));
            remainder = 0;
        }

        legs.push(PathLeg::Egress(EgressLeg {
            egress: AccessEgress::walk(StopIndex(2 + transfers as usize), Duration::minutes(1), 0),
            from_time: alight,
            to_time: arr,
            cost: 0,
        }));

        Path::new(legs, dep, None).unwrap()
    }

    fn set() -> ParetoPathSet {
        ParetoPathSet::new(PathComparator::build(SearchCriteria::standard()))
    }

    #[test]
    fn accepts_first_path() {
        let mut set = set();
        assert!(set.is_empty());
        assert!(set.add(path((10, 0), (10, 30), 0, 1_000)));
        assert!(!set.is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn idempotent_insertion() {
        let mut set = set();
        assert!(set.add(path((10, 0), (10, 30), 0, 1_000)));
        assert!(!set.add(path((10, 0), (10, 30), 0, 1_000)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dominance_antisymmetry() {
        // A dominates B. Inserting A after B removes B; inserting B
        // after A is rejected.
        let a = || path((10, 0), (10, 30), 0, 1_000);
        let b = || path((10, 0), (10, 40), 0, 1_200);

        let mut set1 = set();
        assert!(set1.add(b()));
        assert!(set1.add(a()));
        assert_eq!(set1.len(), 1);
        assert_eq!(set1.list().next().unwrap().arrival_time(), t(10, 30));

        let mut set2 = set();
        assert!(set2.add(a()));
        assert!(!set2.add(b()));
        assert_eq!(set2.len(), 1);
    }

    #[test]
    fn incomparable_paths_kept_side_by_side() {
        let mut set = set();
        assert!(set.add(path((10, 0), (10, 40), 0, 1_000)));
        assert!(set.add(path((10, 0), (10, 30), 1, 1_000)));
        assert_eq!(set.len(), 2);

        // Insertion order preserved for ties.
        let arrivals: Vec<_> = set.list().map(|p| p.arrival_time()).collect();
        assert_eq!(arrivals, vec![t(10, 40), t(10, 30)]);
    }

    #[test]
    fn accepting_removes_all_dominated_members() {
        let mut set = set();
        assert!(set.add(path((10, 0), (10, 40), 2, 2_000)));
        assert!(set.add(path((10, 0), (10, 50), 1, 2_000)));
        // Dominates both members.
        assert!(set.add(path((10, 0), (10, 40), 1, 1_500)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejection_leaves_set_untouched() {
        let mut set = set();
        assert!(set.add(path((10, 0), (10, 30), 0, 1_000)));
        assert!(set.add(path((10, 0), (10, 25), 1, 1_000)));
        // Dominated by the first member; must not disturb the second.
        assert!(!set.add(path((10, 0), (10, 35), 0, 1_200)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn qualify_agrees_with_add() {
        let mut set = set();
        set.add(path((10, 0), (10, 30), 0, 1_000));

        let accepted = path((10, 0), (10, 25), 1, 1_000);
        let rejected = path((10, 0), (10, 35), 0, 1_200);

        assert!(set.qualify(&accepted.criteria()));
        assert!(!set.qualify(&rejected.criteria()));
        assert!(set.add(accepted));
        assert!(!set.add(rejected));
    }

    #[test]
    fn relaxed_cost_boundary_retained() {
        let relax = RelaxFunction::new(1.25, 300).unwrap();
        let mut set = ParetoPathSet::new(PathComparator::build(SearchCriteria {
            relax_c1: Some(relax),
            ..SearchCriteria::standard()
        }));

        // Reference cost 1000 -> bound 1550.
        assert!(set.add(path((10, 0), (10, 30), 0, 1_000)));
        assert!(set.qualify(&path((10, 0), (10, 30), 0, 1_550).criteria()));
        assert!(set.add(path((10, 0), (10, 30), 0, 1_550)));
        assert_eq!(set.len(), 2);

        // One past the bound is dominated outright.
        assert!(!set.qualify(&path((10, 0), (10, 30), 0, 1_551).criteria()));
        assert!(!set.add(path((10, 0), (10, 30), 0, 1_551)));
        assert_eq!(set.len(), 2);

        // Exact duplicates are still rejected even though the relaxed
        // comparator ties them with the resident member.
        assert!(!set.add(path((10, 0), (10, 30), 0, 1_550)));
        assert_eq!(set.len(), 2);

        let costs: Vec<_> = set.list().map(|p| p.generalized_cost()).collect();
        assert_eq!(costs, vec![1_000, 1_550]);
    }

    #[test]
    fn into_paths_returns_members() {
        let mut set = set();
        set.add(path((10, 0), (10, 40), 0, 1_000));
        set.add(path((10, 0), (10, 30), 1, 1_000));
        assert_eq!(set.into_paths().len(), 2);
    }
}
