//! Multi-criteria dominance model and Pareto path collection.
//!
//! One comparator is composed per request from the active criteria
//! (arrival time, transfers, duration, generalized cost, optional
//! relaxed-cost and secondary-cost rules); `ParetoPathSet` uses it to
//! keep only mutually non-dominated itineraries.

mod comparator;
mod relax;
mod set;

pub use comparator::{
    CostDominance, ParetoRelation, PathComparator, SearchCriteria, SearchDirection,
};
pub use relax::RelaxFunction;
pub use set::ParetoPathSet;
