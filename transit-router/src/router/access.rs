//! Access and egress gathering.
//!
//! The two street searches are independent and run concurrently; both
//! complete before either error is surfaced, so a partial result is
//! never used. Gathered edges pass through a cost floor keeping street
//! travel from undercutting an equivalent all-transit alternative.

use std::fmt;

use crate::domain::{
    AccessEgress, Cost, InputField, RoutingError, RoutingErrorCode, RoutingErrorEntry,
};

use super::providers::AccessEgressRouter;
use super::request::{RouteRequest, RouterConfig};

/// Which end of the plan a street search serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDirection {
    Access,
    Egress,
}

impl fmt::Display for AccessDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDirection::Access => write!(f, "access"),
            AccessDirection::Egress => write!(f, "egress"),
        }
    }
}

/// Scope guard for temporary street-network vertices.
///
/// Off-graph endpoints are linked to the network for the duration of
/// one request; dropping the guard removes the links again, also on
/// early returns and panics.
pub struct TemporaryVertices {
    cleanup: Option<Box<dyn FnOnce() + Send>>,
}

impl TemporaryVertices {
    pub fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Guard for requests that created no temporary vertices.
    pub fn none() -> Self {
        Self { cleanup: None }
    }
}

impl Drop for TemporaryVertices {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl fmt::Debug for TemporaryVertices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryVertices")
            .field("armed", &self.cleanup.is_some())
            .finish()
    }
}

/// Gather access and egress edges concurrently.
///
/// # Errors
///
/// Street-search failures are re-raised after both searches complete.
/// An empty side is a validation error tagged with the offending place;
/// both sides empty produce both entries in one error.
pub async fn gather<A: AccessEgressRouter>(
    street: &A,
    request: &RouteRequest,
    config: &RouterConfig,
) -> Result<(Vec<AccessEgress>, Vec<AccessEgress>), RoutingError> {
    let access_search = street.street_search(
        &request.from,
        AccessDirection::Access,
        request.access_mode,
        request.max_access_duration(),
    );
    let egress_search = street.street_search(
        &request.to,
        AccessDirection::Egress,
        request.egress_mode,
        request.max_egress_duration(),
    );
    let (access, egress) = futures::join!(access_search, egress_search);
    let (mut access, mut egress) = (access?, egress?);

    apply_cost_floor(&mut access, config.street_cost_floor_per_second);
    apply_cost_floor(&mut egress, config.street_cost_floor_per_second);

    let mut missing = Vec::new();
    if access.is_empty() {
        missing.push(RoutingErrorEntry {
            code: RoutingErrorCode::NoStopsInRange,
            field: InputField::FromPlace,
        });
    }
    if egress.is_empty() {
        missing.push(RoutingErrorEntry {
            code: RoutingErrorCode::NoStopsInRange,
            field: InputField::ToPlace,
        });
    }
    if !missing.is_empty() {
        return Err(RoutingError::Validation(missing));
    }

    tracing::debug!(
        access = access.len(),
        egress = egress.len(),
        "gathered street edges"
    );
    Ok((access, egress))
}

/// Raise each edge's cost to at least `floor` per second of travel.
fn apply_cost_floor(edges: &mut [AccessEgress], floor: Cost) {
    for edge in edges {
        let floor_cost = edge.duration_in_seconds() * floor;
        if edge.generalized_cost() < floor_cost {
            edge.set_generalized_cost(floor_cost);
        }
    }
}
