use crate::base::{ConstraintKind, Dof};
use crate::StrError;
use gemlab::mesh::{Features, Mesh, PointId};
use std::collections::HashMap;
use std::fmt;

/// Defines the identifier of the rank owning a subdomain
pub type SubdomainId = usize;

/// Holds the rank-local view of one subdomain of the torn problem
///
/// A subdomain is a piece of the global mesh owned by exactly one rank. Its
/// boundary nodes may be geometrically coincident with boundary nodes owned
/// by other subdomains; those pairs become interface ties during
/// partitioning.
pub struct Subdomain<'a> {
    /// Identifier of the owning rank
    pub id: SubdomainId,

    /// The rank-local mesh
    pub mesh: &'a Mesh,

    /// Sorted ids of the boundary points
    pub boundary: Vec<PointId>,
}

impl<'a> Subdomain<'a> {
    /// Allocates a new instance, extracting the boundary points of the mesh
    pub fn new(id: SubdomainId, mesh: &'a Mesh) -> Result<Self, StrError> {
        if mesh.points.is_empty() {
            return Err("subdomain mesh has no points");
        }
        let features = Features::new(mesh, false); // boundary only
        let mut boundary: Vec<PointId> = features.points.iter().copied().collect();
        boundary.sort();
        Ok(Subdomain { id, mesh, boundary })
    }

    /// Returns the (sorted) ids of all nodes within a radius around a center
    pub fn nodes_within_radius(&self, center: &[f64], radius: f64) -> Vec<PointId> {
        self.mesh
            .points
            .iter()
            .filter(|point| distance(&point.coords, center) <= radius)
            .map(|point| point.id)
            .collect()
    }

    /// Returns the (sorted) ids of all nodes with `min ≤ coords[axis] ≤ max`
    pub fn nodes_in_coord_range(&self, axis: usize, min: f64, max: f64) -> Vec<PointId> {
        self.mesh
            .points
            .iter()
            .filter(|point| axis < point.coords.len() && point.coords[axis] >= min && point.coords[axis] <= max)
            .map(|point| point.id)
            .collect()
    }
}

/// Specifies a temporary support used to regularize one floating subdomain
///
/// Before the global coupling exists, a subdomain detached from all physical
/// supports has rigid-body modes and its local stiffness is singular. Each
/// entry pins the listed directions of the nodes found within `radius` of
/// `at`, making the local problem well-posed. These constraints are retracted
/// by the partitioner once the real constraints and interface ties are in
/// place; they never reach the assembled global system.
#[derive(Clone, Debug)]
pub struct VirtualSupport {
    /// Coordinates of the support location
    pub at: Vec<f64>,

    /// Search radius around the location
    pub radius: f64,

    /// Constrained directions
    pub dofs: Vec<Dof>,
}

/// Specifies a permanent physical support over a coordinate range
///
/// Applied to every node in range, in every subdomain, regardless of
/// ownership.
#[derive(Clone, Debug)]
pub struct RealSupport {
    /// Index of the coordinate axis defining the range (0 = x, 1 = y, 2 = z)
    pub axis: usize,

    /// Lower bound of the range
    pub min: f64,

    /// Upper bound of the range
    pub max: f64,

    /// Constrained directions
    pub dofs: Vec<Dof>,

    /// Prescribed value
    pub value: f64,
}

/// Holds one prescribed constraint of the decomposed problem
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    /// Identifier of the subdomain holding the node
    pub subdomain: SubdomainId,

    /// Id of the node in the subdomain mesh
    pub point: PointId,

    /// Constrained direction
    pub dof: Dof,

    /// Role of this constraint in the decomposed problem
    pub kind: ConstraintKind,

    /// Prescribed value
    pub value: f64,
}

/// Ties one DOF of two coincident boundary nodes of different subdomains
///
/// The tie is an equality coupling: both DOFs must assume the same value in
/// the assembled global problem. The endpoints are normalized so that `a`
/// belongs to the subdomain with the smaller id.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct InterfaceTie {
    /// (subdomain, point) on the side with the smaller subdomain id
    pub a: (SubdomainId, PointId),

    /// (subdomain, point) on the side with the larger subdomain id
    pub b: (SubdomainId, PointId),

    /// Tied direction
    pub dof: Dof,
}

/// Holds the global constraint system of the decomposed problem
///
/// Produced once at setup and referenced (read-only) by the external
/// assembler for the duration of a run. After construction, all virtual
/// constraints have been retracted: `constraints` holds only real (physical)
/// constraints and `ties` holds the interface couplings.
pub struct Partition {
    /// Real constraints of the assembled problem (sorted)
    pub constraints: Vec<Constraint>,

    /// Interface ties of the assembled problem (sorted)
    pub ties: Vec<InterfaceTie>,

    /// Number of virtual constraints applied and retracted during setup
    pub n_virtual_retracted: usize,
}

impl Partition {
    /// Builds the global constraint system from the rank-local inputs
    ///
    /// # Input
    ///
    /// * `subdomains` -- the rank-local subdomains (any order; the result is
    ///   invariant under reordering)
    /// * `virtual_supports` -- per-rank table of temporary supports removing
    ///   the rigid-body modes of each subdomain in isolation
    /// * `real_supports` -- the physical supports of the global problem
    /// * `tie_dofs` -- directions to couple at coincident interface nodes
    /// * `tol` -- tolerance to consider two boundary nodes coincident
    ///
    /// # Algorithm
    ///
    /// 1. Resolve the virtual supports of each subdomain in isolation
    /// 2. Match coincident boundary nodes across subdomain pairs and record
    ///    interface ties (ambiguous matches within `tol` are rejected)
    /// 3. Apply the real supports to every node in range, in every subdomain
    /// 4. Retract all virtual constraints and verify consistency
    ///
    /// A node carrying a real constraint on a tied direction is pinned, never
    /// coupled: the tie is dropped on both sides (an interface node is either
    /// coupled to a neighbor or pinned, not both).
    pub fn new(
        subdomains: &[Subdomain],
        virtual_supports: &HashMap<SubdomainId, Vec<VirtualSupport>>,
        real_supports: &[RealSupport],
        tie_dofs: &[Dof],
        tol: f64,
    ) -> Result<Self, StrError> {
        if subdomains.is_empty() {
            return Err("there are no subdomains");
        }
        if tol <= 0.0 {
            return Err("interface tolerance must be > 0.0");
        }

        // sort the subdomains by id so the result does not depend on input order
        let mut sorted: Vec<&Subdomain> = subdomains.iter().collect();
        sorted.sort_by_key(|sub| sub.id);
        for i in 1..sorted.len() {
            if sorted[i].id == sorted[i - 1].id {
                return Err("subdomain ids must be unique");
            }
        }
        let ndim = sorted[0].mesh.ndim;
        if sorted.iter().any(|sub| sub.mesh.ndim != ndim) {
            return Err("subdomains must share the space dimension");
        }

        // 1. virtual supports: each subdomain must become individually well-posed
        let mut virtuals: Vec<Constraint> = Vec::new();
        for sub in &sorted {
            if let Some(supports) = virtual_supports.get(&sub.id) {
                for support in supports {
                    let ids = sub.nodes_within_radius(&support.at, support.radius);
                    if ids.is_empty() {
                        return Err("virtual support does not match any node of the subdomain");
                    }
                    for id in &ids {
                        for dof in &support.dofs {
                            virtuals.push(Constraint {
                                subdomain: sub.id,
                                point: *id,
                                dof: *dof,
                                kind: ConstraintKind::Virtual,
                                value: 0.0,
                            });
                        }
                    }
                }
            }
        }

        // 2. match coincident boundary nodes across subdomain pairs
        let mut pairs: Vec<((SubdomainId, PointId), (SubdomainId, PointId))> = Vec::new();
        for i in 0..sorted.len() {
            for j in (i + 1)..sorted.len() {
                let (sub_a, sub_b) = (sorted[i], sorted[j]);
                let mut taken: HashMap<PointId, PointId> = HashMap::new(); // b-node → a-node
                for p in &sub_a.boundary {
                    let xa = &sub_a.mesh.points[*p].coords;
                    let mut found: Option<PointId> = None;
                    for q in &sub_b.boundary {
                        let xb = &sub_b.mesh.points[*q].coords;
                        if distance(xa, xb) <= tol {
                            if found.is_some() {
                                return Err("ambiguous interface node match within tolerance");
                            }
                            found = Some(*q);
                        }
                    }
                    if let Some(q) = found {
                        if taken.insert(q, *p).is_some() {
                            return Err("ambiguous interface node match within tolerance");
                        }
                        pairs.push(((sub_a.id, *p), (sub_b.id, q)));
                    }
                }
            }
        }

        // 3. real supports: applied to the nodes they target, in every subdomain
        let mut reals: HashMap<(SubdomainId, PointId, Dof), f64> = HashMap::new();
        for sub in &sorted {
            for support in real_supports {
                for id in sub.nodes_in_coord_range(support.axis, support.min, support.max) {
                    for dof in &support.dofs {
                        let key = (sub.id, id, *dof);
                        if let Some(existing) = reals.get(&key) {
                            if *existing != support.value {
                                return Err("node carries contradictory prescribed values");
                            }
                        }
                        reals.insert(key, support.value);
                    }
                }
            }
        }

        // real constraints take precedence: a pinned interface node is not coupled
        let mut ties: Vec<InterfaceTie> = Vec::new();
        for (a, b) in &pairs {
            for dof in tie_dofs {
                let pinned = reals.contains_key(&(a.0, a.1, *dof)) || reals.contains_key(&(b.0, b.1, *dof));
                if !pinned {
                    ties.push(InterfaceTie {
                        a: *a,
                        b: *b,
                        dof: *dof,
                    });
                }
            }
        }

        // 4. retract the virtual constraints
        let n_virtual_retracted = virtuals.len();
        virtuals.clear();

        // deterministic output ordering
        let mut constraints: Vec<Constraint> = reals
            .into_iter()
            .map(|((subdomain, point, dof), value)| Constraint {
                subdomain,
                point,
                dof,
                kind: ConstraintKind::Real,
                value,
            })
            .collect();
        constraints.sort_by_key(|c| (c.subdomain, c.point, c.dof));
        ties.sort();

        let partition = Partition {
            constraints,
            ties,
            n_virtual_retracted,
        };
        partition.verify()?;
        Ok(partition)
    }

    /// Verifies the consistency of the final constraint system
    ///
    /// Checks that no virtual constraint survived the retraction, that no DOF
    /// carries contradictory prescribed values, and that no tie endpoint is
    /// also pinned on the tied direction.
    pub fn verify(&self) -> Result<(), StrError> {
        let mut values: HashMap<(SubdomainId, PointId, Dof), f64> = HashMap::new();
        let mut reals: Vec<(SubdomainId, PointId, Dof)> = Vec::new();
        let mut virtuals: Vec<(SubdomainId, PointId, Dof)> = Vec::new();
        for c in &self.constraints {
            let key = (c.subdomain, c.point, c.dof);
            match c.kind {
                ConstraintKind::Real => reals.push(key),
                ConstraintKind::Virtual => virtuals.push(key),
                ConstraintKind::Interface => return Err("interface coupling must be a tie, not a constraint"),
            }
            if let Some(existing) = values.get(&key) {
                if *existing != c.value {
                    return Err("node carries contradictory prescribed values");
                }
            }
            values.insert(key, c.value);
        }
        for key in &virtuals {
            if reals.contains(key) {
                return Err("node has both a real and a virtual constraint on the same DOF");
            }
        }
        if !virtuals.is_empty() {
            return Err("a virtual constraint was not retracted");
        }
        for tie in &self.ties {
            let pinned_a = reals.contains(&(tie.a.0, tie.a.1, tie.dof));
            let pinned_b = reals.contains(&(tie.b.0, tie.b.1, tie.dof));
            if pinned_a || pinned_b {
                return Err("interface tie conflicts with a real constraint");
            }
        }
        Ok(())
    }
}

impl fmt::Display for Partition {
    /// Prints a summary of the global constraint system
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Partition summary\n").unwrap();
        write!(f, "=================\n").unwrap();
        write!(f, "real constraints = {}\n", self.constraints.len()).unwrap();
        write!(f, "interface ties = {}\n", self.ties.len()).unwrap();
        write!(f, "virtual constraints retracted = {}\n", self.n_virtual_retracted).unwrap();
        Ok(())
    }
}

/// Computes the Euclidean distance between two coordinate arrays
fn distance(a: &[f64], b: &[f64]) -> f64 {
    let ndim = usize::min(a.len(), b.len());
    let mut sum = 0.0;
    for i in 0..ndim {
        let delta = a[i] - b[i];
        sum += delta * delta;
    }
    f64::sqrt(sum)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
