use fracsim::prelude::*;
use fracsim::StrError;
use gemlab::mesh::{Mesh, Samples};
use std::collections::HashMap;

// Constraint partitioning of a chain of three subdomains
//
// Three unit squares in a row, each owned by one rank. The structure is fixed
// at its left boundary; the neighbors share the vertical lines x = 1 and
// x = 2 where coincident nodes must be tied. Each rank also declares the
// virtual supports that make its square solvable in isolation; these must all
// be retracted once the real constraints and ties exist.
//
//  3--------2  3--------2  3--------2
//  |        |  |        |  |        |
//  | rank 0 |  | rank 1 |  | rank 2 |
//  |        |  |        |  |        |
//  0--------1  0--------1  0--------1
//  x=0    x=1  x=1    x=2  x=2    x=3
//  fixed       shared       shared

const TOL: f64 = 1e-6;

fn square_at(x_shift: f64) -> Mesh {
    let mut mesh = Samples::one_qua4();
    for point in &mut mesh.points {
        point.coords[0] += x_shift;
    }
    mesh
}

/// Virtual supports pinning a square at its two right corners
fn right_corner_supports(x: f64) -> Vec<VirtualSupport> {
    vec![
        VirtualSupport {
            at: vec![x, 0.0],
            radius: TOL,
            dofs: vec![Dof::Ux, Dof::Uy],
        },
        VirtualSupport {
            at: vec![x, 1.0],
            radius: TOL,
            dofs: vec![Dof::Ux],
        },
    ]
}

fn build(order: &[SubdomainId]) -> Result<Partition, StrError> {
    let meshes = [square_at(0.0), square_at(1.0), square_at(2.0)];
    let subdomains: Vec<Subdomain> = order
        .iter()
        .map(|id| Subdomain::new(*id, &meshes[*id]))
        .collect::<Result<_, _>>()?;

    // per-rank table of virtual supports (data-driven, one entry per rank)
    let mut virtual_supports = HashMap::new();
    virtual_supports.insert(0, right_corner_supports(1.0));
    virtual_supports.insert(1, right_corner_supports(2.0));
    virtual_supports.insert(2, right_corner_supports(3.0));

    // the global structure is fixed at x = 0
    let real_supports = vec![RealSupport {
        axis: 0,
        min: -TOL,
        max: TOL,
        dofs: vec![Dof::Ux, Dof::Uy],
        value: 0.0,
    }];

    Partition::new(&subdomains, &virtual_supports, &real_supports, &[Dof::Ux, Dof::Uy], TOL)
}

#[test]
fn test_partition_chain_of_subdomains() -> Result<(), StrError> {
    let partition = build(&[0, 1, 2])?;

    // no DOF survived with a virtual constraint; values are consistent
    partition.verify()?;
    assert_eq!(partition.n_virtual_retracted, 9); // 3 ranks × (2 + 1) DOFs
    assert!(partition
        .constraints
        .iter()
        .all(|c| c.kind == ConstraintKind::Real));

    // only rank 0 owns nodes at x = 0: two nodes × two DOFs
    assert_eq!(partition.constraints.len(), 4);
    assert!(partition.constraints.iter().all(|c| c.subdomain == 0 && c.value == 0.0));

    // two shared lines × two node pairs × two DOFs
    assert_eq!(partition.ties.len(), 8);
    let pairs_01 = partition.ties.iter().filter(|t| t.a.0 == 0 && t.b.0 == 1).count();
    let pairs_12 = partition.ties.iter().filter(|t| t.a.0 == 1 && t.b.0 == 2).count();
    assert_eq!(pairs_01, 4);
    assert_eq!(pairs_12, 4);
    Ok(())
}

#[test]
fn test_partition_is_independent_of_rank_order() -> Result<(), StrError> {
    let reference = build(&[0, 1, 2])?;
    for order in [[2, 1, 0], [1, 0, 2], [2, 0, 1]] {
        let permuted = build(&order)?;
        assert_eq!(permuted.constraints, reference.constraints);
        assert_eq!(permuted.ties, reference.ties);
        assert_eq!(permuted.n_virtual_retracted, reference.n_virtual_retracted);
    }
    Ok(())
}

#[test]
fn test_pinned_interface_nodes_are_not_tied() -> Result<(), StrError> {
    let meshes = [square_at(0.0), square_at(1.0)];
    let subdomains = [Subdomain::new(0, &meshes[0])?, Subdomain::new(1, &meshes[1])?];

    // pin the whole bottom edge (y = 0), which crosses the shared line x = 1
    let real_supports = vec![RealSupport {
        axis: 1,
        min: -TOL,
        max: TOL,
        dofs: vec![Dof::Ux, Dof::Uy],
        value: 0.0,
    }];

    let partition = Partition::new(
        &subdomains,
        &HashMap::new(),
        &real_supports,
        &[Dof::Ux, Dof::Uy],
        TOL,
    )?;
    partition.verify()?;

    // bottom nodes of both squares: 2 nodes × 2 DOFs × 2 subdomains
    assert_eq!(partition.constraints.len(), 8);

    // the shared pair at (1,0) is pinned, so only the pair at (1,1) is tied
    assert_eq!(partition.ties.len(), 2);
    assert!(partition.ties.iter().all(|tie| {
        let a = &meshes[0].points[tie.a.1].coords;
        a[0] == 1.0 && a[1] == 1.0
    }));
    Ok(())
}
