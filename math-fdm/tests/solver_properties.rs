//! Behavioural properties shared by the whole solver family

mod common;

use common::{poisson_mg_system, poisson_system};
use math_fdm::blas::{l2_norm, residual};
use math_fdm::{
    CgConfig, FdmCgSolver, FdmGaussSeidelSolver, FdmIccgSolver, FdmJacobiSolver,
    FdmLinearSystem, FdmLinearSystemSolver, FdmMgLinearSystemSolver, FdmMgSolver,
    FdmMgpcgSolver, FdmVector, GaussSeidelConfig, JacobiConfig, MgParameters, MgSolverConfig,
    MgpcgConfig, Size3, SuccessPolicy,
};

/// 64x64 Laplacian, b = 1, MGPCG with tolerance 1e-5 and 50 iterations
#[test]
fn test_mgpcg_scenario_64x64() {
    let config = MgpcgConfig::new(50, 1e-5, MgParameters::default());
    let mut system = poisson_mg_system(Size3::new_2d(64, 64), &config.mg);
    system.b.levels[0].set(1.0);

    let mut solver = FdmMgpcgSolver::new(config);
    let solution = solver.solve_mg(&mut system).unwrap();

    assert!(solution.converged);
    assert!(solver.last_residual() <= 1e-5);
    assert!(solver.last_number_of_iterations() <= 50);

    // The reported residual tracks the true one
    let mut r = FdmVector::new(Size3::new_2d(64, 64));
    residual(
        &system.a.levels[0],
        &system.x.levels[0],
        &system.b.levels[0],
        &mut r,
    );
    assert!(l2_norm(&r) <= 1e-4);
}

#[test]
fn test_zero_rhs_gives_zero_solution_single_level() {
    let size = Size3::new_2d(16, 16);
    let mut solvers: Vec<Box<dyn FdmLinearSystemSolver>> = vec![
        Box::new(FdmJacobiSolver::new(JacobiConfig::default())),
        Box::new(FdmGaussSeidelSolver::new(GaussSeidelConfig::default())),
        Box::new(FdmGaussSeidelSolver::new(
            GaussSeidelConfig::default().with_sor(1.5).red_black(),
        )),
        Box::new(FdmCgSolver::new(CgConfig::default())),
        Box::new(FdmIccgSolver::new(CgConfig::default())),
    ];

    for solver in solvers.iter_mut() {
        let mut system = poisson_system(size);
        let solution = solver.solve(&mut system).unwrap();

        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.residual, 0.0);
        assert!(solution.converged);
        assert!(system.x.iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_zero_rhs_gives_zero_solution_multigrid() {
    let params = MgParameters::default();
    let size = Size3::new(8, 8, 8);

    let mut mg = FdmMgSolver::new(MgSolverConfig::default());
    let mut system = poisson_mg_system(size, &params);
    let solution = mg.solve_mg(&mut system).unwrap();
    assert_eq!(solution.iterations, 0);
    assert!(system.x.levels[0].iter().all(|&v| v == 0.0));

    let mut mgpcg = FdmMgpcgSolver::new(MgpcgConfig::default());
    let mut system = poisson_mg_system(size, &params);
    let solution = mgpcg.solve_mg(&mut system).unwrap();
    assert_eq!(solution.iterations, 0);
    assert!(system.x.levels[0].iter().all(|&v| v == 0.0));
}

#[test]
fn test_mgpcg_residual_non_increasing() {
    let config = MgpcgConfig::new(100, 1e-10, MgParameters::for_pressure());
    let mut system = poisson_mg_system(Size3::new_2d(64, 64), &config.mg);
    system.b.levels[0].set(1.0);

    let mut solver = FdmMgpcgSolver::new(config);
    let solution = solver.solve_mg(&mut system).unwrap();

    assert!(solution.converged);
    let history = &solution.residual_history;
    assert_eq!(history.len(), solution.iterations);
    for pair in history.windows(2) {
        assert!(
            pair[1] <= pair[0] * (1.0 + 1e-9),
            "residual increased: {:?}",
            history
        );
    }
}

#[test]
fn test_hierarchy_respects_level_budget() {
    for max_levels in 1..=8 {
        let params = MgParameters {
            max_number_of_levels: max_levels,
            ..MgParameters::default()
        };
        let system = poisson_mg_system(Size3::new_2d(64, 48), &params);

        assert!(system.number_of_levels() <= max_levels);
        assert!(system.validate().is_ok());
        for pair in system.a.levels.windows(2) {
            assert_eq!(pair[0].size().coarsened(), pair[1].size());
        }
    }
}

#[test]
fn test_permissive_policy_matches_legacy_rule() {
    let permissive = |max_iterations| CgConfig {
        success_policy: SuccessPolicy::Permissive,
        ..CgConfig::new(max_iterations, 1e-12)
    };

    // Budget exhausted above tolerance: failure under both policies
    let mut system = poisson_system(Size3::new_2d(32, 32));
    system.b.set(1.0);
    let solution = FdmCgSolver::new(permissive(5)).solve(&mut system).unwrap();
    assert_eq!(solution.iterations, 5);
    assert!(!solution.converged);

    // Stopped early above tolerance: success only under the permissive policy.
    // A zero operator makes CG stall on its first step.
    let mut stalled = FdmLinearSystem::new(Size3::new_2d(8, 8));
    stalled.b.set(1.0);

    let strict = FdmCgSolver::new(CgConfig::new(5, 1e-12))
        .solve(&mut stalled)
        .unwrap();
    assert!(strict.iterations < 5);
    assert!(strict.residual > 1e-12);
    assert!(!strict.converged);

    let solution = FdmCgSolver::new(permissive(5)).solve(&mut stalled).unwrap();
    assert!(solution.iterations < 5);
    assert!(solution.residual > 1e-12);
    assert!(solution.converged);
}

#[test]
fn test_solvers_are_reusable() {
    let mut solver = FdmMgpcgSolver::new(MgpcgConfig::new(50, 1e-8, MgParameters::default()));
    for n in [16, 32, 16] {
        let mut system = poisson_mg_system(Size3::new_2d(n, n), solver.params());
        system.b.levels[0].set(1.0);
        let solution = solver.solve_mg(&mut system).unwrap();
        assert!(solution.converged, "{n}x{n}: residual {}", solution.residual);
    }
}
