//! Multigrid preconditioner
//!
//! Applies one V-cycle from a zero initial guess, so M is a fixed linear
//! operator across CG iterations.

use crate::grid::FdmVector;
use crate::multigrid::{FdmMgMatrix, FdmMgVector, MgParameters, mg_v_cycle};
use crate::traits::Preconditioner;

/// Per-level scratch space of the multigrid preconditioner
#[derive(Debug, Clone, Default)]
pub struct MgWorkspace {
    pub x: FdmMgVector,
    pub b: FdmMgVector,
    pub buffer: FdmMgVector,
}

impl MgWorkspace {
    /// Workspace matching the levels of `a`
    pub fn new(a: &FdmMgMatrix) -> Self {
        let mut workspace = Self::default();
        workspace.resize(a);
        workspace
    }

    /// Match the levels of `a`, reusing storage where possible; all values become zero
    pub fn resize(&mut self, a: &FdmMgMatrix) {
        let resolutions = a.resolutions();
        self.x.resize_to(&resolutions);
        self.b.resize_to(&resolutions);
        self.buffer.resize_to(&resolutions);
    }
}

/// One V-cycle on a borrowed hierarchy as a CG preconditioner
#[derive(Debug)]
pub struct MgPreconditioner<'a> {
    a: &'a FdmMgMatrix,
    params: &'a MgParameters,
    workspace: &'a mut MgWorkspace,
}

impl<'a> MgPreconditioner<'a> {
    /// Wrap a hierarchy; `workspace` is resized to match it
    pub fn new(
        a: &'a FdmMgMatrix,
        params: &'a MgParameters,
        workspace: &'a mut MgWorkspace,
    ) -> Self {
        workspace.resize(a);
        Self {
            a,
            params,
            workspace,
        }
    }
}

impl Preconditioner for MgPreconditioner<'_> {
    fn solve(&mut self, b: &FdmVector, x: &mut FdmVector) {
        let ws = &mut *self.workspace;
        ws.b.levels[0].set_from(b);
        ws.x.levels[0].set(0.0);

        mg_v_cycle(self.a, self.params, &mut ws.x, &mut ws.b, &mut ws.buffer);

        x.set_from(&ws.x.levels[0]);
    }
}
