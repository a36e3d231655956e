//! Structure - the planar model container and solve driver

use std::collections::HashMap;
use std::time::Instant;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::elements::{Element, Material, MemberGeometry, MemberProps, Node, Section, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{
    DistributedLoad, LoadCase, LoadCombination, LoadDirection, NodalLoad, PointLoad,
    SupportDisplacement,
};
use crate::math::{self, FactorError, SparseMatrixBuilder, SymmetricSolver, Vec6};
use crate::numbering::{number_dofs, DofMap};
use crate::postprocess::PostProcessor;

/// Outcome of the most recent solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisStatus {
    /// No analysis has been run since the model last changed
    #[default]
    NotRun,
    /// The last solve completed and results are available
    Successful,
    /// The last solve failed; results are unavailable
    Failure,
}

/// Options for the linear solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Verify global equilibrium of reactions against applied loads
    pub check_statics: bool,
    /// Relative tolerance for the statics check
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_statics: false,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Enable the post-solve equilibrium check
    pub fn with_statics_check(mut self) -> Self {
        self.check_statics = true;
        self
    }
}

/// The planar finite element model
///
/// Owns nodes and elements by name, carries the selected load cases, and
/// after a successful [`solve`](Structure::solve) holds one displacement
/// vector per case for the [`PostProcessor`](crate::PostProcessor) to
/// read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    pub(crate) nodes: Vec<Node>,
    pub(crate) node_names: Vec<String>,
    pub(crate) node_index: HashMap<String, usize>,
    pub(crate) elements: Vec<Element>,
    pub(crate) element_names: Vec<String>,
    pub(crate) element_index: HashMap<String, usize>,
    /// Materials in the model
    pub materials: HashMap<String, Material>,
    /// Sections in the model
    pub sections: HashMap<String, Section>,
    pub(crate) load_cases: HashMap<String, LoadCase>,
    pub(crate) cases_to_run: Vec<String>,
    pub(crate) load_combos: HashMap<String, LoadCombination>,

    #[serde(skip)]
    pub(crate) dof_map: Option<DofMap>,
    #[serde(skip)]
    pub(crate) displacements: HashMap<String, DVector<f64>>,
    #[serde(skip)]
    pub(crate) status: AnalysisStatus,
}

impl Structure {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, name: &str, node: Node) -> FrameResult<()> {
        if self.node_index.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.node_index.insert(name.to_string(), self.nodes.len());
        self.node_names.push(name.to_string());
        self.nodes.push(node);
        self.invalidate();
        Ok(())
    }

    /// Add a material to the model
    pub fn add_material(&mut self, name: &str, material: Material) -> FrameResult<()> {
        if self.materials.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Add a section to the model
    pub fn add_section(&mut self, name: &str, section: Section) -> FrameResult<()> {
        if self.sections.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Add an element to the model
    ///
    /// Validates referenced nodes, material and section, and initializes
    /// the element's cached geometry. Initialization of an element that
    /// is already initialized is a no-op.
    pub fn add_element(&mut self, name: &str, element: impl Into<Element>) -> FrameResult<()> {
        if self.element_index.contains_key(name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }

        let element = element.into();
        self.element_index
            .insert(name.to_string(), self.elements.len());
        self.element_names.push(name.to_string());
        self.elements.push(element);

        let idx = self.elements.len() - 1;
        if let Err(e) = self.initialize_element(idx, false) {
            // Roll the registration back so a failed add leaves no trace
            self.elements.pop();
            self.element_names.pop();
            self.element_index.remove(name);
            return Err(e);
        }

        self.invalidate();
        Ok(())
    }

    /// Set the support conditions at a node
    pub fn add_support(&mut self, node_name: &str, support: Support) -> FrameResult<()> {
        let idx = self.node_idx(node_name)?;
        self.nodes[idx].support = Some(support);
        self.invalidate();
        Ok(())
    }

    /// Attach an elastic support with a full 3x3 global stiffness matrix
    pub fn add_node_spring(&mut self, node_name: &str, stiffness: [[f64; 3]; 3]) -> FrameResult<()> {
        let idx = self.node_idx(node_name)?;
        self.nodes[idx].spring = Some(stiffness);
        self.invalidate();
        Ok(())
    }

    /// Attach an elastic support with uncoupled stiffnesses per DOF
    pub fn add_node_spring_diagonal(
        &mut self,
        node_name: &str,
        kx: f64,
        ky: f64,
        kr: f64,
    ) -> FrameResult<()> {
        self.add_node_spring(
            node_name,
            [[kx, 0.0, 0.0], [0.0, ky, 0.0], [0.0, 0.0, kr]],
        )
    }

    /// Apply a load directly to a node
    pub fn add_node_load(&mut self, node_name: &str, load: NodalLoad) -> FrameResult<()> {
        let idx = self.node_idx(node_name)?;
        self.register_case(&load.case.clone());
        self.nodes[idx].loads.push(load);
        self.invalidate();
        Ok(())
    }

    /// Prescribe a support displacement at a node
    pub fn add_support_displacement(
        &mut self,
        node_name: &str,
        settlement: SupportDisplacement,
    ) -> FrameResult<()> {
        let idx = self.node_idx(node_name)?;
        self.register_case(&settlement.case.clone());
        self.nodes[idx].settlements.push(settlement);
        self.invalidate();
        Ok(())
    }

    /// Apply a concentrated load along a frame member
    pub fn add_member_point_load(
        &mut self,
        element_name: &str,
        load: PointLoad,
    ) -> FrameResult<()> {
        let idx = self.element_idx(element_name)?;
        let length = self.elements[idx].length().unwrap_or(0.0);
        if load.position < 0.0 || load.position > length {
            return Err(FrameError::InvalidInput(format!(
                "point load position {} outside member '{}' of length {}",
                load.position, element_name, length
            )));
        }

        if !matches!(self.elements[idx], Element::Frame(_)) {
            return Err(FrameError::InvalidInput(format!(
                "element '{}' cannot carry span loads",
                element_name
            )));
        }

        self.register_case(&load.case.clone());
        if let Element::Frame(member) = &mut self.elements[idx] {
            member.point_loads.push(load);
        }
        self.invalidate();
        Ok(())
    }

    /// Apply a distributed load along a frame member
    pub fn add_member_dist_load(
        &mut self,
        element_name: &str,
        load: DistributedLoad,
    ) -> FrameResult<()> {
        let idx = self.element_idx(element_name)?;
        let length = self.elements[idx].length().unwrap_or(0.0);
        if load.start < 0.0 || load.end_offset < 0.0 || load.start >= length - load.end_offset {
            return Err(FrameError::InvalidInput(format!(
                "distributed load span outside member '{}' of length {}",
                element_name, length
            )));
        }

        if !matches!(self.elements[idx], Element::Frame(_)) {
            return Err(FrameError::InvalidInput(format!(
                "element '{}' cannot carry span loads",
                element_name
            )));
        }

        self.register_case(&load.case.clone());
        if let Element::Frame(member) = &mut self.elements[idx] {
            member.dist_loads.push(load);
        }
        self.invalidate();
        Ok(())
    }

    /// Register a load case and select it for the next solve
    ///
    /// Adding a load under an unknown case name registers the case
    /// implicitly; this method upgrades the registration with an explicit
    /// kind.
    pub fn add_load_case(&mut self, case: LoadCase) {
        if !self.cases_to_run.contains(&case.name) {
            self.cases_to_run.push(case.name.clone());
        }
        self.load_cases.insert(case.name.clone(), case);
        self.invalidate();
    }

    /// Replace the set of load cases solved by [`solve`](Structure::solve)
    pub fn set_cases_to_run(&mut self, cases: Vec<String>) -> FrameResult<()> {
        for case in &cases {
            if !self.load_cases.contains_key(case) {
                return Err(FrameError::LoadCaseNotFound(case.clone()));
            }
        }
        self.cases_to_run = cases;
        self.invalidate();
        Ok(())
    }

    /// Add a load combination
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> FrameResult<()> {
        if self.load_combos.contains_key(&combo.name) {
            return Err(FrameError::DuplicateName(combo.name));
        }
        self.load_combos.insert(combo.name.clone(), combo);
        Ok(())
    }

    // ========================
    // Accessors
    // ========================

    /// Look up a node by name
    pub fn node(&self, name: &str) -> FrameResult<&Node> {
        self.node_idx(name).map(|idx| &self.nodes[idx])
    }

    /// Look up an element by name
    pub fn element(&self, name: &str) -> FrameResult<&Element> {
        self.element_idx(name).map(|idx| &self.elements[idx])
    }

    /// Look up a load combination by name
    pub fn combo(&self, name: &str) -> FrameResult<&LoadCombination> {
        self.load_combos
            .get(name)
            .ok_or_else(|| FrameError::LoadCombinationNotFound(name.to_string()))
    }

    /// Registered node names in insertion order
    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    /// Registered element names in insertion order
    pub fn element_names(&self) -> &[String] {
        &self.element_names
    }

    /// Load cases selected for the next solve
    pub fn cases_to_run(&self) -> &[String] {
        &self.cases_to_run
    }

    /// Outcome of the most recent solve
    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// Whether results are available
    pub fn is_analyzed(&self) -> bool {
        self.status == AnalysisStatus::Successful
    }

    /// Count of free DOFs (zero before a solve)
    pub fn n_free(&self) -> usize {
        self.dof_map.as_ref().map(|m| m.n_free).unwrap_or(0)
    }

    pub(crate) fn node_idx(&self, name: &str) -> FrameResult<usize> {
        self.node_index
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::NodeNotFound(name.to_string()))
    }

    pub(crate) fn element_idx(&self, name: &str) -> FrameResult<usize> {
        self.element_index
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::ElementNotFound(name.to_string()))
    }

    pub(crate) fn case_displacements(&self, case: &str) -> FrameResult<&DVector<f64>> {
        self.displacements
            .get(case)
            .ok_or_else(|| FrameError::LoadCaseNotFound(case.to_string()))
    }

    /// Global DOF numbers of an element's six end displacements
    pub(crate) fn element_dofs(&self, element: &Element) -> [usize; 6] {
        let i = self.node_index[element.i_node()];
        let j = self.node_index[element.j_node()];
        let di = self.nodes[i].dofs.unwrap();
        let dj = self.nodes[j].dofs.unwrap();
        [di[0], di[1], di[2], dj[0], dj[1], dj[2]]
    }

    // ========================
    // Analysis
    // ========================

    /// Run the linear solve with default options
    pub fn solve(&mut self) -> FrameResult<()> {
        self.solve_with(AnalysisOptions::default())
    }

    /// Run the linear solve
    ///
    /// Fails with [`FrameError::NoLoadCases`] when no load cases are
    /// selected and [`FrameError::Singular`] when neither factorization
    /// produces a usable solution. Any failure leaves the status at
    /// [`AnalysisStatus::Failure`].
    pub fn solve_with(&mut self, options: AnalysisOptions) -> FrameResult<()> {
        self.status = AnalysisStatus::NotRun;
        self.displacements.clear();

        match self.run_linear_analysis() {
            Ok(()) => {
                self.status = AnalysisStatus::Successful;
                if options.check_statics {
                    if let Err(e) = self.verify_statics(options.statics_tolerance) {
                        self.status = AnalysisStatus::Failure;
                        return Err(e);
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.status = AnalysisStatus::Failure;
                Err(e)
            }
        }
    }

    fn run_linear_analysis(&mut self) -> FrameResult<()> {
        if self.cases_to_run.is_empty() {
            return Err(FrameError::NoLoadCases);
        }

        self.prepare_model()?;

        let dof_map = self.dof_map.clone().unwrap();
        let n_free = dof_map.n_free;
        if n_free == 0 {
            return Err(FrameError::AnalysisFailed(
                "no free degrees of freedom".to_string(),
            ));
        }

        let started = Instant::now();
        tracing::info!(
            equations = n_free,
            cases = self.cases_to_run.len(),
            "starting linear solve"
        );

        // Assemble the free-free block and the free-restrained coupling
        let mut builder = SparseMatrixBuilder::new(n_free);
        let mut coupling: Vec<(usize, usize, f64)> = Vec::new();
        let mut diagonal = vec![0.0_f64; n_free];

        for element in &self.elements {
            let dofs = self.element_dofs(element);
            let t = element.transformation();
            let k_global = t.transpose() * element.local_stiffness() * t;
            scatter_block(
                n_free,
                &dofs,
                &|row, col| k_global[(row, col)],
                &mut builder,
                &mut coupling,
                &mut diagonal,
            );
        }

        for node in &self.nodes {
            if let Some(spring) = node.spring_matrix() {
                let dofs = node.dofs.unwrap();
                scatter_block(
                    n_free,
                    &dofs,
                    &|row, col| spring[(row, col)],
                    &mut builder,
                    &mut coupling,
                    &mut diagonal,
                );
            }
        }

        if diagonal.iter().any(|&d| d <= 0.0) {
            return Err(FrameError::Singular);
        }

        let stiffness = builder.to_csc();
        let solver = match SymmetricSolver::cholesky(&stiffness) {
            Ok(solver) => solver,
            Err(FactorError::NotPositiveDefinite) => {
                tracing::warn!("stiffness is not positive definite, retrying with sparse QR");
                SymmetricSolver::qr(&stiffness).map_err(|_| FrameError::Singular)?
            }
            Err(FactorError::Structural) => return Err(FrameError::Singular),
        };

        let cases = self.cases_to_run.clone();
        for case in &cases {
            let (mut rhs, prescribed) = self.build_load_vector(case, &dof_map);

            for &(row, col, value) in &coupling {
                rhs[row] -= value * prescribed[col];
            }

            let solution = solver.solve(&rhs);
            if solution.iter().any(|v| !v.is_finite()) {
                return Err(FrameError::Singular);
            }

            let mut full = DVector::zeros(dof_map.total());
            full.rows_mut(0, n_free).copy_from(&solution);
            full.rows_mut(n_free, prescribed.len()).copy_from(&prescribed);
            self.displacements.insert(case.clone(), full);
        }

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "linear solve finished"
        );

        Ok(())
    }

    /// Prepare the model for analysis: refresh cached element data,
    /// number DOFs and evaluate per-case fixed-end forces
    fn prepare_model(&mut self) -> FrameResult<()> {
        for idx in 0..self.elements.len() {
            self.initialize_element(idx, true)?;
        }

        let restraints: Vec<[bool; 3]> = self.nodes.iter().map(|n| n.restraints()).collect();
        let dof_map = number_dofs(&restraints);
        for (node, dofs) in self.nodes.iter_mut().zip(dof_map.node_dofs.iter()) {
            node.dofs = Some(*dofs);
        }
        self.dof_map = Some(dof_map);

        let cases = self.cases_to_run.clone();
        for idx in 0..self.elements.len() {
            let computed: Vec<(String, Vec6)> = {
                let element = &self.elements[idx];
                cases
                    .iter()
                    .map(|case| (case.clone(), element_fixed_end_forces(element, case)))
                    .collect()
            };
            for (case, fer) in computed {
                self.elements[idx].set_global_end_forces(&case, fer);
            }
        }

        Ok(())
    }

    fn initialize_element(&mut self, idx: usize, refresh: bool) -> FrameResult<()> {
        if self.elements[idx].is_initialized() && !refresh {
            return Ok(());
        }

        let element = &self.elements[idx];
        let i_idx = self.node_idx(element.i_node())?;
        let j_idx = self.node_idx(element.j_node())?;

        let i = &self.nodes[i_idx];
        let j = &self.nodes[j_idx];
        let dx = j.x - i.x;
        let dy = j.y - i.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length < 1e-10 {
            return Err(FrameError::InvalidGeometry(format!(
                "element has zero length: i={}, j={}",
                element.i_node(),
                element.j_node()
            )));
        }

        let geometry = MemberGeometry {
            length,
            cos: dx / length,
            sin: dy / length,
        };

        let props = match element.material() {
            Some(material_name) => {
                let material = self
                    .materials
                    .get(material_name)
                    .ok_or_else(|| FrameError::MaterialNotFound(material_name.to_string()))?;
                let section_name = element.section().unwrap();
                let section = self
                    .sections
                    .get(section_name)
                    .ok_or_else(|| FrameError::SectionNotFound(section_name.to_string()))?;

                if section.a <= 0.0 {
                    return Err(FrameError::InvalidInput(format!(
                        "section '{}' has non-positive area",
                        section_name
                    )));
                }
                if matches!(element, Element::Frame(_)) && section.i <= 0.0 {
                    return Err(FrameError::InvalidInput(format!(
                        "section '{}' has non-positive inertia",
                        section_name
                    )));
                }

                Some(MemberProps {
                    e: material.e,
                    a: section.a,
                    i: section.i,
                })
            }
            None => {
                if let Element::Spring(spring) = element {
                    if spring.stiffness <= 0.0 {
                        return Err(FrameError::InvalidInput(
                            "spring stiffness must be positive".to_string(),
                        ));
                    }
                }
                None
            }
        };

        self.elements[idx].set_geometry(geometry);
        if let Some(props) = props {
            self.elements[idx].set_props(props);
        }
        Ok(())
    }

    /// Assemble the equivalent nodal load vector for one load case
    ///
    /// Returns the free-partition right-hand side and the prescribed
    /// displacements of the restrained partition.
    fn build_load_vector(&self, case: &str, dof_map: &DofMap) -> (DVector<f64>, DVector<f64>) {
        let n_free = dof_map.n_free;
        let mut rhs = DVector::zeros(dof_map.total());

        for node in &self.nodes {
            let dofs = node.dofs.unwrap();
            for load in &node.loads {
                if load.case != case {
                    continue;
                }
                let v = nodal_load_global(node, load);
                for k in 0..3 {
                    rhs[dofs[k]] += v[k];
                }
            }
        }

        for element in &self.elements {
            let fer = element.global_end_forces(case);
            let dofs = self.element_dofs(element);
            for k in 0..6 {
                rhs[dofs[k]] -= fer[k];
            }
        }

        let mut prescribed = DVector::zeros(dof_map.total() - n_free);
        for node in &self.nodes {
            let dofs = node.dofs.unwrap();
            let restraints = node.restraints();
            for settlement in &node.settlements {
                if settlement.case != case {
                    continue;
                }
                let values = settlement.as_array();
                for k in 0..3 {
                    if restraints[k] && dofs[k] >= n_free {
                        prescribed[dofs[k] - n_free] += values[k];
                    }
                }
            }
        }

        (rhs.rows(0, n_free).into_owned(), prescribed)
    }

    /// Check that reactions balance applied loads in every solved case
    fn verify_statics(&self, tolerance: f64) -> FrameResult<()> {
        let post = PostProcessor::new(self)?;

        for case in &self.cases_to_run {
            let mut sum = [0.0_f64; 3];
            let mut scale = 1.0_f64;

            let mut accumulate = |fx: f64, fy: f64, mz: f64, x: f64, y: f64| {
                sum[0] += fx;
                sum[1] += fy;
                sum[2] += mz + x * fy - y * fx;
                scale = scale.max(fx.abs()).max(fy.abs()).max(mz.abs());
            };

            for node in &self.nodes {
                for load in &node.loads {
                    if load.case == *case {
                        let v = nodal_load_global(node, load);
                        accumulate(v[0], v[1], v[2], node.x, node.y);
                    }
                }
            }

            for element in &self.elements {
                let geometry = element.geometry().unwrap();
                let origin = &self.nodes[self.node_index[element.i_node()]];

                for load in element.point_loads() {
                    if load.case != *case {
                        continue;
                    }
                    let (gx, gy) = to_global(load.fx, load.fy, load.direction, &geometry);
                    let px = origin.x + geometry.cos * load.position;
                    let py = origin.y + geometry.sin * load.position;
                    accumulate(gx, gy, load.mz, px, py);
                }

                for load in element.dist_loads() {
                    if load.case != *case {
                        continue;
                    }
                    let a = load.start;
                    let b = geometry.length - load.end_offset;
                    // 3-point Gauss is exact for the linear-intensity integrand
                    for (point, weight) in [
                        (-0.7745966692414834, 0.5555555555555556),
                        (0.0, 0.8888888888888888),
                        (0.7745966692414834, 0.5555555555555556),
                    ] {
                        let jac = (b - a) / 2.0;
                        let x = (a + b) / 2.0 + point * jac;
                        let (wx, wy) = load.intensity_at(x, geometry.length);
                        let (gx, gy) = to_global(wx, wy, load.direction, &geometry);
                        let px = origin.x + geometry.cos * x;
                        let py = origin.y + geometry.sin * x;
                        accumulate(weight * jac * gx, weight * jac * gy, 0.0, px, py);
                    }
                }
            }

            for name in &self.node_names {
                let node = &self.nodes[self.node_index[name]];
                let reaction = post.support_reaction(name, case)?;
                accumulate(reaction.fx, reaction.fy, reaction.mz, node.x, node.y);
            }

            for component in sum {
                if component.abs() > tolerance * scale {
                    return Err(FrameError::AnalysisFailed(format!(
                        "static equilibrium violated for case '{}': residual {:e}",
                        case, component
                    )));
                }
            }
        }

        Ok(())
    }

    fn register_case(&mut self, case: &str) {
        if !self.load_cases.contains_key(case) {
            self.load_cases
                .insert(case.to_string(), LoadCase::new(case));
        }
        if !self.cases_to_run.contains(&case.to_string()) {
            self.cases_to_run.push(case.to_string());
        }
    }

    fn invalidate(&mut self) {
        self.status = AnalysisStatus::NotRun;
        self.displacements.clear();
        self.dof_map = None;
    }
}

/// Scatter a symmetric block into the free-free builder, recording the
/// free-restrained coupling and the free diagonal along the way
fn scatter_block(
    n_free: usize,
    dofs: &[usize],
    block: &dyn Fn(usize, usize) -> f64,
    builder: &mut SparseMatrixBuilder,
    coupling: &mut Vec<(usize, usize, f64)>,
    diagonal: &mut [f64],
) {
    for (row, &gi) in dofs.iter().enumerate() {
        if gi >= n_free {
            continue;
        }
        for (col, &gj) in dofs.iter().enumerate() {
            let value = block(row, col);
            if gj < n_free {
                if gi == gj {
                    diagonal[gi] += value;
                }
                builder.add(gi, gj, value);
            } else if value.abs() > 1e-15 {
                coupling.push((gi, gj - n_free, value));
            }
        }
    }
}

/// A nodal load expressed in global components
pub(crate) fn nodal_load_global(node: &Node, load: &NodalLoad) -> crate::math::Vec3 {
    match load.direction {
        LoadDirection::Global => load.as_vector(),
        LoadDirection::Local => node.transformation().transpose() * load.as_vector(),
    }
}

fn to_global(fx: f64, fy: f64, direction: LoadDirection, geometry: &MemberGeometry) -> (f64, f64) {
    match direction {
        LoadDirection::Global => (fx, fy),
        LoadDirection::Local => geometry.to_global(fx, fy),
    }
}

/// Sum the global fixed-end forces of an element's span loads for a case
///
/// Span loads are converted to member-local components, integrated with
/// the fully fixed formulas, condensed for end releases and rotated to
/// global.
fn element_fixed_end_forces(element: &Element, case: &str) -> Vec6 {
    let geometry = match element.geometry() {
        Some(geometry) => geometry,
        None => return Vec6::zeros(),
    };
    let length = geometry.length;

    let mut fer = Vec6::zeros();

    for load in element.point_loads() {
        if load.case != case {
            continue;
        }
        let (fx, fy) = to_local(load.fx, load.fy, load.direction, &geometry);
        fer += math::fer_point_load(fx, fy, load.mz, load.position, length);
    }

    for load in element.dist_loads() {
        if load.case != case {
            continue;
        }
        let (wx1, wy1) = to_local(load.wx1, load.wy1, load.direction, &geometry);
        let (wx2, wy2) = to_local(load.wx2, load.wy2, load.direction, &geometry);
        fer += math::fer_linear_load(
            wx1,
            wy1,
            wx2,
            wy2,
            load.start,
            length - load.end_offset,
            length,
        );
    }

    if fer == Vec6::zeros() {
        return fer;
    }

    if let Some(releases) = element.releases() {
        if releases.any() {
            let k = element.unreleased_local_stiffness();
            fer = math::apply_fer_releases(&fer, &k, &releases.as_array());
        }
    }

    element.transformation().transpose() * fer
}

fn to_local(fx: f64, fy: f64, direction: LoadDirection, geometry: &MemberGeometry) -> (f64, f64) {
    match direction {
        LoadDirection::Local => (fx, fy),
        LoadDirection::Global => geometry.to_local(fx, fy),
    }
}
