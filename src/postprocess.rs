//! Post-processing of a solved model
//!
//! All queries are read-only over the frozen solve state: nodal
//! displacements and reactions, member end forces, and the distributed
//! internal force/displacement diagrams along each member.

use crate::elements::Element;
use crate::error::{FrameError, FrameResult};
use crate::math::{Vec3, Vec6};
use crate::model::{nodal_load_global, AnalysisStatus, Structure};
use crate::results::{
    AnalysisSummary, Displacement, InternalForces, MemberEndForces, MeshSegment, Reaction,
};

/// Tolerance for merging and locating segment boundaries
const STATION_TOL: f64 = 1e-9;

/// A span load resolved into member-local components for one case
enum LocalLoad {
    Point {
        fx: f64,
        fy: f64,
        mz: f64,
        position: f64,
    },
    Linear {
        wx1: f64,
        wy1: f64,
        wx2: f64,
        wy2: f64,
        start: f64,
        end: f64,
    },
}

/// Read-only result queries over a successfully solved [`Structure`]
pub struct PostProcessor<'a> {
    model: &'a Structure,
}

impl<'a> PostProcessor<'a> {
    /// Create a post-processor for a solved model
    ///
    /// Fails with [`FrameError::NotAnalyzed`] unless the most recent
    /// solve completed successfully.
    pub fn new(model: &'a Structure) -> FrameResult<Self> {
        if model.status() != AnalysisStatus::Successful {
            return Err(FrameError::NotAnalyzed);
        }
        Ok(Self { model })
    }

    // ========================
    // Nodal results
    // ========================

    /// Global displacement of a node for a load case
    ///
    /// Free DOFs read the solved vector; restrained DOFs carry the summed
    /// prescribed support displacements of the case.
    pub fn node_displacement(&self, node_name: &str, case: &str) -> FrameResult<Displacement> {
        let idx = self.model.node_idx(node_name)?;
        Ok(Displacement::from_vector(
            self.node_displacement_vector(idx, case)?,
        ))
    }

    /// Global displacement of a node for a load combination
    pub fn node_displacement_combo(
        &self,
        node_name: &str,
        combo_name: &str,
    ) -> FrameResult<Displacement> {
        let combo = self.model.combo(combo_name)?.clone();
        let mut total = Displacement::default();
        for (case, factor) in &combo.factors {
            if factor.abs() < 1e-10 {
                continue;
            }
            total = total + self.node_displacement(node_name, case)?.scaled(*factor);
        }
        Ok(total)
    }

    /// Support reaction at a node for a load case
    ///
    /// Elastic-spring nodes report `-K_spring * d` directly. Otherwise
    /// the reaction collects the incident members' global end forces and
    /// removes applied nodal loads; components at unrestrained DOFs are
    /// zeroed so symbolic zeros cannot surface as float dust.
    pub fn support_reaction(&self, node_name: &str, case: &str) -> FrameResult<Reaction> {
        let idx = self.model.node_idx(node_name)?;
        let node = &self.model.nodes[idx];
        let d = self.node_displacement_vector(idx, case)?;

        if let Some(spring) = node.spring_matrix() {
            return Ok(Reaction::from_vector(-spring * d));
        }

        let mut r = Vec3::zeros();

        for load in &node.loads {
            if load.case == case {
                r -= nodal_load_global(node, load);
            }
        }

        for element in &self.model.elements {
            let end = if element.i_node() == node_name {
                0
            } else if element.j_node() == node_name {
                3
            } else {
                continue;
            };
            let q = self.element_global_force_vector(element, case)?;
            for k in 0..3 {
                r[k] += q[end + k];
            }
        }

        let restraints = node.restraints();
        Ok(Reaction::new(
            if restraints[0] { r[0] } else { 0.0 },
            if restraints[1] { r[1] } else { 0.0 },
            if restraints[2] { r[2] } else { 0.0 },
        ))
    }

    /// Support reaction at a node for a load combination
    pub fn support_reaction_combo(
        &self,
        node_name: &str,
        combo_name: &str,
    ) -> FrameResult<Reaction> {
        let combo = self.model.combo(combo_name)?.clone();
        let mut total = Reaction::default();
        for (case, factor) in &combo.factors {
            if factor.abs() < 1e-10 {
                continue;
            }
            total = total + self.support_reaction(node_name, case)?.scaled(*factor);
        }
        Ok(total)
    }

    // ========================
    // Member end forces
    // ========================

    /// Member end forces in local coordinates: Q = K_l d_l + T f_g
    pub fn element_local_end_forces(
        &self,
        element_name: &str,
        case: &str,
    ) -> FrameResult<MemberEndForces> {
        let idx = self.model.element_idx(element_name)?;
        let q = self.element_local_force_vector(&self.model.elements[idx], case)?;
        Ok(MemberEndForces::from_vector(q))
    }

    /// Member end forces rotated into global coordinates
    pub fn element_global_end_forces(
        &self,
        element_name: &str,
        case: &str,
    ) -> FrameResult<MemberEndForces> {
        let idx = self.model.element_idx(element_name)?;
        let q = self.element_global_force_vector(&self.model.elements[idx], case)?;
        Ok(MemberEndForces::from_vector(q))
    }

    // ========================
    // Diagrams
    // ========================

    /// Internal force and displacement diagram of a member for one case
    ///
    /// The returned segments partition [0, length], split at every load
    /// boundary of the case, each carrying closed-form start/end states
    /// and the net distributed intensities across it.
    pub fn element_internal_forces(
        &self,
        element_name: &str,
        case: &str,
    ) -> FrameResult<Vec<MeshSegment>> {
        let idx = self.model.element_idx(element_name)?;
        self.element_segments(&self.model.elements[idx], case)
    }

    /// Internal force and displacement diagram for a load combination
    pub fn element_internal_forces_combo(
        &self,
        element_name: &str,
        combo_name: &str,
    ) -> FrameResult<Vec<MeshSegment>> {
        let combo = self.model.combo(combo_name)?.clone();
        let idx = self.model.element_idx(element_name)?;
        let element = &self.model.elements[idx];

        let mut case_results: Vec<(f64, Vec<MeshSegment>)> = Vec::new();
        let mut combined_local = Vec6::zeros();
        for (case, factor) in &combo.factors {
            if factor.abs() < 1e-10 {
                continue;
            }
            case_results.push((*factor, self.element_segments(element, case)?));
            if element.has_releases() {
                let t = element.transformation();
                combined_local += *factor * (t * self.element_displacement_vector(element, case)?);
            }
        }

        let mut points: Vec<f64> = case_results
            .iter()
            .flat_map(|(_, segments)| segments.iter().flat_map(|s| [s.x1, s.x2]))
            .collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points.dedup_by(|a, b| (*a - *b).abs() < STATION_TOL);

        let (e, a, i) = element_section_constants(element);
        let mut segments = Vec::with_capacity(points.len().saturating_sub(1));

        for window in points.windows(2) {
            let (x1, x2) = (window[0], window[1]);
            if x2 - x1 < STATION_TOL {
                continue;
            }
            let mut segment = MeshSegment::new(x1, x2, e, a, i);

            for (factor, case_segments) in &case_results {
                let mid = (x1 + x2) / 2.0;
                let source = match case_segments.iter().find(|s| s.contains(mid)) {
                    Some(source) => source,
                    None => continue,
                };
                let h = source.length();
                let o1 = (x1 - source.x1).clamp(0.0, h);
                let o2 = (x2 - source.x1).clamp(0.0, h);

                segment.forces_1 = segment.forces_1 + source.internal_force_at(o1).scaled(*factor);
                segment.forces_2 = segment.forces_2 + source.internal_force_at(o2).scaled(*factor);
                segment.displacement_1 =
                    segment.displacement_1 + source.displacement_at(o1).scaled(*factor);
                segment.displacement_2 =
                    segment.displacement_2 + source.displacement_at(o2).scaled(*factor);

                let intensity = |w1: f64, w2: f64, offset: f64| {
                    if h > 0.0 {
                        w1 + (w2 - w1) * offset / h
                    } else {
                        w1
                    }
                };
                segment.wx1 += factor * intensity(source.wx1, source.wx2, o1);
                segment.wx2 += factor * intensity(source.wx1, source.wx2, o2);
                segment.wy1 += factor * intensity(source.wy1, source.wy2, o1);
                segment.wy2 += factor * intensity(source.wy1, source.wy2, o2);
            }

            if element.has_releases() {
                segment.displacement_1 = shape_displacement(element, x1, &combined_local);
                segment.displacement_2 = shape_displacement(element, x2, &combined_local);
            }

            segments.push(segment);
        }

        Ok(segments)
    }

    /// Internal forces at station `x` along a member, `None` out of range
    pub fn element_internal_forces_at(
        &self,
        element_name: &str,
        case: &str,
        x: f64,
    ) -> FrameResult<Option<InternalForces>> {
        let idx = self.model.element_idx(element_name)?;
        let element = &self.model.elements[idx];
        if !station_in_range(element, x) {
            return Ok(None);
        }

        let segments = self.element_segments(element, case)?;
        Ok(evaluate_forces(&segments, x))
    }

    /// Internal forces at station `x` for a load combination
    pub fn element_internal_forces_at_combo(
        &self,
        element_name: &str,
        combo_name: &str,
        x: f64,
    ) -> FrameResult<Option<InternalForces>> {
        let combo = self.model.combo(combo_name)?.clone();
        let idx = self.model.element_idx(element_name)?;
        let element = &self.model.elements[idx];
        if !station_in_range(element, x) {
            return Ok(None);
        }

        let mut total = InternalForces::default();
        for (case, factor) in &combo.factors {
            if factor.abs() < 1e-10 {
                continue;
            }
            let segments = self.element_segments(element, case)?;
            match evaluate_forces(&segments, x) {
                Some(forces) => total = total + forces.scaled(*factor),
                None => return Ok(None),
            }
        }
        Ok(Some(total))
    }

    /// Displacements at station `x` along a member, `None` out of range
    ///
    /// Members with end releases evaluate the shape-function
    /// interpolation of the end displacements instead of the segment
    /// polynomials.
    pub fn element_displacement_at(
        &self,
        element_name: &str,
        case: &str,
        x: f64,
    ) -> FrameResult<Option<Displacement>> {
        let idx = self.model.element_idx(element_name)?;
        let element = &self.model.elements[idx];
        if !station_in_range(element, x) {
            return Ok(None);
        }

        if element.has_releases() {
            let t = element.transformation();
            let local = t * self.element_displacement_vector(element, case)?;
            return Ok(Some(shape_displacement(element, x, &local)));
        }

        let segments = self.element_segments(element, case)?;
        Ok(evaluate_displacement(&segments, x))
    }

    /// Displacements at station `x` for a load combination
    pub fn element_displacement_at_combo(
        &self,
        element_name: &str,
        combo_name: &str,
        x: f64,
    ) -> FrameResult<Option<Displacement>> {
        let combo = self.model.combo(combo_name)?.clone();
        let idx = self.model.element_idx(element_name)?;
        let element = &self.model.elements[idx];
        if !station_in_range(element, x) {
            return Ok(None);
        }

        if element.has_releases() {
            let t = element.transformation();
            let mut combined = Vec6::zeros();
            for (case, factor) in &combo.factors {
                if factor.abs() < 1e-10 {
                    continue;
                }
                combined += *factor * (t * self.element_displacement_vector(element, case)?);
            }
            return Ok(Some(shape_displacement(element, x, &combined)));
        }

        let mut total = Displacement::default();
        for (case, factor) in &combo.factors {
            if factor.abs() < 1e-10 {
                continue;
            }
            let segments = self.element_segments(element, case)?;
            match evaluate_displacement(&segments, x) {
                Some(displacement) => total = total + displacement.scaled(*factor),
                None => return Ok(None),
            }
        }
        Ok(Some(total))
    }

    /// Extreme absolute internal forces over a member for one case
    ///
    /// Axial and shear extremes occur at segment ends; the moment extreme
    /// additionally checks interior stations where the shear crosses
    /// zero.
    pub fn element_max_forces(
        &self,
        element_name: &str,
        case: &str,
    ) -> FrameResult<InternalForces> {
        let segments = self.element_internal_forces(element_name, case)?;
        let mut max = InternalForces::default();

        for segment in &segments {
            let mut consider = |forces: InternalForces| {
                max.fx = max.fx.max(forces.fx.abs());
                max.fy = max.fy.max(forces.fy.abs());
                max.mz = max.mz.max(forces.mz.abs());
            };

            consider(segment.forces_1);
            consider(segment.forces_2);

            for root in shear_zero_crossings(segment) {
                consider(segment.internal_force_at(root));
            }
        }

        Ok(max)
    }

    /// Result summary for one load case
    pub fn summary(&self, case: &str) -> FrameResult<AnalysisSummary> {
        let mut summary = AnalysisSummary {
            num_nodes: self.model.nodes.len(),
            num_elements: self.model.elements.len(),
            total_dofs: self.model.nodes.len() * 3,
            free_dofs: self.model.n_free(),
            ..Default::default()
        };

        for name in self.model.node_names() {
            let displacement = self.node_displacement(name, case)?;
            let magnitude = displacement.translation_magnitude();
            if magnitude > summary.max_displacement {
                summary.max_displacement = magnitude;
                summary.max_displacement_node = name.clone();
            }

            let reaction = self.support_reaction(name, case)?;
            let magnitude = reaction.force_magnitude();
            if magnitude > summary.max_reaction {
                summary.max_reaction = magnitude;
                summary.max_reaction_node = name.clone();
            }
        }

        Ok(summary)
    }

    // ========================
    // Shared helpers
    // ========================

    fn node_displacement_vector(&self, node_idx: usize, case: &str) -> FrameResult<Vec3> {
        let d = self.model.case_displacements(case)?;
        let dofs = self.model.nodes[node_idx].dofs.unwrap();
        Ok(Vec3::new(d[dofs[0]], d[dofs[1]], d[dofs[2]]))
    }

    /// Global end displacement vector of an element
    fn element_displacement_vector(&self, element: &Element, case: &str) -> FrameResult<Vec6> {
        let d = self.model.case_displacements(case)?;
        let dofs = self.model.element_dofs(element);
        Ok(Vec6::from_fn(|k, _| d[dofs[k]]))
    }

    /// Local end forces Q = K_l d_l + T f_g
    fn element_local_force_vector(&self, element: &Element, case: &str) -> FrameResult<Vec6> {
        let t = element.transformation();
        let d_local = t * self.element_displacement_vector(element, case)?;
        Ok(element.local_stiffness() * d_local + t * element.global_end_forces(case))
    }

    fn element_global_force_vector(&self, element: &Element, case: &str) -> FrameResult<Vec6> {
        let q = self.element_local_force_vector(element, case)?;
        Ok(element.transformation().transpose() * q)
    }

    /// Build the per-case mesh segments of an element
    ///
    /// Walks the member left to right, carrying the cumulative effect of
    /// loads at or left of each segment start into its start state, then
    /// closing the segment with its own polynomial evaluation.
    fn element_segments(&self, element: &Element, case: &str) -> FrameResult<Vec<MeshSegment>> {
        let geometry = element.geometry().unwrap();
        let length = geometry.length;
        let t = element.transformation();
        let d_local = t * self.element_displacement_vector(element, case)?;
        let fl = element.local_stiffness() * d_local + t * element.global_end_forces(case);
        let (e, a, i) = element_section_constants(element);

        if !matches!(element, Element::Frame(_)) {
            // Axial members carry no span loads: a single segment with
            // end states straight from the end forces and displacements
            let mut segment = MeshSegment::new(0.0, length, e, a, 0.0);
            segment.forces_1 = InternalForces::new(fl[0], fl[1], fl[2]);
            segment.forces_2 = segment.internal_force_at(length);
            segment.displacement_1 = Displacement::new(d_local[0], d_local[1], d_local[2]);
            segment.displacement_2 = Displacement::new(d_local[3], d_local[4], d_local[5]);
            return Ok(vec![segment]);
        }

        let loads = localized_loads(element, case, &geometry);
        let shape_override = element.has_releases();

        let mut points = vec![0.0, length];
        for load in &loads {
            match load {
                LocalLoad::Point { position, .. } => points.push(*position),
                LocalLoad::Linear { start, end, .. } => {
                    points.push(*start);
                    points.push(*end);
                }
            }
        }
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points.dedup_by(|a, b| (*a - *b).abs() < STATION_TOL);

        let mut segments: Vec<MeshSegment> = Vec::with_capacity(points.len() - 1);

        for window in points.windows(2) {
            let (x1, x2) = (window[0], window[1]);
            if x2 - x1 < STATION_TOL {
                continue;
            }
            let mut segment = MeshSegment::new(x1, x2, e, a, i);

            // Start displacements continue the previous segment's field
            segment.displacement_1 = match segments.last() {
                None => Displacement::new(d_local[0], d_local[1], d_local[2]),
                Some(previous) => previous.displacement_at(previous.length()),
            };
            if shape_override {
                segment.displacement_1 = shape_displacement(element, x1, &d_local);
            }

            // Start forces: end forces carried to x1, then every load at
            // or left of x1 folded in
            let mut f1 = InternalForces::new(fl[0], fl[1], fl[2] - fl[1] * x1);

            for load in &loads {
                match load {
                    LocalLoad::Point {
                        fx,
                        fy,
                        mz,
                        position,
                    } => {
                        if *position <= x1 + STATION_TOL {
                            f1.fx += fx;
                            f1.fy += fy;
                            f1.mz += mz - fy * (x1 - position);
                        }
                    }
                    LocalLoad::Linear {
                        wx1,
                        wy1,
                        wx2,
                        wy2,
                        start,
                        end,
                    } => {
                        if *start > x1 + STATION_TOL {
                            continue;
                        }
                        let right = end.min(x1);
                        if right > *start + STATION_TOL {
                            let (force_x, _) =
                                partial_resultant(*wx1, *wx2, *start, *end, right);
                            let (force_y, moment_y) =
                                partial_resultant(*wy1, *wy2, *start, *end, right);
                            f1.fx += force_x;
                            f1.fy += force_y;
                            f1.mz += moment_y - x1 * force_y;
                        }
                        if *end > x1 + STATION_TOL {
                            // Boundaries split segments, so the load
                            // spans this one fully
                            let at = |w1: f64, w2: f64, x: f64| {
                                w1 + (w2 - w1) * (x - start) / (end - start)
                            };
                            segment.wx1 += at(*wx1, *wx2, x1);
                            segment.wx2 += at(*wx1, *wx2, x2);
                            segment.wy1 += at(*wy1, *wy2, x1);
                            segment.wy2 += at(*wy1, *wy2, x2);
                        }
                    }
                }
            }

            segment.forces_1 = f1;
            segment.forces_2 = segment.internal_force_at(segment.length());
            segment.displacement_2 = if shape_override {
                shape_displacement(element, x2, &d_local)
            } else {
                segment.displacement_at(segment.length())
            };

            segments.push(segment);
        }

        Ok(segments)
    }
}

/// Resultant and first moment (about the member origin) of the part of a
/// linear load on [start, end] that lies left of `right`
fn partial_resultant(w1: f64, w2: f64, start: f64, end: f64, right: f64) -> (f64, f64) {
    let slope = (w2 - w1) / (end - start);
    let span = right - start;

    let force = w1 * span + slope * span * span / 2.0;
    let moment = w1 * (right * right - start * start) / 2.0
        + slope
            * ((right * right * right - start * start * start) / 3.0
                - start * (right * right - start * start) / 2.0);

    (force, moment)
}

fn localized_loads(element: &Element, case: &str, geometry: &crate::elements::MemberGeometry) -> Vec<LocalLoad> {
    let mut loads = Vec::new();

    for load in element.point_loads() {
        if load.case != case {
            continue;
        }
        let (fx, fy) = match load.direction {
            crate::loads::LoadDirection::Local => (load.fx, load.fy),
            crate::loads::LoadDirection::Global => geometry.to_local(load.fx, load.fy),
        };
        loads.push(LocalLoad::Point {
            fx,
            fy,
            mz: load.mz,
            position: load.position,
        });
    }

    for load in element.dist_loads() {
        if load.case != case {
            continue;
        }
        let (wx1, wy1) = match load.direction {
            crate::loads::LoadDirection::Local => (load.wx1, load.wy1),
            crate::loads::LoadDirection::Global => geometry.to_local(load.wx1, load.wy1),
        };
        let (wx2, wy2) = match load.direction {
            crate::loads::LoadDirection::Local => (load.wx2, load.wy2),
            crate::loads::LoadDirection::Global => geometry.to_local(load.wx2, load.wy2),
        };
        loads.push(LocalLoad::Linear {
            wx1,
            wy1,
            wx2,
            wy2,
            start: load.start,
            end: geometry.length - load.end_offset,
        });
    }

    loads
}

fn element_section_constants(element: &Element) -> (f64, f64, f64) {
    match element.properties() {
        Some(props) => match element {
            Element::Frame(_) => (props.e, props.a, props.i),
            _ => (props.e, props.a, 0.0),
        },
        None => (0.0, 0.0, 0.0),
    }
}

fn shape_displacement(element: &Element, x: f64, local_displacements: &Vec6) -> Displacement {
    let n = element.shape_function_at(x).unwrap();
    Displacement::from_vector(n * local_displacements)
}

fn station_in_range(element: &Element, x: f64) -> bool {
    let length = element.length().unwrap_or(0.0);
    x >= -STATION_TOL && x <= length + STATION_TOL
}

fn evaluate_forces(segments: &[MeshSegment], x: f64) -> Option<InternalForces> {
    let segment = segments.iter().find(|s| s.contains(x))?;
    let offset = (x - segment.x1).clamp(0.0, segment.length());
    Some(segment.internal_force_at(offset))
}

fn evaluate_displacement(segments: &[MeshSegment], x: f64) -> Option<Displacement> {
    let segment = segments.iter().find(|s| s.contains(x))?;
    let offset = (x - segment.x1).clamp(0.0, segment.length());
    Some(segment.displacement_at(offset))
}

/// Interior stations of a segment where the shear crosses zero
fn shear_zero_crossings(segment: &MeshSegment) -> Vec<f64> {
    let h = segment.length();
    let dwy = if h > 0.0 {
        (segment.wy2 - segment.wy1) / h
    } else {
        0.0
    };

    // shear(xi) = fy1 + wy1 xi + dwy xi^2 / 2
    let a2 = dwy / 2.0;
    let a1 = segment.wy1;
    let a0 = segment.forces_1.fy;

    let mut roots = Vec::new();
    if a2.abs() < 1e-15 {
        if a1.abs() > 1e-15 {
            roots.push(-a0 / a1);
        }
    } else {
        let discriminant = a1 * a1 - 4.0 * a2 * a0;
        if discriminant >= 0.0 {
            let sqrt = discriminant.sqrt();
            roots.push((-a1 + sqrt) / (2.0 * a2));
            roots.push((-a1 - sqrt) / (2.0 * a2));
        }
    }

    roots.retain(|&root| root > STATION_TOL && root < h - STATION_TOL);
    roots
}
