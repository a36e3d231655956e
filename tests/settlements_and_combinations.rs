//! Support settlements, load combinations and global equilibrium

use approx::assert_relative_eq;
use frame2d::prelude::*;

const E: f64 = 2.0e8;
const I: f64 = 1.0e-4;
const A: f64 = 1.0e-2;
const EI: f64 = E * I;

fn simply_supported(length: f64) -> Structure {
    let mut model = Structure::new();
    model.add_material("Mat", Material::new(E, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(A, I)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(length, 0.0)).unwrap();
    model
        .add_element("Beam", FrameMember::new("N1", "N2", "Mat", "Sec"))
        .unwrap();
    model.add_support("N1", Support::pinned()).unwrap();
    model.add_support("N2", Support::roller_y()).unwrap();
    model
}

#[test]
fn propped_cantilever_support_settlement() {
    let length = 5.0;
    let delta = 0.01;

    let mut model = Structure::new();
    model.add_material("Mat", Material::new(E, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(A, I)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(length, 0.0)).unwrap();
    model
        .add_element("Beam", FrameMember::new("N1", "N2", "Mat", "Sec"))
        .unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model.add_support("N2", Support::roller_y()).unwrap();
    model
        .add_support_displacement("N2", SupportDisplacement::settlement(-delta, "Settle"))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    // The prescribed displacement is reported back exactly
    let prop = results.node_displacement("N2", "Settle").unwrap();
    assert_relative_eq!(prop.uy, -delta, epsilon = 1e-15);
    assert_relative_eq!(prop.ux, 0.0, epsilon = 1e-12);

    // Force needed to deflect the free tip: 3 EI delta / L^3
    let p = 3.0 * EI * delta / length.powi(3);
    let r1 = results.support_reaction("N1", "Settle").unwrap();
    let r2 = results.support_reaction("N2", "Settle").unwrap();
    assert_relative_eq!(r2.fy, -p, max_relative = 1e-9);
    assert_relative_eq!(r1.fy, p, max_relative = 1e-9);

    // Fixed-end moment 3 EI delta / L^2
    assert_relative_eq!(
        r1.mz,
        3.0 * EI * delta / length.powi(2),
        max_relative = 1e-9
    );

    // Reactions balance each other
    assert_relative_eq!(r1.fy + r2.fy, 0.0, epsilon = 1e-9);
}

#[test]
fn combination_superposes_cases() {
    let length = 6.0;
    let w_dead = 5.0;
    let w_live = 3.0;

    let mut model = simply_supported(length);
    model.add_load_case(LoadCase::dead());
    model.add_load_case(LoadCase::live());
    model
        .add_member_dist_load("Beam", DistributedLoad::uniform_downward(w_dead, "Dead"))
        .unwrap();
    model
        .add_member_dist_load("Beam", DistributedLoad::uniform_downward(w_live, "Live"))
        .unwrap();
    model.add_load_combo(LoadCombination::lrfd_dead_live()).unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();
    let combo = "1.2D + 1.6L";

    // Midspan moment 1.2 * wL^2/8 + 1.6 * wL^2/8
    let expected =
        1.2 * w_dead * length * length / 8.0 + 1.6 * w_live * length * length / 8.0;
    let midspan = results
        .element_internal_forces_at_combo("Beam", combo, length / 2.0)
        .unwrap()
        .unwrap();
    assert_relative_eq!(midspan.mz.abs(), expected, max_relative = 1e-9);

    // Reactions and displacements superpose the same way
    let reaction = results.support_reaction_combo("N1", combo).unwrap();
    assert_relative_eq!(
        reaction.fy,
        (1.2 * w_dead + 1.6 * w_live) * length / 2.0,
        max_relative = 1e-9
    );

    let dead = results
        .element_displacement_at("Beam", "Dead", length / 2.0)
        .unwrap()
        .unwrap();
    let live = results
        .element_displacement_at("Beam", "Live", length / 2.0)
        .unwrap()
        .unwrap();
    let combined = results
        .element_displacement_at_combo("Beam", combo, length / 2.0)
        .unwrap()
        .unwrap();
    assert_relative_eq!(
        combined.uy,
        1.2 * dead.uy + 1.6 * live.uy,
        max_relative = 1e-9
    );

    let d_combo = results.node_displacement_combo("N1", combo).unwrap();
    let d_dead = results.node_displacement("N1", "Dead").unwrap();
    let d_live = results.node_displacement("N1", "Live").unwrap();
    assert_relative_eq!(
        d_combo.rz,
        1.2 * d_dead.rz + 1.6 * d_live.rz,
        max_relative = 1e-9
    );

    // Segment diagrams for the combination line up with the merged loads
    let segments = results
        .element_internal_forces_combo("Beam", combo)
        .unwrap();
    assert_eq!(segments.len(), 1);
    assert_relative_eq!(
        segments[0].wy1,
        -(1.2 * w_dead + 1.6 * w_live),
        max_relative = 1e-9
    );
}

#[test]
fn doubling_loads_doubles_response() {
    let length = 6.0;

    let build = |w: f64, p: f64| {
        let mut model = simply_supported(length);
        model
            .add_member_dist_load("Beam", DistributedLoad::uniform_downward(w, "Case 1"))
            .unwrap();
        model
            .add_member_point_load("Beam", PointLoad::downward(p, 2.0, "Case 1"))
            .unwrap();
        model.solve().unwrap();
        model
    };

    let base = build(5.0, 10.0);
    let doubled = build(10.0, 20.0);

    let base_results = PostProcessor::new(&base).unwrap();
    let doubled_results = PostProcessor::new(&doubled).unwrap();

    let d1 = base_results
        .element_displacement_at("Beam", "Case 1", 2.5)
        .unwrap()
        .unwrap();
    let d2 = doubled_results
        .element_displacement_at("Beam", "Case 1", 2.5)
        .unwrap()
        .unwrap();
    assert_relative_eq!(d2.uy, 2.0 * d1.uy, max_relative = 1e-10);

    let r1 = base_results.support_reaction("N1", "Case 1").unwrap();
    let r2 = doubled_results.support_reaction("N1", "Case 1").unwrap();
    assert_relative_eq!(r2.fy, 2.0 * r1.fy, max_relative = 1e-10);
}

#[test]
fn portal_frame_statics_check_passes() {
    let mut model = Structure::new();
    model.add_material("Steel", Material::steel()).unwrap();
    model
        .add_section("Column", Section::rectangular(0.3, 0.3))
        .unwrap();
    model
        .add_section("Girder", Section::rectangular(0.25, 0.45))
        .unwrap();

    model.add_node("Base1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("Base2", Node::new(6.0, 0.0)).unwrap();
    model.add_node("Top1", Node::new(0.0, 4.0)).unwrap();
    model.add_node("Top2", Node::new(6.0, 4.0)).unwrap();

    model
        .add_element("Col1", FrameMember::new("Base1", "Top1", "Steel", "Column"))
        .unwrap();
    model
        .add_element("Col2", FrameMember::new("Base2", "Top2", "Steel", "Column"))
        .unwrap();
    model
        .add_element("Girder", FrameMember::new("Top1", "Top2", "Steel", "Girder"))
        .unwrap();

    model.add_support("Base1", Support::fixed()).unwrap();
    model.add_support("Base2", Support::pinned()).unwrap();

    // A mix of load flavors: gravity trapezoid, wind in member-local
    // coordinates, a nodal moment
    model
        .add_member_dist_load(
            "Girder",
            DistributedLoad::trapezoidal(
                0.0,
                -8.0e3,
                0.0,
                -12.0e3,
                0.5,
                0.5,
                LoadDirection::Global,
                "Gravity",
            ),
        )
        .unwrap();
    model
        .add_member_point_load(
            "Col1",
            PointLoad::new(0.0, -4.0e3, 0.0, 2.0, LoadDirection::Local, "Wind"),
        )
        .unwrap();
    model
        .add_node_load("Top2", NodalLoad::moment(5.0e3, "Wind"))
        .unwrap();

    model
        .solve_with(AnalysisOptions::default().with_statics_check())
        .unwrap();
    assert_eq!(model.status(), AnalysisStatus::Successful);

    // Spot check vertical equilibrium of the gravity case by hand
    let results = PostProcessor::new(&model).unwrap();
    let total_load = (8.0e3 + 12.0e3) / 2.0 * 5.0;
    let r1 = results.support_reaction("Base1", "Gravity").unwrap();
    let r2 = results.support_reaction("Base2", "Gravity").unwrap();
    assert_relative_eq!(r1.fy + r2.fy, total_load, max_relative = 1e-8);
}

#[test]
fn settlement_combination_scales_prescribed_displacement() {
    let length = 5.0;
    let delta = 0.004;

    let mut model = Structure::new();
    model.add_material("Mat", Material::new(E, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(A, I)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(length, 0.0)).unwrap();
    model
        .add_element("Beam", FrameMember::new("N1", "N2", "Mat", "Sec"))
        .unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model.add_support("N2", Support::roller_y()).unwrap();
    model
        .add_support_displacement("N2", SupportDisplacement::settlement(-delta, "Settle"))
        .unwrap();
    model
        .add_load_combo(LoadCombination::new("1.5S").with_case("Settle", 1.5))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    let combined = results.node_displacement_combo("N2", "1.5S").unwrap();
    assert_relative_eq!(combined.uy, -1.5 * delta, epsilon = 1e-15);

    let reaction = results.support_reaction_combo("N2", "1.5S").unwrap();
    let single = results.support_reaction("N2", "Settle").unwrap();
    assert_relative_eq!(reaction.fy, 1.5 * single.fy, max_relative = 1e-10);
}
