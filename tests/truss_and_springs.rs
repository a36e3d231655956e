//! Truss, spring and stability scenarios

use approx::assert_relative_eq;
use frame2d::prelude::*;

#[test]
fn two_bar_truss_apex_load() {
    let p = 10.0;

    let mut model = Structure::new();
    model.add_material("Mat", Material::new(2.0e8, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(1.0e-3, 1.0e-6)).unwrap();

    model.add_node("Left", Node::new(0.0, 0.0)).unwrap();
    model.add_node("Apex", Node::new(2.0, 2.0)).unwrap();
    model.add_node("Right", Node::new(4.0, 0.0)).unwrap();

    model
        .add_element("Bar1", TrussMember::new("Left", "Apex", "Mat", "Sec"))
        .unwrap();
    model
        .add_element("Bar2", TrussMember::new("Right", "Apex", "Mat", "Sec"))
        .unwrap();

    model.add_support("Left", Support::fixed()).unwrap();
    model.add_support("Right", Support::fixed()).unwrap();
    // Truss joints have no rotational stiffness
    model
        .add_support("Apex", Support::with_restraints(false, false, true))
        .unwrap();

    model
        .add_node_load("Apex", NodalLoad::fy(-p, "Case 1"))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    // Each 45-degree bar carries P / sqrt(2) in compression
    let expected = p / 2.0_f64.sqrt();
    for bar in ["Bar1", "Bar2"] {
        let forces = results.element_local_end_forces(bar, "Case 1").unwrap();
        assert_relative_eq!(forces.axial(), -expected, max_relative = 1e-9);
    }

    let apex = results.node_displacement("Apex", "Case 1").unwrap();
    assert!(apex.uy < 0.0);
    assert_relative_eq!(apex.ux, 0.0, epsilon = 1e-12);

    // Vertical reactions split evenly
    let left = results.support_reaction("Left", "Case 1").unwrap();
    let right = results.support_reaction("Right", "Case 1").unwrap();
    assert_relative_eq!(left.fy, p / 2.0, max_relative = 1e-9);
    assert_relative_eq!(right.fy, p / 2.0, max_relative = 1e-9);
    assert_relative_eq!(left.fx + right.fx, 0.0, epsilon = 1e-9);

    // Axial force is constant along a bar
    let along = results
        .element_internal_forces_at("Bar1", "Case 1", 1.0)
        .unwrap()
        .unwrap();
    assert_relative_eq!(along.fx, expected, max_relative = 1e-9);
}

#[test]
fn spring_member_carries_axial_load() {
    let stiffness = 1.0e3;
    let p = 5.0;

    let mut model = Structure::new();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(1.0, 0.0)).unwrap();
    model
        .add_element("Spring", SpringMember::new("N1", "N2", stiffness))
        .unwrap();

    model.add_support("N1", Support::fixed()).unwrap();
    // Springs only resist along their axis
    model
        .add_support("N2", Support::with_restraints(false, true, true))
        .unwrap();
    model
        .add_node_load("N2", NodalLoad::fx(p, "Case 1"))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    let tip = results.node_displacement("N2", "Case 1").unwrap();
    assert_relative_eq!(tip.ux, p / stiffness, max_relative = 1e-12);

    let reaction = results.support_reaction("N1", "Case 1").unwrap();
    assert_relative_eq!(reaction.fx, -p, max_relative = 1e-9);

    let forces = results.element_local_end_forces("Spring", "Case 1").unwrap();
    assert_relative_eq!(forces.axial(), p, max_relative = 1e-9);
}

#[test]
fn elastic_support_reaction() {
    let k = 1.0e3;

    let mut model = Structure::new();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node_spring_diagonal("N1", k, k, k).unwrap();
    model
        .add_node_load("N1", NodalLoad::new(10.0, -20.0, 4.0, "Case 1"))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    let d = results.node_displacement("N1", "Case 1").unwrap();
    assert_relative_eq!(d.ux, 10.0 / k, max_relative = 1e-12);
    assert_relative_eq!(d.uy, -20.0 / k, max_relative = 1e-12);
    assert_relative_eq!(d.rz, 4.0 / k, max_relative = 1e-12);

    // Spring reaction is -K d, reported even though no DOF is restrained
    let reaction = results.support_reaction("N1", "Case 1").unwrap();
    assert_relative_eq!(reaction.fx, -10.0, max_relative = 1e-9);
    assert_relative_eq!(reaction.fy, 20.0, max_relative = 1e-9);
    assert_relative_eq!(reaction.mz, -4.0, max_relative = 1e-9);
}

#[test]
fn mechanism_reports_singular() {
    // A floating truss bar: the rotational DOFs have no stiffness at all
    let mut model = Structure::new();
    model.add_material("Mat", Material::new(2.0e8, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(1.0e-3, 1.0e-6)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    model.add_node("N2", Node::new(3.0, 0.0)).unwrap();
    model
        .add_element("Bar", TrussMember::new("N1", "N2", "Mat", "Sec"))
        .unwrap();
    model
        .add_node_load("N2", NodalLoad::fx(1.0, "Case 1"))
        .unwrap();

    let result = model.solve();
    assert!(matches!(result, Err(FrameError::Singular)));
    assert_eq!(model.status(), AnalysisStatus::Failure);

    // A failed model refuses post-processing
    assert!(matches!(
        PostProcessor::new(&model),
        Err(FrameError::NotAnalyzed)
    ));
}

#[test]
fn local_direction_nodal_load_uses_node_frame() {
    let p = 10.0;
    let length = 5.0;

    let mut model = Structure::new();
    model.add_material("Mat", Material::new(2.0e8, 7850.0)).unwrap();
    model.add_section("Sec", Section::new(1.0e-2, 1.0e-4)).unwrap();
    model.add_node("N1", Node::new(0.0, 0.0)).unwrap();
    // Node frame rotated 90 degrees: local +X is global +Y
    model
        .add_node(
            "N2",
            Node::new(length, 0.0).with_rotation(std::f64::consts::FRAC_PI_2),
        )
        .unwrap();
    model
        .add_element("Beam", FrameMember::new("N1", "N2", "Mat", "Sec"))
        .unwrap();
    model.add_support("N1", Support::fixed()).unwrap();
    model
        .add_node_load("N2", NodalLoad::local(p, 0.0, 0.0, "Case 1"))
        .unwrap();
    model.solve().unwrap();

    let results = PostProcessor::new(&model).unwrap();

    // Equivalent to a global +Y tip load
    let reaction = results.support_reaction("N1", "Case 1").unwrap();
    assert_relative_eq!(reaction.fy, -p, max_relative = 1e-9);
    assert_relative_eq!(reaction.fx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(reaction.mz, -p * length, max_relative = 1e-9);
}
