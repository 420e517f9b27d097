//! End-to-end builds through the public generator API.

use approx::assert_relative_eq;
use component_mesh::config::GeneratorConfig;
use component_mesh::{
    generate, weld, AxisBasis, BodyProfile, ComponentError, ComponentGenerator,
    ComponentParameters, Mesh,
};
use glam::DVec3;
use std::collections::HashMap;

fn reference_params() -> ComponentParameters {
    ComponentParameters {
        start: DVec3::ZERO,
        end: DVec3::Z,
        neck_height: 1.0,
        body_height: 2.0,
        head_height: 1.0,
        base_top_radius: 0.6,
        body_radius: 0.5,
        resolution: 32,
        thread_depth: 0.0,
        thread_turns: 0,
    }
}

fn radial(v: DVec3) -> f64 {
    v.truncate().length()
}

fn assert_sound(mesh: &Mesh) {
    assert!(mesh.validate());
    assert_eq!(mesh.degenerate_triangle_count(), 0);
    assert_eq!(mesh.normals().map(<[DVec3]>::len), Some(mesh.vertex_count()));
}

/// Counts how many triangles use each undirected edge.
fn edge_uses(mesh: &Mesh) -> HashMap<(u32, u32), usize> {
    let mut uses = HashMap::new();
    for tri in mesh.triangles() {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }
    uses
}

fn assert_watertight(mesh: &Mesh) {
    let uses = edge_uses(mesh);
    let open: Vec<_> = uses.iter().filter(|(_, n)| **n != 2).collect();
    assert!(
        open.is_empty(),
        "{} edges not shared by two triangles: {:?}",
        open.len(),
        &open[..open.len().min(8)]
    );
    assert!(mesh.is_closed_manifold());

    // Closed genus-0 surface
    let euler = mesh.vertex_count() as i64 - uses.len() as i64 + mesh.triangle_count() as i64;
    assert_eq!(euler, 2);
}

#[test]
fn reference_component_dimensions() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();
    let mesh = &report.mesh;
    assert_sound(mesh);

    let (min, max) = mesh.bounding_box();
    assert_relative_eq!(min.z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(max.z, 4.0, epsilon = 1e-12);

    let mut base_ring = 0;
    let mut seam_ring = 0;
    for v in mesh.vertices() {
        if v.z.abs() < 1e-9 && radial(*v) > 1e-9 {
            assert_relative_eq!(radial(*v), 0.6, epsilon = 1e-12);
            base_ring += 1;
        }
        if (v.z - 1.0).abs() < 1e-9 {
            assert_relative_eq!(radial(*v), 0.5, epsilon = 1e-12);
            seam_ring += 1;
        }
    }
    assert_eq!(base_ring, 32);
    assert_eq!(seam_ring, 32);
}

#[test]
fn reference_component_weld_counts() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();

    // Neck/body ring and centre, body top ring and centre against the seam
    // disc, and the seam disc ring against the head base ring
    assert_eq!(report.weld.merged_vertices, 33 + 33 + 64);
    assert_eq!(report.weld.dropped_degenerate, 0);
    // Neck top against body bottom, body top against the seam disc fan
    assert_eq!(report.weld.culled_internal, 64 + 64);

    // 66 + 66 + 65 + (32·64 + 1) input vertices, minus merges and the two
    // orphaned centres
    assert_eq!(report.mesh.vertex_count(), 66 + 66 + 65 + 2049 - 130 - 2);
    assert_eq!(report.mesh.triangle_count(), 128 + 128 + 64 + 4032 - 128);
}

#[test]
fn reference_component_is_watertight() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();
    assert_watertight(&report.mesh);
}

#[test]
fn head_seam_is_closed() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();
    let mesh = &report.mesh;
    let on_seam = |i: u32| (mesh.vertex(i).z - 3.0).abs() < 1e-9;

    // Every edge along the body/head joint borders exactly two faces
    let seam_edges: Vec<_> = edge_uses(mesh)
        .into_iter()
        .filter(|((a, b), _)| on_seam(*a) && on_seam(*b))
        .collect();
    assert!(!seam_edges.is_empty());
    for ((a, b), uses) in seam_edges {
        assert_eq!(uses, 2, "seam edge ({a}, {b})");
    }
}

#[test]
fn threaded_components_are_watertight() {
    let config = GeneratorConfig::default();
    for resolution in [8, 10, 12, 16, 32] {
        let params = ComponentParameters {
            resolution,
            thread_depth: 0.05,
            thread_turns: 3,
            ..reference_params()
        };
        let report = generate(&params, 0.5, resolution, &config).unwrap();
        assert_eq!(report.dimensions.seam_segments(), resolution.max(16) as u32);
        assert_watertight(&report.mesh);
    }
}

#[test]
fn oblique_component_is_watertight() {
    let start = DVec3::new(-2.0, 0.5, 7.0);
    let params = ComponentParameters {
        start,
        end: start + DVec3::new(1.0, -2.0, 0.5),
        thread_depth: 0.1,
        thread_turns: 4,
        ..reference_params()
    };
    let report = generate(&params, 0.5, 24, &GeneratorConfig::default()).unwrap();
    assert_watertight(&report.mesh);
}

#[test]
fn seam_vertices_are_shared() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();
    let (rewelded, stats) = weld(&report.mesh, 1e-6);
    assert_eq!(stats.merged_vertices, 0);
    assert_eq!(stats.culled_internal, 0);
    assert_eq!(rewelded.vertex_count(), report.mesh.vertex_count());
}

#[test]
fn normals_point_away_from_axis() {
    let report = generate(&reference_params(), 0.5, 32, &GeneratorConfig::default()).unwrap();
    let mesh = &report.mesh;
    let normals = mesh.normals().unwrap();
    for (v, n) in mesh.vertices().iter().zip(normals) {
        if radial(*v) > 1e-3 {
            assert!(n.dot(DVec3::new(v.x, v.y, 0.0)) > 0.0);
        }
    }
}

#[test]
fn top_radius_always_exceeds_body_radius() {
    for base_top_radius in [-1.0, 0.0, 0.2, 0.5, 0.6, 3.0] {
        let params = ComponentParameters {
            base_top_radius,
            ..reference_params()
        };
        let report = generate(&params, 0.5, 32, &GeneratorConfig::default()).unwrap();
        assert!(report.dimensions.top_radius > report.dimensions.body_radius);
    }
}

#[test]
fn degenerate_axis_rejected() {
    let params = ComponentParameters {
        end: DVec3::new(0.0, 0.0, 1e-7),
        ..reference_params()
    };
    let err = generate(&params, 0.5, 32, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, ComponentError::DegenerateAxis { .. }));
}

#[test]
fn invalid_radius_rejected() {
    for radius in [0.0, -0.5, 1e-7, f64::NAN] {
        let err = generate(&reference_params(), radius, 32, &GeneratorConfig::default())
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidRadius { .. }));
    }
}

#[test]
fn invalid_dimensions_rejected() {
    let params = ComponentParameters {
        head_height: 5e-7,
        ..reference_params()
    };
    let err = generate(&params, 0.5, 32, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, ComponentError::InvalidDimensions { .. }));
    assert!(err.to_string().contains("head"));
}

#[test]
fn failure_keeps_previous_mesh() {
    let mut generator = ComponentGenerator::new();
    generator.set_parameters(reference_params());
    generator.build_actor(0.5, 32).unwrap();
    let before = generator.mesh().unwrap().clone();

    generator.set_end_point(DVec3::ZERO);
    assert!(generator.build_actor(0.5, 32).is_err());
    assert_eq!(generator.mesh(), Some(&before));

    generator.set_end_point(DVec3::Z);
    assert!(generator.build_actor(0.0, 32).is_err());
    assert_eq!(generator.mesh(), Some(&before));
}

#[test]
fn inactive_thread_matches_plain_body() {
    let config = GeneratorConfig::default();
    let plain = generate(&reference_params(), 0.5, 32, &config).unwrap();

    for (thread_depth, thread_turns) in [(0.1, 0), (0.0, 20), (-0.1, 20), (0.1, -3)] {
        let params = ComponentParameters {
            thread_depth,
            thread_turns,
            ..reference_params()
        };
        let report = generate(&params, 0.5, 32, &config).unwrap();
        assert_eq!(report.dimensions.body, BodyProfile::Plain);
        assert_eq!(report.mesh, plain.mesh);
    }
}

#[test]
fn threaded_component() {
    let params = ComponentParameters {
        thread_depth: 0.05,
        thread_turns: 8,
        ..reference_params()
    };
    let report = generate(&params, 0.5, 32, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.dimensions.body,
        BodyProfile::Threaded {
            depth: 0.05,
            turns: 8
        }
    );
    assert_sound(&report.mesh);
    // Neck and head follow the body's ring count, so both joints cancel
    assert_eq!(report.weld.culled_internal, 128);
    assert_watertight(&report.mesh);

    let body_radii: Vec<f64> = report
        .mesh
        .vertices()
        .iter()
        .filter(|v| v.z > 1.5 && v.z < 2.5)
        .map(|v| radial(*v))
        .collect();
    let max = body_radii.iter().cloned().fold(f64::MIN, f64::max);
    let min = body_radii.iter().cloned().fold(f64::MAX, f64::min);
    assert!(max > 0.54 && max <= 0.55 + 1e-12);
    assert!(min < 0.46 && min >= 0.45 - 1e-12);

    // Seam rings stay on the nominal radius
    for v in report.mesh.vertices() {
        if (v.z - 1.0).abs() < 1e-9 || (v.z - 3.0).abs() < 1e-9 {
            let r = radial(*v);
            assert!(r < 1e-9 || (r - 0.5).abs() < 1e-12, "seam radius {r}");
        }
    }
}

#[test]
fn oblique_axis_stays_within_envelope() {
    let start = DVec3::new(1.0, 2.0, 3.0);
    let params = ComponentParameters {
        start,
        end: start + DVec3::new(3.0, 4.0, 0.0),
        ..reference_params()
    };
    let report = generate(&params, 0.5, 24, &GeneratorConfig::default()).unwrap();
    assert_sound(&report.mesh);

    let basis = AxisBasis::from_direction(params.direction(), 1e-6).unwrap();
    for v in report.mesh.vertices() {
        let (z, r) = basis.cylindrical(start, *v);
        assert!((-1e-9..=4.0 + 1e-9).contains(&z));
        assert!(r <= 0.6 + 1e-9);
    }
}

#[test]
fn repeated_builds_are_identical() {
    let params = ComponentParameters {
        thread_depth: 0.04,
        thread_turns: 5,
        ..reference_params()
    };
    let config = GeneratorConfig::default();
    let first = generate(&params, 0.5, 20, &config).unwrap();
    let second = generate(&params, 0.5, 20, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn oversized_thread_rejected_without_replacing_mesh() {
    let mut generator = ComponentGenerator::new();
    generator.set_parameters(reference_params());
    generator.build_actor(0.5, 32).unwrap();
    let before = generator.mesh().unwrap().clone();

    generator.set_thread_depth(0.05);
    generator.set_thread_turns(i32::MAX);
    let err = generator.build_actor(0.5, 32).unwrap_err();
    assert!(matches!(err, ComponentError::InvalidDimensions { .. }));
    assert_eq!(generator.mesh(), Some(&before));
}

#[test]
fn oversized_resolution_clamped() {
    let report = generate(&reference_params(), 0.5, i32::MAX, &GeneratorConfig::default()).unwrap();
    // Stored resolution of 32 still wins
    assert_eq!(report.dimensions.segments, 32);

    let params = ComponentParameters {
        resolution: i32::MAX,
        ..reference_params()
    };
    let report = generate(&params, 0.5, 32, &GeneratorConfig::default()).unwrap();
    assert_eq!(report.dimensions.segments, 360);
    assert_sound(&report.mesh);
}

#[test]
fn custom_thread_zones() {
    let config = GeneratorConfig::new(1e-6, 32, 0.0, 0.5).unwrap();
    let params = ComponentParameters {
        thread_depth: 0.05,
        thread_turns: 4,
        ..reference_params()
    };
    let report = generate(&params, 0.5, 32, &config).unwrap();
    assert_sound(&report.mesh);
}
