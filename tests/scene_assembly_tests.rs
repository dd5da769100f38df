use std::collections::HashSet;

use glam::DVec3;

use cube_field::math::Color;
use cube_field::palette;
use cube_field::random::{ScriptedRandom, SeededRandom};
use cube_field::scene::{build_scene, SceneConfig, SceneNode, Shape, FIXED_NODE_COUNT};
use cube_field::Viewport;

fn viewport() -> Viewport {
    Viewport::new(1280, 720, 2.0)
}

#[cfg(test)]
mod scene_assembly_tests {
    use super::*;

    #[test]
    fn test_default_scene_has_506_nodes() {
        let mut rng = SeededRandom::seeded(1);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);

        assert_eq!(state.graph.len(), 506);
        assert_eq!(state.batch.len(), 500);
    }

    #[test]
    fn test_empty_batch_has_six_nodes() {
        let mut rng = SeededRandom::seeded(1);
        let config = SceneConfig {
            cube_count: 0,
            ..SceneConfig::default()
        };
        let state = build_scene(&config, viewport(), &mut rng);

        assert_eq!(state.graph.len(), FIXED_NODE_COUNT);
        assert!(state.batch.is_empty());
    }

    #[test]
    fn test_node_count_tracks_cube_count() {
        for count in [1, 7, 42] {
            let mut rng = SeededRandom::seeded(count as u64);
            let config = SceneConfig {
                cube_count: count,
                ..SceneConfig::default()
            };
            let state = build_scene(&config, viewport(), &mut rng);
            assert_eq!(state.graph.len(), 6 + count);
        }
    }

    #[test]
    fn test_batch_positions_within_bounds() {
        let mut rng = SeededRandom::seeded(17);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);

        for &id in &state.batch {
            let cube = state.graph.object(id).expect("batch node is a mesh");
            for c in cube.position.to_array() {
                assert!((-200.0..=200.0).contains(&c), "Coordinate {} out of range", c);
            }
        }
    }

    #[test]
    fn test_batch_bounds_at_sampling_extremes() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let config = SceneConfig {
            cube_count: 2,
            ..SceneConfig::default()
        };
        let state = build_scene(&config, viewport(), &mut rng);

        for &id in &state.batch {
            let position = state.graph.object(id).expect("mesh").position;
            assert!(position.abs().max_element() <= 200.0);
        }
    }

    #[test]
    fn test_every_node_inserted_once() {
        let mut rng = SeededRandom::seeded(3);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);

        let mut ids = vec![
            state.axes,
            state.cube,
            state.sphere,
            state.light,
            state.light_helper,
            state.camera,
        ];
        ids.extend(state.batch.iter().copied());

        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(unique.len(), state.graph.len());
    }

    #[test]
    fn test_node_kinds() {
        let mut rng = SeededRandom::seeded(5);
        let config = SceneConfig {
            cube_count: 10,
            ..SceneConfig::default()
        };
        let state = build_scene(&config, viewport(), &mut rng);

        let count = |kind: &str| {
            state
                .graph
                .iter()
                .filter(|(_, node)| node.kind() == kind)
                .count()
        };
        assert_eq!(count("mesh"), 12);
        assert_eq!(count("axes_helper"), 1);
        assert_eq!(count("point_light"), 1);
        assert_eq!(count("point_light_helper"), 1);
        assert_eq!(count("camera"), 1);
    }

    #[test]
    fn test_camera_setup() {
        let mut rng = SeededRandom::seeded(5);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);
        let camera = state.camera().expect("camera node");

        assert_eq!(camera.position, DVec3::new(-30.0, 40.0, 30.0));
        assert_eq!(camera.target, DVec3::ZERO);
        assert_eq!(camera.fov_y, 45.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_objects() {
        let mut rng = SeededRandom::seeded(5);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);

        let cube = state.graph.object(state.cube).expect("cube");
        assert_eq!(cube.shape, Shape::cube(4.0));
        assert_eq!(cube.position, DVec3::ZERO);
        assert!(palette::contains(cube.material.color));

        let sphere = state.graph.object(state.sphere).expect("sphere");
        assert_eq!(sphere.shape, Shape::sphere(4.0, 30));
        assert_eq!(sphere.position, DVec3::new(20.0, 0.0, 0.0));
        assert!(palette::contains(sphere.material.color));

        let light = state.graph.light(state.light).expect("light");
        assert_eq!(light.color, Color::WHITE);
        assert_eq!(light.intensity, 1.2);
        assert_eq!(light.position, DVec3::new(10.0, 10.0, 10.0));

        match state.graph.get(state.light_helper) {
            Some(SceneNode::PointLightHelper(helper)) => assert_eq!(helper.light, state.light),
            other => panic!("Expected light helper, got {:?}", other),
        }
        match state.graph.get(state.axes) {
            Some(SceneNode::AxesHelper(axes)) => assert_eq!(axes.size, 40.0),
            other => panic!("Expected axes helper, got {:?}", other),
        }
    }

    #[test]
    fn test_render_target_descriptor() {
        let mut rng = SeededRandom::seeded(5);
        let state = build_scene(&SceneConfig::default(), viewport(), &mut rng);

        assert_eq!(state.target.width, 1280);
        assert_eq!(state.target.height, 720);
        assert_eq!(state.target.pixel_ratio, 2.0);
        assert_eq!(Some(state.target.clear_color), Color::from_hex("#16161d"));
        assert!(state.target.antialias);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut rng = SeededRandom::seeded(5);
        let mut state = build_scene(&SceneConfig::default(), viewport(), &mut rng);
        state.resize(600, 600);

        assert_eq!(state.target.width, 600);
        assert_eq!(state.camera().expect("camera").aspect, 1.0);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let config = SceneConfig {
            cube_count: 20,
            ..SceneConfig::default()
        };
        let a = build_scene(&config, viewport(), &mut SeededRandom::seeded(11));
        let b = build_scene(&config, viewport(), &mut SeededRandom::seeded(11));

        let positions = |state: &cube_field::SceneState| {
            state
                .batch
                .iter()
                .map(|&id| state.graph.object(id).expect("mesh").position)
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }
}
