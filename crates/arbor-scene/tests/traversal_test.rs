// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the four render passes.

use approx::assert_relative_eq;
use arbor_core::picking::{color_to_id, id_to_color, NO_SELECTION};
use arbor_core::{
    LinearRgba, Mat4, MaterialLibrary, PhongMaterial, PolygonMode, RenderPipeline,
    RenderSettings, Vec3,
};
use arbor_scene::{Command, FrameRenderer, IndexedMesh, ObjectId, RecordingPipeline, SceneGraph};

fn triangle() -> IndexedMesh {
    IndexedMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).unwrap()
}

/// `(marker, model, color)` for every triangle draw, in order.
fn triangle_draws(pipeline: &RecordingPipeline) -> Vec<(String, Mat4, LinearRgba)> {
    let mut last_marker = String::new();
    let mut draws = Vec::new();
    for command in pipeline.commands() {
        match command {
            Command::Marker(label) => last_marker = label.clone(),
            Command::Triangles { model, color, .. } => {
                draws.push((last_marker.clone(), *model, *color))
            }
            _ => {}
        }
    }
    draws
}

fn assert_matrix_approx_eq(a: &Mat4, b: &Mat4) {
    for c in 0..4 {
        for r in 0..4 {
            assert_relative_eq!(a.cols[c].get(r), b.cols[c].get(r), epsilon = 1e-5);
        }
    }
}

/// root -> [translate(0,1,0), leaf_a, child -> [leaf_b]]
struct Example {
    graph: SceneGraph,
    root: ObjectId,
    child: ObjectId,
}

fn example_scene() -> Example {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let leaf_a = graph.add_leaf("leaf_a", triangle());
    let child = graph.add_node("child");
    let leaf_b = graph.add_leaf("leaf_b", triangle());

    graph
        .add_transform(root, Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)))
        .unwrap();
    graph.add_child(root, leaf_a).unwrap();
    graph.add_child(root, child).unwrap();
    graph.add_child(child, leaf_b).unwrap();

    graph.set_identifier(leaf_a, 5).unwrap();
    graph.set_identifier(child, -1).unwrap();

    Example { graph, root, child }
}

#[test]
fn test_every_pass_keeps_stacks_balanced() {
    let mut materials = MaterialLibrary::new();
    let shiny = materials.insert(PhongMaterial::new("shiny", 0.1, 0.4, 0.9, 20.0));
    let matte = materials.insert(PhongMaterial::default());

    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let arm = graph.add_node("arm");
    let hand = graph.add_node("hand");
    let mut mesh = triangle();
    mesh.compute_normals();
    let leaf = graph.add_leaf("mesh", mesh);

    graph.add_material(root, shiny).unwrap();
    graph.add_child(root, arm).unwrap();
    graph.add_transform(arm, Mat4::from_rotation_z(0.3)).unwrap();
    graph.add_material(arm, matte).unwrap();
    graph.add_child(arm, leaf).unwrap();
    graph.add_child(arm, hand).unwrap();
    graph.add_transform(hand, Mat4::from_scale(Vec3::ONE * 0.5)).unwrap();
    graph.add_child(hand, leaf).unwrap();
    graph.set_color(arm, LinearRgba::RED).unwrap();
    graph.set_color(leaf, LinearRgba::BLUE).unwrap();
    graph.set_identifier(arm, 12).unwrap();
    graph.set_identifier(hand, 0).unwrap();

    let mut pipeline = RecordingPipeline::new();
    pipeline.set_lighting(true);

    graph.draw(root, &mut pipeline).unwrap();
    assert!(pipeline.is_balanced());
    assert_eq!(pipeline.model_counts().pushes, 3);
    assert_eq!(pipeline.material_counts().pushes, 3);
    assert_eq!(pipeline.color_counts().pushes, 3);

    graph.draw_geometry(root, &mut pipeline).unwrap();
    graph.draw_normals(root, &mut pipeline, 0.35).unwrap();
    graph.draw_selection(root, &mut pipeline).unwrap();

    assert!(pipeline.is_balanced());
    assert_eq!(pipeline.model_matrix(), Mat4::IDENTITY);
    assert_eq!(pipeline.color(), LinearRgba::WHITE);
    assert_eq!(pipeline.active_material(), None);
}

#[test]
fn test_entries_are_visited_in_insertion_order() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let names = ["first", "second", "third"];
    for (i, name) in names.iter().enumerate() {
        let leaf = graph.add_leaf(*name, triangle());
        graph
            .add_transform(root, Mat4::from_translation(Vec3::X * i as f32))
            .unwrap();
        graph.add_child(root, leaf).unwrap();
    }

    let mut pipeline = RecordingPipeline::new();
    graph.draw_geometry(root, &mut pipeline).unwrap();

    let draws = triangle_draws(&pipeline);
    let visited: Vec<&str> = draws.iter().map(|(name, _, _)| name.as_str()).collect();
    assert_eq!(visited, names);

    // Transforms accumulate: 0, 0+1, 0+1+2.
    let offsets: Vec<f32> = draws.iter().map(|(_, model, _)| model.cols[3].x).collect();
    assert_eq!(offsets, vec![0.0, 1.0, 3.0]);
}

#[test]
fn test_sibling_transforms_compose_like_their_product() {
    let a = Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.8);
    let b = Mat4::from_translation(Vec3::new(0.5, -2.0, 3.0));

    let mut graph = SceneGraph::new();
    let leaf = graph.add_leaf("leaf", triangle());
    let split = graph.add_node("split");
    graph.add_transform(split, a).unwrap();
    graph.add_transform(split, b).unwrap();
    graph.add_child(split, leaf).unwrap();
    let fused = graph.add_node("fused");
    graph.add_transform(fused, a * b).unwrap();
    graph.add_child(fused, leaf).unwrap();

    let mut pipeline = RecordingPipeline::new();
    graph.draw_geometry(split, &mut pipeline).unwrap();
    graph.draw_geometry(fused, &mut pipeline).unwrap();

    let draws = triangle_draws(&pipeline);
    assert_eq!(draws.len(), 2);
    assert_matrix_approx_eq(&draws[0].1, &draws[1].1);
}

#[test]
fn test_transform_only_affects_later_siblings() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let before = graph.add_leaf("before", triangle());
    let nested = graph.add_node("nested");
    let after = graph.add_leaf("after", triangle());
    graph.add_child(root, before).unwrap();
    graph.add_child(root, nested).unwrap();
    graph
        .add_transform(nested, Mat4::from_translation(Vec3::Z))
        .unwrap();
    graph.add_child(root, after).unwrap();

    let mut pipeline = RecordingPipeline::new();
    graph.draw_geometry(root, &mut pipeline).unwrap();

    // The nested transform is popped with its node.
    for (_, model, _) in triangle_draws(&pipeline) {
        assert_eq!(model, Mat4::IDENTITY);
    }
}

#[test]
fn test_example_scene_full_pass() {
    let Example { graph, root, .. } = example_scene();
    let mut pipeline = RecordingPipeline::new();
    graph.draw(root, &mut pipeline).unwrap();

    let translation = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    let draws = triangle_draws(&pipeline);
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].0, "leaf_a");
    assert_eq!(draws[1].0, "leaf_b");
    assert_eq!(draws[0].1, translation);
    assert_eq!(draws[1].1, translation);

    // One pair at the root, one for the nested node.
    assert_eq!(pipeline.model_counts().pushes, 2);
    assert!(pipeline.is_balanced());
}

#[test]
fn test_inherited_identifier_paints_ancestor_color() {
    let Example {
        mut graph, root, ..
    } = example_scene();

    // Only leaf_a, a sibling, carries an identifier: nothing above leaf_b
    // does, so it shows the selection background.
    let renderer = FrameRenderer::new(RenderSettings::default());
    let mut pipeline = RecordingPipeline::new();
    renderer.render_selection(&graph, root, &mut pipeline).unwrap();
    let draws = triangle_draws(&pipeline);
    assert_eq!(draws[1].0, "leaf_b");
    assert_eq!(color_to_id(draws[1].2), NO_SELECTION);

    graph.set_identifier(root, 5).unwrap();

    let mut pipeline = RecordingPipeline::new();
    graph.draw_selection(root, &mut pipeline).unwrap();

    let draws = triangle_draws(&pipeline);
    assert_eq!(draws[1].0, "leaf_b");
    assert_eq!(color_to_id(draws[1].2), 5);
    assert!(pipeline.is_balanced());
}

#[test]
fn test_selection_colors_do_not_leak_to_siblings() {
    let Example {
        mut graph,
        root,
        child,
    } = example_scene();
    graph.set_identifier(root, 9).unwrap();

    let mut pipeline = RecordingPipeline::new();
    graph.draw_selection(root, &mut pipeline).unwrap();

    let draws = triangle_draws(&pipeline);
    assert_eq!(color_to_id(draws[0].2), 5);
    assert_eq!(color_to_id(draws[1].2), 9);

    graph.set_identifier(child, 0).unwrap();
    let mut pipeline = RecordingPipeline::new();
    graph.draw_selection(root, &mut pipeline).unwrap();
    assert_eq!(triangle_draws(&pipeline)[1].2, id_to_color(0).unwrap());
}

#[test]
fn test_materials_only_apply_when_lighting_is_enabled() {
    let mut materials = MaterialLibrary::new();
    let gold = materials.insert(PhongMaterial::new("gold", 0.2, 0.6, 0.8, 30.0));

    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let leaf = graph.add_leaf("leaf", triangle());
    graph.add_material(root, gold).unwrap();
    graph.add_child(root, leaf).unwrap();

    let mut lit = RecordingPipeline::new();
    lit.set_lighting(true);
    graph.draw(root, &mut lit).unwrap();
    let material_at_draw = lit.commands().iter().find_map(|c| match c {
        Command::Triangles { material, .. } => Some(*material),
        _ => None,
    });
    assert_eq!(material_at_draw, Some(Some(gold)));
    assert_eq!(lit.active_material(), None);

    let mut unlit = RecordingPipeline::new();
    graph.draw(root, &mut unlit).unwrap();
    assert_eq!(unlit.material_counts().pushes, 0);
    assert!(!unlit
        .commands()
        .iter()
        .any(|c| matches!(c, Command::ActivateMaterial(_))));
}

#[test]
fn test_frame_renderer_overlays() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let mut mesh = triangle();
    mesh.compute_normals();
    let leaf = graph.add_leaf("leaf", mesh);
    graph.add_child(root, leaf).unwrap();

    let settings = RenderSettings {
        draw_edges: true,
        draw_normals: true,
        ..RenderSettings::default()
    };
    let renderer = FrameRenderer::new(settings.clone());
    let mut pipeline = RecordingPipeline::new();
    renderer.render_frame(&graph, root, &mut pipeline).unwrap();

    let edge_draw = pipeline.draws().find_map(|c| match c {
        Command::Triangles {
            mode: PolygonMode::Line,
            color,
            lighting,
            ..
        } => Some((*color, *lighting)),
        _ => None,
    });
    assert_eq!(edge_draw, Some((settings.edge_color, false)));

    let normals_draw = pipeline.draws().find_map(|c| match c {
        Command::Lines { color, count, .. } => Some((*color, *count)),
        _ => None,
    });
    assert_eq!(normals_draw, Some((settings.normals_color, 3)));

    assert!(pipeline.is_balanced());
    assert!(pipeline.lighting_enabled());
    assert_eq!(pipeline.polygon_mode(), PolygonMode::Fill);
}

#[test]
fn test_frame_renderer_skips_unsupported_overlays() {
    let mut graph = SceneGraph::new();
    let root = graph.add_node("root");
    let leaf = graph.add_leaf("leaf", triangle());
    graph.add_child(root, leaf).unwrap();

    let renderer = FrameRenderer::new(RenderSettings {
        draw_normals: true,
        ..RenderSettings::default()
    });
    let mut pipeline = RecordingPipeline::new();
    renderer.render_frame(&graph, root, &mut pipeline).unwrap();

    assert_eq!(pipeline.draws().count(), 1);
}
