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

// An articulated figure: body, turning head, swinging arms and legs.

use crate::shapes;
use anyhow::Result;
use arbor_core::{LinearRgba, Mat4, MaterialLibrary, PhongMaterial, Vec3};
use arbor_scene::{ObjectId, SceneGraph, TrackSet, TransformTrack};

/// Selection identifier shared by every part of the figure.
pub const DROID_ID: i32 = 1;

pub struct Droid {
    pub root: ObjectId,
    pub tracks: TrackSet,
}

/// Adds a limb node: a pivot transform driven by animation, then a box
/// hanging below the pivot.
fn limb(
    graph: &mut SceneGraph,
    name: &str,
    mesh: ObjectId,
    offset: Vec3,
) -> Result<(ObjectId, usize)> {
    let node = graph.add_node(name);
    graph.add_transform(node, Mat4::from_translation(offset))?;
    let pivot = graph.add_transform(node, Mat4::IDENTITY)?;
    graph.add_transform(
        node,
        Mat4::from_translation(Vec3::new(0.0, -0.4, 0.0)) * Mat4::from_scale(Vec3::new(0.2, 0.8, 0.2)),
    )?;
    graph.add_child(node, mesh)?;
    Ok((node, pivot))
}

pub fn build(graph: &mut SceneGraph, materials: &mut MaterialLibrary) -> Result<Droid> {
    let matte_green = materials.insert(PhongMaterial::new("matte green", 0.2, 0.5, 0.6, 5.0));
    let black_gloss = materials.insert(PhongMaterial::new("black gloss", 0.05, 0.05, 0.9, 5.0));

    let cube = graph.add_leaf("cube (droid)", shapes::cube()?);
    let pyramid = graph.add_leaf("pyramid (droid)", shapes::pyramid()?);

    let root = graph.add_node("droid");
    graph.set_color(root, LinearRgba::rgb(0.2, 1.0, 0.3))?;
    graph.set_identifier(root, DROID_ID)?;
    graph.add_material(root, matte_green)?;

    let body = graph.add_node("body");
    graph.add_transform(body, Mat4::from_scale(Vec3::new(1.0, 1.2, 0.6)))?;
    graph.add_child(body, cube)?;
    graph.add_child(root, body)?;

    let head = graph.add_node("head");
    graph.add_transform(head, Mat4::from_translation(Vec3::new(0.0, 0.6, 0.0)))?;
    let head_turn = graph.add_transform(head, Mat4::IDENTITY)?;
    graph.add_material(head, black_gloss)?;
    graph.add_transform(head, Mat4::from_scale(Vec3::new(0.6, 0.5, 0.6)))?;
    graph.add_child(head, pyramid)?;
    graph.add_child(root, head)?;

    let (left_arm, left_arm_pivot) = limb(graph, "left arm", cube, Vec3::new(-0.65, 0.5, 0.0))?;
    let (right_arm, right_arm_pivot) = limb(graph, "right arm", cube, Vec3::new(0.65, 0.5, 0.0))?;
    let (left_leg, left_leg_pivot) = limb(graph, "left leg", cube, Vec3::new(-0.25, -0.6, 0.0))?;
    let (right_leg, right_leg_pivot) = limb(graph, "right leg", cube, Vec3::new(0.25, -0.6, 0.0))?;
    for part in [left_arm, right_arm, left_leg, right_leg] {
        graph.add_child(root, part)?;
    }

    let mut tracks = TrackSet::new();
    let head_handle = graph.transform_handle(head, head_turn)?;
    tracks.push(TransformTrack::new("head turn", head_handle, |t| {
        Mat4::from_rotation_y(0.8 * (t * 1.5).sin())
    }));

    let swing = |phase: f32| move |t: f32| Mat4::from_rotation_x(0.6 * (t * 3.0 + phase).sin());
    let limbs = [
        ("left arm swing", left_arm, left_arm_pivot, 0.0),
        ("right arm swing", right_arm, right_arm_pivot, std::f32::consts::PI),
        ("left leg swing", left_leg, left_leg_pivot, std::f32::consts::PI),
        ("right leg swing", right_leg, right_leg_pivot, 0.0),
    ];
    for (name, node, pivot, phase) in limbs {
        let handle = graph.transform_handle(node, pivot)?;
        tracks.push(TransformTrack::new(name, handle, swing(phase)));
    }

    log::info!(
        "Built droid with {} animated parameters",
        tracks.tracks().len()
    );
    Ok(Droid { root, tracks })
}
