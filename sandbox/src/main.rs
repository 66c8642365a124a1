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

// Arbor Sandbox
// Headless demo of the scene graph: animation, frame passes and picking.

mod droid;
mod shapes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use arbor_core::{LinearRgba, Mat4, MaterialLibrary, PhongMaterial, RenderPipeline, RenderSettings, Vec3};
use arbor_scene::{Animator, FrameRenderer, RecordingPipeline, SceneGraph, Selector};
use clap::Parser;

const VIEWPORT: u32 = 64;
const HALF_EXTENT: f32 = 4.0;

#[derive(Debug, Parser)]
#[command(about = "Renders an animated articulated figure headlessly and picks it by colour")]
struct Args {
    /// RON file with render settings; defaults are used when absent.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Seconds between two frames.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Window column of the click (defaults to the viewport centre).
    #[arg(long)]
    pick_x: Option<u32>,

    /// Window row of the click (defaults to the viewport centre).
    #[arg(long)]
    pick_y: Option<u32>,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => RenderSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    let mut materials = MaterialLibrary::new();
    let default_material = materials.insert(PhongMaterial::default());

    let mut graph = SceneGraph::new();
    let world = graph.add_node("world");

    let droid = droid::build(&mut graph, &mut materials)?;
    graph.add_child(world, droid.root)?;

    let crate_box = graph.add_node("crate");
    graph.add_transform(crate_box, Mat4::from_translation(Vec3::new(2.8, -1.0, 0.0)))?;
    let crate_mesh = graph.add_leaf("cube (crate)", shapes::cube()?);
    graph.add_child(crate_box, crate_mesh)?;
    graph.set_color(crate_box, LinearRgba::rgb(0.6, 0.4, 0.2))?;
    graph.set_identifier(crate_box, 2)?;
    graph.set_click_handler(crate_box, |event| {
        log::info!("The crate was clicked; its centre is at {:?}", event.world_center);
        true
    })?;
    graph.add_child(world, crate_box)?;

    let mut animator = Animator::new(droid.tracks);
    let renderer = FrameRenderer::new(settings).with_initial_material(default_material);
    let projection = Mat4::orthographic_rh_zo(
        -HALF_EXTENT,
        HALF_EXTENT,
        -HALF_EXTENT,
        HALF_EXTENT,
        -10.0,
        10.0,
    );
    let mut pipeline = RecordingPipeline::with_target(VIEWPORT, VIEWPORT, projection);

    for frame in 0..args.frames {
        animator.advance(&mut graph, args.dt)?;
        pipeline.clear(LinearRgba::rgb(0.1, 0.1, 0.12));
        renderer.render_frame(&graph, world, &mut pipeline)?;
        let commands = pipeline.take_commands();
        log::debug!("Frame {}: {} commands recorded", frame, commands.len());
    }

    // Interactive-style edits: pick the next parameter and push it forward.
    animator.cycle_active(1);
    animator.nudge_active(&mut graph, 5)?;

    let x = args.pick_x.unwrap_or(VIEWPORT / 2);
    let y = args.pick_y.unwrap_or(VIEWPORT / 2);
    match Selector::new(&renderer).select(&mut graph, world, &mut pipeline, x, y)? {
        Some(selection) => log::info!(
            "Picked '{}' at ({}, {}), centre {:?}",
            graph.name(selection.object)?,
            x,
            y,
            selection.world_center
        ),
        None => log::info!("Nothing picked at ({}, {})", x, y),
    }

    if !pipeline.is_balanced() {
        log::warn!(
            "Unbalanced pipeline stacks: model {:?}, color {:?}, material {:?}",
            pipeline.model_counts(),
            pipeline.color_counts(),
            pipeline.material_counts()
        );
    }
    log::info!(
        "Rendered {} frames; lighting {}",
        args.frames,
        if pipeline.lighting_enabled() { "on" } else { "off" }
    );

    let dropped = graph.retain_reachable(&[world]);
    log::info!("{} objects live, {} unreachable dropped", graph.len(), dropped);
    Ok(())
}
