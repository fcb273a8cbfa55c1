use std::fs;

use anyhow::Context;
use home_layout::domains::{electrical, plumbing};
use home_layout::prelude::*;
use home_layout_examples::{init_tracing, render_layout_to_png, RenderConfig};

const DEFAULT_PLAN: &str = r##"{
  "name": "Two bedroom flat",
  "rooms": [
    { "id": "living", "name": "Living", "type": "living", "x": 0, "y": 0, "width": 220, "height": 160, "color": "#fef3c7" },
    { "id": "kitchen", "name": "Kitchen", "type": "kitchen", "x": 220, "y": 0, "width": 120, "height": 160 },
    { "id": "entry", "name": "Entrance", "type": "entrance", "x": 0, "y": 160, "width": 80, "height": 60 },
    { "id": "bath", "name": "Bathroom", "type": "bathroom", "x": 80, "y": 160, "width": 80, "height": 60 },
    { "id": "util", "name": "Utility", "type": "utility", "x": 160, "y": 160, "width": 180, "height": 60 },
    { "id": "bed1", "name": "Bedroom 1", "type": "bedroom", "x": 0, "y": 220, "width": 170, "height": 150 },
    { "id": "bed2", "name": "Bedroom 2", "type": "bedroom", "x": 170, "y": 220, "width": 170, "height": 150 }
  ]
}"##;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let json = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => DEFAULT_PLAN.to_string(),
    };
    let plan = FloorPlan::from_json_str(&json)?;
    println!(
        "{}: {} rooms, {:.0} sq units",
        plan.name,
        plan.rooms.len(),
        plan.total_area()
    );

    let config = RenderConfig::fit_rooms((1000, 1000), &plan.rooms);

    let electrical_rules = electrical::default_rules();
    let wiring = LayoutGenerator::try_new(LayoutConfig::default(), &electrical_rules)?
        .generate_plan(&plan);
    render_layout_to_png(&plan.rooms, &wiring, &config, "json-floorplan-electrical.png")?;

    let plumbing_rules = plumbing::default_rules();
    let piping = LayoutGenerator::try_new(LayoutConfig::default(), &plumbing_rules)?
        .generate_plan(&plan);
    render_layout_to_png(&plan.rooms, &piping, &config, "json-floorplan-plumbing.png")?;

    for (domain, stats) in [("electrical", &wiring.stats), ("plumbing", &piping.stats)] {
        println!(
            "{domain:<10} components: {:>3} | connections: {:>3} | skipped rooms: {}",
            stats.components, stats.connections, stats.rooms_skipped
        );
    }
    Ok(())
}
