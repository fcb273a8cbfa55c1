use home_layout::domains::electrical;
use home_layout::prelude::*;
use home_layout_examples::{
    init_tracing, render_floor_plan_to_png, render_layout_to_png, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let inputs = FloorPlanInputs::new(40.0, 60.0)
        .with_bedrooms(3)
        .with_bathrooms(2)
        .with_staircase(true)
        .with_facing(Facing::East);
    let plan = generate_floor_plan(&inputs)?;

    for room in &plan.rooms {
        println!(
            "{:<7} {:<16} {:>5.1} x {:>5.1}",
            room.id,
            room.name,
            room.bounds.width(),
            room.bounds.height()
        );
    }

    let config = RenderConfig::fit_rooms((800, 1000), &plan.rooms).with_background([255, 255, 255]);
    render_floor_plan_to_png(&plan, &config, "floorplan.png")?;

    // Floor-plan units are feet; tighten the slot offsets accordingly.
    let layout_config = LayoutConfig::new()
        .with_wall_offsets(2.0, 1.0)
        .with_corner_margin(1.5)
        .with_hub_margin(2.0);
    let rules = electrical::default_rules();
    let result = LayoutGenerator::try_new(layout_config, &rules)?.generate(&plan.rooms);

    render_layout_to_png(&plan.rooms, &result, &config, "floorplan-electrical.png")?;
    Ok(())
}
