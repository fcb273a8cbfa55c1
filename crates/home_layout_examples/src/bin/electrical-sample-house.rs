use home_layout::domains::electrical;
use home_layout::prelude::*;
use home_layout_examples::{init_tracing, render_layout_to_png, sample_rooms, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rooms = sample_rooms()?;
    let rules = electrical::default_rules();
    let generator = LayoutGenerator::try_new(LayoutConfig::default(), &rules)?;

    let mut sink = VecSink::new();
    let result = generator.generate_with_events(&rooms, &mut sink);

    for conn in &result.connections {
        println!(
            "{:<8} {:>12} -> {:<12} {:<8} {:>5.1}A  {}",
            conn.id,
            conn.from,
            conn.to,
            conn.category.as_str(),
            conn.capacity,
            conn.path.to_svg_path()
        );
    }
    println!(
        "components: {} | connections: {} | load: {:.0}A | events: {}",
        result.stats.components,
        result.stats.connections,
        result.stats.total_load,
        sink.len()
    );

    let config = RenderConfig::fit_rooms((800, 600), &rooms).with_line_scale(2);
    render_layout_to_png(&rooms, &result, &config, "electrical-sample-house.png")?;
    Ok(())
}
