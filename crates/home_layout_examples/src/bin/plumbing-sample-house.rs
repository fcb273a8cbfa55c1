use home_layout::domains::plumbing;
use home_layout::prelude::*;
use home_layout_examples::{init_tracing, render_layout_to_png, sample_house, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let rooms = sample_house()?;
    let rules = plumbing::default_rules();
    let generator = LayoutGenerator::<PlumbingFixture>::try_new(LayoutConfig::default(), &rules)?
        .with_router(ChannelRouter::new(12.0));

    let mut skipped = Vec::new();
    let mut sink = FnSink::new(|event| {
        if let LayoutEvent::RoomSkipped { room_id, .. } = event {
            skipped.push(room_id);
        }
    });
    let result = generator.generate_with_events(&rooms, &mut sink);

    for category in [
        ConnectionCategory::WaterSupply,
        ConnectionCategory::HotWater,
        ConnectionCategory::Drainage,
        ConnectionCategory::SoilPipe,
    ] {
        let runs: Vec<_> = result
            .connections
            .iter()
            .filter(|c| c.category == category)
            .collect();
        let length: f32 = runs.iter().map(|c| c.path.length()).sum();
        println!(
            "{:<13} runs: {:>2} | length: {length:>7.1}",
            category.as_str(),
            runs.len()
        );
    }
    println!("dry rooms: {}", skipped.join(", "));

    let config = RenderConfig::fit_rooms((1000, 1000), &rooms);
    render_layout_to_png(&rooms, &result, &config, "plumbing-sample-house.png")?;
    Ok(())
}
