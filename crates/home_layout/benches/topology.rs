mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use home_layout::domains::electrical;
use home_layout::prelude::{
    build_connections_with_events, place_components, ChannelRouter, ElbowRouter, LayoutConfig,
    PathRouter,
};

fn topology_benches(c: &mut Criterion) {
    let rules = electrical::default_rules();
    let config = LayoutConfig::default();
    let channel = ChannelRouter::new(20.0);
    let routers: [(&str, &dyn PathRouter); 2] = [("elbow", &ElbowRouter), ("channel", &channel)];

    for (name, router) in routers {
        let mut group = c.benchmark_group(format!("topology/{name}"));

        for &count in &common::ROOM_COUNTS {
            let rooms = common::random_rooms(count, 0x70B0 ^ count as u64);
            let components = place_components(&rooms, &rules, &config);
            let expected = build_connections_with_events(&components, router, &mut ()).len();
            group.throughput(common::elements_throughput(expected));

            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let connections =
                        build_connections_with_events(black_box(&components), router, &mut ());
                    black_box(connections.len());
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = topology_benches
}
criterion_main!(benches);
