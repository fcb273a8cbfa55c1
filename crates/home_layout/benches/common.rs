#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use home_layout::prelude::{Rect, Room, RoomCategory};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const ROOM_COUNTS: [usize; 4] = [4, 16, 64, 256];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

fn rand01(rng: &mut StdRng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Rooms on a square grid with random categories and jittered sizes.
pub fn random_rooms(count: usize, seed: u64) -> Vec<Room> {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = (count as f32).sqrt().ceil().max(1.0) as usize;
    (0..count)
        .map(|i| {
            let (col, row) = ((i % columns) as f32, (i / columns) as f32);
            let width = 60.0 + rand01(&mut rng) * 80.0;
            let height = 60.0 + rand01(&mut rng) * 80.0;
            let category = RoomCategory::ALL[(rng.next_u32() as usize) % RoomCategory::ALL.len()];
            Room::try_new(
                format!("r{i}"),
                format!("Room {i}"),
                category,
                Rect::new(col * 150.0, row * 150.0, width, height),
            )
            .expect("generated rooms are valid")
        })
        .collect()
}
