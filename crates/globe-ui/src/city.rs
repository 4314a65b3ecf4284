//! Street-level city shown once the camera lands on a point of interest.
//!
//! An 11 x 11 grid of towers on 20-unit blocks, each 15 units square and 20
//! to 80 units tall with a window strip every 4 units, plus a row of street
//! lights along `z = 20`. Heights come from a seeded RNG so the same point
//! always shows the same skyline.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Blocks either side of the center, so the grid spans `-5..=5`.
pub const GRID_HALF_EXTENT: i32 = 5;
pub const BLOCK_SPACING: f32 = 20.0;
pub const BUILDING_FOOTPRINT: f32 = 15.0;
pub const MIN_BUILDING_HEIGHT: f32 = 20.0;
pub const MAX_BUILDING_HEIGHT: f32 = 80.0;
/// Vertical pitch of the window strips.
pub const FLOOR_HEIGHT: f32 = 4.0;
pub const STREET_LIGHT_COUNT: usize = 20;
/// Side length of the square street plane.
pub const GROUND_EXTENT: f32 = 1000.0;

const STREET_LIGHT_SPACING: f32 = 10.0;
const STREET_LIGHT_START_X: f32 = -100.0;
const STREET_LIGHT_ROW_Z: f32 = 20.0;
const LAMP_HEIGHT: f32 = 5.0;
const LAMP_RANGE: f32 = 15.0;
/// Windows sit just proud of the +X facade.
const WINDOW_INSET: f32 = 7.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub grid_x: i32,
    pub grid_z: i32,
    pub height: f32,
}

impl Building {
    /// Center of the box; the base rests on the street plane.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.grid_x as f32 * BLOCK_SPACING,
            self.height / 2.0,
            self.grid_z as f32 * BLOCK_SPACING,
        )
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(BUILDING_FOOTPRINT, self.height, BUILDING_FOOTPRINT)
    }

    pub fn window_count(&self) -> u32 {
        (self.height / FLOOR_HEIGHT).floor() as u32
    }

    /// Window strip centers relative to [`center`](Self::center), bottom up.
    pub fn windows(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.window_count()).map(move |i| {
            Vec3::new(
                WINDOW_INSET,
                -self.height / 2.0 + 2.0 + i as f32 * FLOOR_HEIGHT,
                0.0,
            )
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreetLight {
    /// Foot of the pole.
    pub base: Vec3,
}

impl StreetLight {
    pub fn lamp(&self) -> Vec3 {
        self.base + Vec3::Y * LAMP_HEIGHT
    }

    /// Distance at which the lamp's light falls to zero.
    pub fn range(&self) -> f32 {
        LAMP_RANGE
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImmersiveCity {
    buildings: Vec<Building>,
    street_lights: Vec<StreetLight>,
}

impl ImmersiveCity {
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut buildings = Vec::new();
        for grid_x in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
            for grid_z in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
                buildings.push(Building {
                    grid_x,
                    grid_z,
                    height: rng.random_range(MIN_BUILDING_HEIGHT..MAX_BUILDING_HEIGHT),
                });
            }
        }

        let street_lights = (0..STREET_LIGHT_COUNT)
            .map(|i| StreetLight {
                base: Vec3::new(
                    STREET_LIGHT_START_X + i as f32 * STREET_LIGHT_SPACING,
                    0.0,
                    STREET_LIGHT_ROW_Z,
                ),
            })
            .collect();

        tracing::debug!(seed, buildings = buildings.len(), "city generated");
        Self {
            buildings,
            street_lights,
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn street_lights(&self) -> &[StreetLight] {
        &self.street_lights
    }

    pub fn building_at(&self, grid_x: i32, grid_z: i32) -> Option<&Building> {
        self.buildings
            .iter()
            .find(|b| b.grid_x == grid_x && b.grid_z == grid_z)
    }

    /// Windows across every building.
    pub fn window_count(&self) -> u32 {
        self.buildings.iter().map(Building::window_count).sum()
    }

    pub fn tallest(&self) -> f32 {
        self.buildings
            .iter()
            .map(|b| b.height)
            .fold(0.0, f32::max)
    }
}
