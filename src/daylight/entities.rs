use std::f32::consts::PI;

use bevy::prelude::*;

const SUNRISE: [u8; 3] = [255, 207, 72];
const SUNSET: [u8; 3] = [246, 71, 71];
const MOONRISE: [u8; 3] = [71, 159, 246];
const MOONSET: [u8; 3] = [116, 72, 255];

/// Marker component for the orbiting directional light.
#[derive(Component, Reflect)]
pub struct Sun;

/// Position within the day/night cycle.
///
/// `period_ms` runs from 0 to `half_day_ms` across one day or one night;
/// exceeding it wraps the period and flips `day`. The cycle starts at noon.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct DayCycle {
    /// Length of one day or night.
    pub half_day_ms: u32,
    /// Time elapsed in the current day or night.
    pub period_ms: u32,
    /// Whether the sun (rather than the moon) is up.
    pub day: bool,
}

/// Light state for one moment of the cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSample {
    /// Light position in terrain coordinates.
    pub position: Vec3,
    /// Light tint, each channel in `[0, 1]`.
    pub color: Color,
    /// Inverse brightness; low overhead, high at the horizon.
    pub attenuation: f32,
}

impl DayCycle {
    /// Noon of the first day.
    pub fn new(half_day_ms: u32) -> Self {
        Self {
            half_day_ms,
            period_ms: half_day_ms / 2,
            day: true,
        }
    }

    /// Advances the cycle by `delta_ms`.
    pub fn tick(&mut self, delta_ms: u32) {
        if self.half_day_ms == 0 {
            return;
        }
        self.period_ms = self.period_ms.saturating_add(delta_ms);
        while self.period_ms > self.half_day_ms {
            self.period_ms -= self.half_day_ms;
            self.day = !self.day;
        }
    }

    /// Whether the sun is up.
    pub fn is_day(&self) -> bool {
        self.day
    }

    /// Orbit angle in radians, `0` at rise and `PI` at set.
    pub fn angle(&self) -> f32 {
        if self.half_day_ms == 0 {
            return 0.0;
        }
        self.period_ms as f32 * PI / self.half_day_ms as f32
    }

    /// Light position, tint and attenuation for an orbit of `radius` around
    /// `center`.
    pub fn sample(&self, center: Vec2, radius: f32) -> LightSample {
        let angle = self.angle();
        let sin = angle.sin();
        let sin4 = sin.powi(4);
        let half = self.half_day_ms / 2;

        let (base, lift, attenuation) = if self.day {
            let am = self.period_ms < half;
            let base = if am { SUNRISE } else { SUNSET };
            (base, sin4, 1.0 / (0.7 * sin4 + 0.01))
        } else {
            let am = self.period_ms > half;
            let base = if am { MOONRISE } else { MOONSET };
            (base, sin, 1.0 / (0.2 * sin4 + 0.01))
        };
        let [r, g, b] = base.map(|c| (c as f32 / 255.0 * (1.0 - sin4) + lift).clamp(0.0, 1.0));

        LightSample {
            position: Vec3::new(
                center.x + radius * angle.cos(),
                center.y,
                radius * sin,
            ),
            color: Color::srgb(r, g, b),
            attenuation,
        }
    }
}
