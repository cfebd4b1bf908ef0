//! Decorative rising bubbles
//!
//! Purely visual: seeded from the session RNG so replays look the same, but
//! nothing in gameplay reads them.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A single bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub pos: Vec2,
    pub size: f32,
    /// Rise speed in pixels per tick
    pub speed: f32,
    pub opacity: f32,
}

/// Scatter `count` bubbles over the pool
pub fn spawn_bubbles(rng: &mut Pcg32, count: usize, area: Vec2) -> Vec<Bubble> {
    (0..count)
        .map(|_| Bubble {
            pos: Vec2::new(
                rng.random::<f32>() * area.x,
                rng.random::<f32>() * area.y,
            ),
            size: rng.random_range(2.0..10.0),
            speed: rng.random_range(0.5..2.5),
            opacity: rng.random_range(0.3..0.8),
        })
        .collect()
}

/// Rise, sway, and wrap back to the bottom once off the top
pub fn update_bubbles(bubbles: &mut [Bubble], rng: &mut Pcg32, time_secs: f32, area: Vec2) {
    for bubble in bubbles.iter_mut() {
        bubble.pos.y -= bubble.speed;
        bubble.pos.x += (time_secs + bubble.pos.x).sin() * 0.5;

        if bubble.pos.y < -bubble.size {
            bubble.pos.y = area.y + bubble.size;
            bubble.pos.x = rng.random::<f32>() * area.x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        let area = Vec2::new(800.0, 500.0);
        let bubbles = spawn_bubbles(&mut rng, 20, area);
        assert_eq!(bubbles.len(), 20);
        for b in &bubbles {
            assert!(b.pos.x >= 0.0 && b.pos.x <= area.x);
            assert!(b.pos.y >= 0.0 && b.pos.y <= area.y);
            assert!(b.size >= 2.0 && b.size < 10.0);
        }
    }

    #[test]
    fn test_bubble_wraps_to_bottom() {
        let mut rng = Pcg32::seed_from_u64(7);
        let area = Vec2::new(800.0, 500.0);
        let mut bubbles = vec![Bubble {
            pos: Vec2::new(100.0, -4.0),
            size: 4.0,
            speed: 1.0,
            opacity: 0.5,
        }];
        update_bubbles(&mut bubbles, &mut rng, 0.0, area);
        assert_eq!(bubbles[0].pos.y, 504.0);
    }

    #[test]
    fn test_same_seed_same_bubbles() {
        let area = Vec2::new(800.0, 500.0);
        let a = spawn_bubbles(&mut Pcg32::seed_from_u64(3), 5, area);
        let b = spawn_bubbles(&mut Pcg32::seed_from_u64(3), 5, area);
        assert_eq!(a, b);
    }
}
