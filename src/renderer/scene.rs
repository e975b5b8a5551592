//! Procedural drawing of a game frame
//!
//! Every shape is a handful of filled rectangles. Drawing is pure output:
//! nothing here reads a clock or touches simulation state.

use super::color::Palette;
use super::surface::Surface;
use crate::consts::*;
use crate::sim::{Obstacle, SimState};

/// Spacing of the decorative ground dashes
const DASH_SPACING: f32 = 20.0;
/// Runner sprite is drawn this far right of its hitbox
const SPRITE_OFFSET: f32 = 6.0;
/// Frames per leg pose
const STRIDE_PERIOD: u64 = 10;

/// Cactus silhouette
const SEGMENTS: u32 = 3;
const SEGMENT_WIDTH: f32 = 8.0;
const SEGMENT_GAP: f32 = 4.0;
const SPIKE_WIDTH: f32 = 4.0;
const SPIKE_HEIGHT: f32 = 8.0;

/// Draws frames with a fixed palette
#[derive(Debug, Clone, Copy, Default)]
pub struct Painter {
    pub palette: Palette,
}

impl Painter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Redraw the whole frame: backdrop, player, then obstacles
    pub fn draw_frame<S: Surface>(&self, surface: &mut S, state: &SimState) {
        self.draw_backdrop(surface);
        self.draw_player(surface, state.player.y, state.tick_count, state.player.airborne);
        self.draw_obstacles(surface, &state.obstacles);
    }

    /// Clear the surface and paint sky, ground line and ground dashes
    pub fn draw_backdrop<S: Surface>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        surface.clear_rect(0.0, 0.0, width, height);

        surface.set_fill(self.palette.background);
        surface.fill_rect(0.0, 0.0, width, height);

        surface.set_fill(self.palette.ink);
        surface.fill_rect(0.0, GROUND_Y, width, 2.0);

        // Fixed pattern, does not scroll with the world
        let mut x = 0.0;
        while x < width {
            surface.fill_rect(x, GROUND_Y + 10.0, 2.0, 2.0);
            x += DASH_SPACING;
        }
    }

    /// Draw the runner with its top edge at `y`.
    ///
    /// Legs alternate every few frames while on the ground and freeze in the
    /// air.
    pub fn draw_player<S: Surface>(&self, surface: &mut S, y: f32, frame: u64, airborne: bool) {
        let x = PLAYER_X + SPRITE_OFFSET;
        surface.set_fill(self.palette.ink);

        // Head and body
        surface.fill_rect(x, y, 22.0, 22.0);
        surface.fill_rect(x, y + 22.0, 28.0, 16.0);
        // Legs
        surface.fill_rect(x + 15.0, y + 38.0, 8.0, 5.0);
        surface.fill_rect(x + 25.0, y + 38.0, 8.0, 5.0);
        // Eye and mouth
        surface.fill_rect(x + 17.0, y + 6.0, 5.0, 5.0);
        surface.fill_rect(x + 13.0, y + 10.0, 6.0, 3.0);

        if stride_raised(frame, airborne) {
            surface.clear_rect(x + 15.0, y + 38.0, 8.0, 5.0);
            surface.fill_rect(x + 15.0, y + 35.0, 8.0, 3.0);
        }
    }

    /// Draw every obstacle as a row of spiked segments
    pub fn draw_obstacles<S: Surface>(&self, surface: &mut S, obstacles: &[Obstacle]) {
        surface.set_fill(self.palette.ink);
        for obstacle in obstacles {
            self.draw_obstacle(surface, obstacle);
        }
    }

    fn draw_obstacle<S: Surface>(&self, surface: &mut S, obstacle: &Obstacle) {
        let top = obstacle.top();
        for i in 0..SEGMENTS {
            let sx = obstacle.x + i as f32 * (SEGMENT_WIDTH + SEGMENT_GAP);
            surface.fill_rect(sx, top, SEGMENT_WIDTH, obstacle.height);
            surface.fill_rect(sx + 2.0, top - SPIKE_HEIGHT, SPIKE_WIDTH, SPIKE_HEIGHT);
        }
    }
}

/// Back leg lifted on the first half of every stride period
pub fn stride_raised(frame: u64, airborne: bool) -> bool {
    !airborne && frame % STRIDE_PERIOD < STRIDE_PERIOD / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawCall, RecordingSurface};

    #[test]
    fn test_backdrop_clears_then_fills() {
        let mut surface = RecordingSurface::new();
        Painter::default().draw_backdrop(&mut surface);

        assert_eq!(
            surface.calls[0],
            DrawCall::Clear { x: 0.0, y: 0.0, w: 800.0, h: 200.0 }
        );
        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(fills[0], (0.0, 0.0, 800.0, 200.0));
        assert_eq!(fills[1], (0.0, 180.0, 800.0, 2.0));
        // One dash per 20 units across 800
        assert_eq!(fills.len(), 2 + 40);
        assert_eq!(fills[2], (0.0, 190.0, 2.0, 2.0));
        assert_eq!(fills[41], (780.0, 190.0, 2.0, 2.0));
    }

    #[test]
    fn test_stride_alternates_on_ground() {
        assert!(stride_raised(0, false));
        assert!(stride_raised(4, false));
        assert!(!stride_raised(5, false));
        assert!(!stride_raised(9, false));
        assert!(stride_raised(10, false));
    }

    #[test]
    fn test_stride_frozen_in_air() {
        for frame in 0..20 {
            assert!(!stride_raised(frame, true));
        }
    }

    #[test]
    fn test_player_raised_leg_draws_extra_rects() {
        let painter = Painter::default();

        let mut raised = RecordingSurface::new();
        painter.draw_player(&mut raised, PLAYER_GROUND_Y, 0, false);
        let mut planted = RecordingSurface::new();
        painter.draw_player(&mut planted, PLAYER_GROUND_Y, 5, false);

        assert_eq!(planted.calls.len(), 6);
        assert_eq!(raised.calls.len(), 8);
        assert!(matches!(raised.calls[6], DrawCall::Clear { x, .. } if x == 81.0));
    }

    #[test]
    fn test_obstacle_silhouette() {
        let mut surface = RecordingSurface::new();
        let obstacle = Obstacle { x: 400.0, ..Obstacle::spawn() };
        Painter::default().draw_obstacles(&mut surface, &[obstacle]);

        let fills: Vec<_> = surface.fills().collect();
        assert_eq!(
            fills,
            vec![
                (400.0, 140.0, 8.0, 40.0),
                (402.0, 132.0, 4.0, 8.0),
                (412.0, 140.0, 8.0, 40.0),
                (414.0, 132.0, 4.0, 8.0),
                (424.0, 140.0, 8.0, 40.0),
                (426.0, 132.0, 4.0, 8.0),
            ]
        );
    }

    #[test]
    fn test_frame_order_backdrop_player_obstacles() {
        let mut state = SimState::new();
        state.obstacles.push(Obstacle { x: 500.0, ..Obstacle::spawn() });
        state.tick_count = 7;

        let mut surface = RecordingSurface::new();
        Painter::default().draw_frame(&mut surface, &state);

        let fills: Vec<_> = surface.fills().collect();
        let player_body = fills.iter().position(|f| *f == (66.0, 137.0, 22.0, 22.0)).unwrap();
        let obstacle = fills.iter().position(|f| *f == (500.0, 140.0, 8.0, 40.0)).unwrap();
        let last_dash = fills.iter().position(|f| *f == (780.0, 190.0, 2.0, 2.0)).unwrap();
        assert!(last_dash < player_body);
        assert!(player_body < obstacle);
    }

    #[test]
    fn test_drawing_is_deterministic() {
        let mut state = SimState::new();
        state.obstacles.push(Obstacle { x: 123.0, ..Obstacle::spawn() });

        let mut a = RecordingSurface::new();
        let mut b = RecordingSurface::new();
        Painter::default().draw_frame(&mut a, &state);
        Painter::default().draw_frame(&mut b, &state);
        assert_eq!(a.calls, b.calls);
    }
}
