//! World geometry registry
//!
//! Static obstacle rectangles classified as ground, platform or hazard.
//! Populated once at level construction; queries are linear scans.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Obstacle classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Grass floor tiles
    Ground,
    /// Stone platform segments
    Platform,
    /// Spikes
    Hazard,
}

/// A static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub bounds: Rect,
    pub kind: ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size()
    }

    /// Platforms and hazards block horizontal movement; ground does not
    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, ObstacleKind::Platform | ObstacleKind::Hazard)
    }
}

/// All static obstacles of a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    obstacles: Vec<Obstacle>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle, returning its index
    pub fn add_obstacle(&mut self, bounds: Rect, kind: ObstacleKind) -> usize {
        self.obstacles.push(Obstacle { bounds, kind });
        self.obstacles.len() - 1
    }

    pub fn obstacles_of_kind(&self, kind: ObstacleKind) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter().filter(move |o| o.kind == kind)
    }

    pub fn all_obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Number of obstacles of each kind (ground, platform, hazard)
    pub fn counts(&self) -> (usize, usize, usize) {
        self.obstacles.iter().fold((0, 0, 0), |(g, p, h), o| match o.kind {
            ObstacleKind::Ground => (g + 1, p, h),
            ObstacleKind::Platform => (g, p + 1, h),
            ObstacleKind::Hazard => (g, p, h + 1),
        })
    }

    /// True if any obstacle contains `point` (edges included)
    pub fn occludes(&self, point: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.bounds.contains_point(point))
    }

    /// True if any hazard overlaps `bounds`
    pub fn hazard_overlaps(&self, bounds: &Rect) -> bool {
        self.obstacles_of_kind(ObstacleKind::Hazard)
            .any(|o| o.bounds.overlaps(bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Rect {
        Rect::from_center_size(Vec2::new(x, y), Vec2::splat(48.0))
    }

    #[test]
    fn test_add_and_filter_by_kind() {
        let mut geo = Geometry::new();
        assert!(geo.is_empty());
        geo.add_obstacle(tile(0.0, 0.0), ObstacleKind::Ground);
        geo.add_obstacle(tile(48.0, 0.0), ObstacleKind::Platform);
        geo.add_obstacle(tile(96.0, 0.0), ObstacleKind::Platform);
        let idx = geo.add_obstacle(tile(144.0, 0.0), ObstacleKind::Hazard);

        assert_eq!(idx, 3);
        assert_eq!(geo.len(), 4);
        assert_eq!(geo.obstacles_of_kind(ObstacleKind::Platform).count(), 2);
        assert_eq!(geo.counts(), (1, 2, 1));
        assert_eq!(geo.all_obstacles()[3].kind, ObstacleKind::Hazard);
    }

    #[test]
    fn test_occludes_any_kind() {
        let mut geo = Geometry::new();
        geo.add_obstacle(tile(0.0, 0.0), ObstacleKind::Ground);
        assert!(geo.occludes(Vec2::new(24.0, 0.0)));
        assert!(!geo.occludes(Vec2::new(25.0, 0.0)));
    }

    #[test]
    fn test_hazard_overlap_ignores_other_kinds() {
        let mut geo = Geometry::new();
        geo.add_obstacle(tile(0.0, 0.0), ObstacleKind::Platform);
        let probe = tile(10.0, 0.0);
        assert!(!geo.hazard_overlaps(&probe));
        geo.add_obstacle(tile(40.0, 0.0), ObstacleKind::Hazard);
        assert!(geo.hazard_overlaps(&probe));
    }
}
