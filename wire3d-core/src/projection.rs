/// Camera and integer projection utilities
use nalgebra::Point3;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// A projected point in screen space (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// Camera looking down -Z from a point on the +Z axis
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    /// World-to-screen scale in Q8 (256 = one cell per world unit)
    pub scale: i32,
    /// Horizontal stretch in Q8, for terminals whose cells are taller than wide
    pub aspect: i32,
    /// Distance from the viewer to the origin, in world units
    pub distance: i32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        // fit the 256-unit world into the shorter side
        let scale = width.min(height).max(1) as i32;
        Self {
            width,
            height,
            scale,
            aspect: 256,
            distance: 256,
            mode: ProjectionMode::Orthographic,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_aspect(mut self, aspect: i32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Project a view-space point to screen space
    pub fn project(&self, point: &Point3<i32>) -> ScreenPoint {
        let scale = i64::from(self.scale);
        let (mut x, mut y) = (i64::from(point.x) * scale, i64::from(point.y) * scale);

        if self.mode == ProjectionMode::Perspective {
            // points at or behind the viewer collapse onto the nearest plane
            let distance = i64::from(self.distance);
            let depth = (distance - i64::from(point.z)).max(1);
            x = x * distance / depth;
            y = y * distance / depth;
        }

        let x = (x * i64::from(self.aspect)) >> 16;
        let y = y >> 8;

        ScreenPoint {
            x: self.width as i32 / 2 + x as i32,
            y: self.height as i32 / 2 - y as i32,
        }
    }

    /// Project every point, keeping the mesh's vertex indexing
    pub fn project_all(&self, points: &[Point3<i32>], out: &mut Vec<ScreenPoint>) {
        out.clear();
        out.extend(points.iter().map(|point| self.project(point)));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(256, 256)
    }
}
