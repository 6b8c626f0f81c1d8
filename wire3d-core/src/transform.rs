/// Fixed-point rotation of mesh vertices and rotation state
use nalgebra::Point3;

use crate::geometry::Mesh;

/// Fractional bits of the sine table
pub const SIN_SHIFT: u32 = 14;

/// sin(i / 256 turn) in Q14 for the first quarter wave, i = 0..=64
const QUARTER_SINE: [i32; 65] = [
    0, 402, 804, 1205, 1606, 2006, 2404, 2801, 3196, 3590, 3981, 4370, 4756, 5139, 5520, 5897,
    6270, 6639, 7005, 7366, 7723, 8076, 8423, 8765, 9102, 9434, 9760, 10080, 10394, 10702, 11003,
    11297, 11585, 11866, 12140, 12406, 12665, 12916, 13160, 13395, 13623, 13842, 14053, 14256,
    14449, 14635, 14811, 14978, 15137, 15286, 15426, 15557, 15679, 15791, 15893, 15986, 16069,
    16143, 16207, 16261, 16305, 16340, 16364, 16379, 16384,
];

/// A binary angle: 256 steps per full turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Angle(pub u8);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER: Angle = Angle(64);
    pub const HALF: Angle = Angle(128);

    pub fn wrapping_add(self, delta: i8) -> Self {
        Angle(self.0.wrapping_add_signed(delta))
    }

    /// Sine in Q14
    pub fn sin(self) -> i32 {
        let step = usize::from(self.0);
        match step {
            0..=64 => QUARTER_SINE[step],
            65..=128 => QUARTER_SINE[128 - step],
            129..=192 => -QUARTER_SINE[step - 128],
            _ => -QUARTER_SINE[256 - step],
        }
    }

    /// Cosine in Q14
    pub fn cos(self) -> i32 {
        Angle(self.0.wrapping_add(64)).sin()
    }
}

/// Rotation state around three axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    pub x: Angle,
    pub y: Angle,
    pub z: Angle,
}

impl RotationState {
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        Self {
            x: Angle(x),
            y: Angle(y),
            z: Angle(z),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta steps, wrapping at a full turn
    pub fn rotate(&mut self, dx: i8, dy: i8, dz: i8) {
        self.x = self.x.wrapping_add(dx);
        self.y = self.y.wrapping_add(dy);
        self.z = self.z.wrapping_add(dz);
    }
}

/// Integer-only point transforms
pub struct Transform;

impl Transform {
    /// Rotate a point around X, then Y, then Z
    pub fn rotate_point(point: &Point3<i32>, rotation: &RotationState) -> Point3<i32> {
        let (x, y, z) = (point.x, point.y, point.z);

        let (s, c) = (rotation.x.sin(), rotation.x.cos());
        let (y, z) = (fixed(y * c - z * s), fixed(y * s + z * c));

        let (s, c) = (rotation.y.sin(), rotation.y.cos());
        let (x, z) = (fixed(x * c + z * s), fixed(z * c - x * s));

        let (s, c) = (rotation.z.sin(), rotation.z.cos());
        let (x, y) = (fixed(x * c - y * s), fixed(x * s + y * c));

        Point3::new(x, y, z)
    }

    /// Rotate every vertex of `mesh` into `out`, indexed like the mesh
    pub fn rotate_mesh(mesh: &Mesh<'_>, rotation: &RotationState, out: &mut Vec<Point3<i32>>) {
        out.clear();
        out.extend(
            mesh.vertices()
                .iter()
                .map(|vertex| Self::rotate_point(&vertex.to_point(), rotation)),
        );
    }
}

/// Drop the Q14 fraction, rounding to nearest
fn fixed(value: i32) -> i32 {
    (value + (1 << (SIN_SHIFT - 1))) >> SIN_SHIFT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, Angle::ZERO);

        state.rotate(10, -1, 0);
        assert_eq!(state, RotationState::new(10, 255, 0));

        state.rotate(-20, 1, 0);
        assert_eq!(state, RotationState::new(246, 0, 0));
    }

    #[test]
    fn test_sine_quadrants() {
        assert_eq!(Angle::ZERO.sin(), 0);
        assert_eq!(Angle::QUARTER.sin(), 1 << SIN_SHIFT);
        assert_eq!(Angle::HALF.sin(), 0);
        assert_eq!(Angle(192).sin(), -(1 << SIN_SHIFT));
        assert_eq!(Angle::ZERO.cos(), 1 << SIN_SHIFT);
        assert_eq!(Angle::HALF.cos(), -(1 << SIN_SHIFT));
        assert_eq!(Angle(32).sin(), Angle(32).cos());
        assert_eq!(Angle(224).sin(), -Angle(32).sin());
    }

    #[test]
    fn test_identity_rotation() {
        let point = Point3::new(-32, 96, 17);
        assert_eq!(Transform::rotate_point(&point, &RotationState::zero()), point);
    }

    #[test]
    fn test_quarter_turns() {
        let point = Point3::new(10, 20, 30);

        let about_z = RotationState::new(0, 0, 64);
        assert_eq!(Transform::rotate_point(&point, &about_z), Point3::new(-20, 10, 30));

        let about_x = RotationState::new(64, 0, 0);
        assert_eq!(Transform::rotate_point(&point, &about_x), Point3::new(10, -30, 20));

        let about_y = RotationState::new(0, 64, 0);
        assert_eq!(Transform::rotate_point(&point, &about_y), Point3::new(30, 20, -10));
    }

    #[test]
    fn test_rotate_mesh_keeps_indexing() {
        let cube = Mesh::cube();
        let mut out = Vec::new();
        Transform::rotate_mesh(&cube, &RotationState::new(0, 128, 0), &mut out);
        assert_eq!(out.len(), cube.vertex_count());
        // half turn about Y mirrors x and z
        assert_eq!(out[0], Point3::new(32, 32, -32));
        assert_eq!(out[6], Point3::new(-32, -32, 32));
    }
}
