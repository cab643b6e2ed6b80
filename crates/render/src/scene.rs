use glam::{Mat4, Quat, Vec3};
use orbitview_common::{RenderableId, Transform};

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::resources::{GeometryId, MaterialId};

const LEFT_CUBE: Vec3 = Vec3::new(-1.5, 0.0, 0.0);
const RIGHT_CUBE: Vec3 = Vec3::new(1.5, 0.0, 0.0);
const FLOOR: Vec3 = Vec3::new(0.0, -1.5, 0.0);
const FLOOR_SCALE: Vec3 = Vec3::new(10.0, 0.01, 10.0);

/// The demo scene: two spinning cubes over a flat floor slab.
///
/// The left cube spins about X, the right cube about Y, both at
/// `rotation_speed` degrees per second.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub rotation_speed: f32,
    elapsed: f32,
    left: RenderableId,
    right: RenderableId,
    floor: RenderableId,
}

impl DemoScene {
    /// Create the three renderables in `ctx`.
    pub fn build(
        ctx: &mut RenderContext,
        geometry: GeometryId,
        cube_material: MaterialId,
        floor_material: MaterialId,
    ) -> Result<Self, RenderError> {
        let left = ctx.create_renderable(geometry, cube_material)?;
        let right = ctx.create_renderable(geometry, cube_material)?;
        let floor = ctx.create_renderable(geometry, floor_material)?;
        let scene = Self {
            rotation_speed: 20.0,
            elapsed: 0.0,
            left,
            right,
            floor,
        };
        scene.apply(ctx)?;
        Ok(scene)
    }

    /// Advance the animation clock. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn angle_degrees(&self) -> f32 {
        self.rotation_speed * self.elapsed
    }

    /// Transforms of the left cube, right cube and floor.
    pub fn object_transforms(&self) -> [Transform; 3] {
        let angle = self.angle_degrees().to_radians();
        [
            Transform {
                rotation: Quat::from_rotation_x(angle),
                ..Transform::from_position(LEFT_CUBE)
            },
            Transform {
                rotation: Quat::from_rotation_y(angle),
                ..Transform::from_position(RIGHT_CUBE)
            },
            Transform {
                scale: FLOOR_SCALE,
                ..Transform::from_position(FLOOR)
            },
        ]
    }

    /// Model matrices for left cube, right cube and floor.
    pub fn transforms(&self) -> [Mat4; 3] {
        self.object_transforms().map(|t| t.to_matrix())
    }

    /// Push the current transforms into the context.
    pub fn apply(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let [left, right, floor] = self.transforms();
        ctx.set_transform(self.left, left)?;
        ctx.set_transform(self.right, right)?;
        ctx.set_transform(self.floor, floor)?;
        Ok(())
    }

    pub fn renderables(&self) -> [RenderableId; 3] {
        [self.left, self.right, self.floor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Geometry, Vertex};

    fn scene() -> (RenderContext, DemoScene) {
        let mut ctx = RenderContext::default();
        ctx.register_shader("uber", "");
        let v = Vertex {
            position: [0.0; 3],
            normal: 0,
            tangent: 0,
            uv: [0, 0],
        };
        let geo = ctx.create_geometry(Geometry {
            vertices: vec![v; 3],
            indices: vec![0, 1, 2],
        });
        let textured = ctx.create_material("uber").unwrap();
        let plain = ctx.create_material("uber").unwrap();
        let scene = DemoScene::build(&mut ctx, geo, textured, plain).unwrap();
        (ctx, scene)
    }

    #[test]
    fn build_creates_three_renderables() {
        let (ctx, scene) = scene();
        assert_eq!(ctx.renderables().len(), 3);
        assert_eq!(ctx.render_state_count(), 2);
        assert_eq!(scene.angle_degrees(), 0.0);
    }

    #[test]
    fn cubes_spin_in_place() {
        let (_, mut scene) = scene();
        scene.advance(2.0);
        assert_eq!(scene.angle_degrees(), 40.0);
        let [left, right, _] = scene.transforms();
        let l = left.transform_point3(Vec3::ZERO);
        let r = right.transform_point3(Vec3::ZERO);
        assert!((l - LEFT_CUBE).length() < 1e-5);
        assert!((r - RIGHT_CUBE).length() < 1e-5);
        // The right cube's local +X axis has turned about Y.
        let x_axis = right.transform_vector3(Vec3::X);
        assert!(x_axis.z.abs() > 0.1);
    }

    #[test]
    fn floor_is_flat() {
        let (_, scene) = scene();
        let floor = scene.transforms()[2];
        let top = floor.transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!((top.y - (-1.5 + 0.005)).abs() < 1e-5);
        assert!((top.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn floor_transform_scales_only() {
        let (_, mut scene) = scene();
        scene.advance(3.0);
        let floor = scene.object_transforms()[2];
        assert_eq!(floor.rotation, Quat::IDENTITY);
        assert_eq!(floor.scale, FLOOR_SCALE);
        assert_eq!(floor.position, FLOOR);
    }

    #[test]
    fn advance_ignores_bad_steps() {
        let (_, mut scene) = scene();
        scene.advance(-1.0);
        scene.advance(f32::NAN);
        assert_eq!(scene.elapsed(), 0.0);
    }

    #[test]
    fn apply_updates_context() {
        let (mut ctx, mut scene) = scene();
        scene.advance(1.0);
        scene.apply(&mut ctx).unwrap();
        assert_eq!(ctx.renderables()[1].1.transform, scene.transforms()[1]);
    }
}
