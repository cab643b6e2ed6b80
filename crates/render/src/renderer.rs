use orbitview_common::CameraHandle;

use crate::context::RenderContext;
use crate::error::RenderError;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the context and draws it through one camera. It never
/// changes camera poses; those belong to whoever drives the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `ctx` as seen from `camera`.
    fn render(&mut self, ctx: &RenderContext, camera: CameraHandle) -> Result<Self::Output, RenderError>;
}

/// Headless renderer that describes the frame as text.
///
/// Used by the CLI and by tests that need a renderer without a GPU.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&mut self, ctx: &RenderContext, camera: CameraHandle) -> Result<String, RenderError> {
        let cam = ctx
            .camera(camera)
            .ok_or(RenderError::CameraNotFound(camera))?;
        self.frames += 1;

        let settings = ctx.settings();
        let pose = cam.pose();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (renderer={}, {}x{}) ===\n",
            self.frames,
            settings.renderer.name(),
            settings.resolution_width,
            settings.resolution_height
        ));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2})\n",
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.target.x,
            pose.target.y,
            pose.target.z
        ));
        out.push_str(&format!("Renderables: {}\n", ctx.renderables().len()));

        for (id, r) in ctx.renderables() {
            let p = r.transform.transform_point3(glam::Vec3::ZERO);
            out.push_str(&format!(
                "  [{:.8}] geometry={} material={} pos=({:.2}, {:.2}, {:.2})\n",
                &id.0.to_string()[..8],
                r.geometry.0,
                r.material.0,
                p.x,
                p.y,
                p.z
            ));
        }
        for line in ctx.debug_text() {
            out.push_str(&format!("  text@{},{}: {}\n", line.x, line.y, line.text));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraRig, CameraSettings};
    use glam::Vec3;

    #[test]
    fn text_renderer_empty_context() {
        let mut ctx = RenderContext::default();
        let cam = ctx.create_camera(CameraSettings::default());
        let mut renderer = TextRenderer::new();
        let output = renderer.render(&ctx, cam).unwrap();

        assert!(output.contains("Frame 1"));
        assert!(output.contains("renderer=lit"));
        assert!(output.contains("Renderables: 0"));
        assert!(output.contains("eye=(0.00, 0.00, -5.00)"));
    }

    #[test]
    fn text_renderer_reflects_pose_writes() {
        let mut ctx = RenderContext::default();
        let cam = ctx.create_camera(CameraSettings::default());
        ctx.set_camera_pose(cam, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO)
            .unwrap();
        ctx.submit_debug_text(1, 1, "hello");
        let mut renderer = TextRenderer::new();
        let output = renderer.render(&ctx, cam).unwrap();
        assert!(output.contains("eye=(1.00, 2.00, 3.00)"));
        assert!(output.contains("hello"));
    }

    #[test]
    fn unknown_camera_fails() {
        let ctx = RenderContext::default();
        let mut renderer = TextRenderer::new();
        let err = renderer.render(&ctx, CameraHandle::new());
        assert!(matches!(err, Err(RenderError::CameraNotFound(_))));
        assert_eq!(renderer.frames(), 0);
    }
}
