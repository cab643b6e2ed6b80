use orbitview_common::CameraHandle;
use orbitview_render::{CameraPose, RenderContext};

/// Render context inspector for developer tooling.
///
/// Provides read-only queries against the render context for the UI panel,
/// the CLI and log output.
pub struct RenderInspector;

impl RenderInspector {
    /// Produce a summary of the render context.
    pub fn summary(ctx: &RenderContext) -> RenderSummary {
        let settings = ctx.settings();
        RenderSummary {
            renderer: settings.renderer.name(),
            resolution: (settings.resolution_width, settings.resolution_height),
            vsync: settings.vsync,
            render_states: ctx.render_state_count(),
            buffers: ctx.buffer_count(),
            draw_calls: ctx.draw_calls(),
            cameras: ctx.camera_count(),
            renderables: ctx.renderables().len(),
            systems: ctx.render_systems().to_vec(),
            shaders: ctx.shaders().keys().cloned().collect(),
        }
    }

    /// Pose of a camera, if it still exists.
    pub fn camera_pose(ctx: &RenderContext, camera: CameraHandle) -> Option<CameraPose> {
        ctx.camera(camera).map(|c| c.pose())
    }

    /// One-line description of a camera's pose for logs and overlays.
    pub fn describe_camera(ctx: &RenderContext, camera: CameraHandle) -> String {
        match Self::camera_pose(ctx, camera) {
            Some(pose) => {
                let p = pose.position;
                let t = pose.target;
                format!(
                    "camera eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) distance={:.2}",
                    p.x,
                    p.y,
                    p.z,
                    t.x,
                    t.y,
                    t.z,
                    p.distance(t)
                )
            }
            None => "camera <destroyed>".to_string(),
        }
    }
}

/// Summary of render state for the inspector panel.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub renderer: &'static str,
    pub resolution: (u32, u32),
    pub vsync: bool,
    pub render_states: usize,
    pub buffers: usize,
    pub draw_calls: u32,
    pub cameras: usize,
    pub renderables: usize,
    pub systems: Vec<String>,
    pub shaders: Vec<String>,
}

impl std::fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Render: renderer={} resolution={}x{} vsync={} states={} buffers={} draw_calls={} cameras={} renderables={}",
            self.renderer,
            self.resolution.0,
            self.resolution.1,
            self.vsync,
            self.render_states,
            self.buffers,
            self.draw_calls,
            self.cameras,
            self.renderables
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orbitview_render::{CameraRig, CameraSettings};

    #[test]
    fn summary_empty_context() {
        let ctx = RenderContext::default();
        let summary = RenderInspector::summary(&ctx);
        assert_eq!(summary.renderer, "lit");
        assert_eq!(summary.resolution, (1280, 720));
        assert_eq!(summary.buffers, 0);
        assert!(summary.shaders.is_empty());
    }

    #[test]
    fn summary_lists_systems_and_shaders() {
        let mut ctx = RenderContext::default();
        ctx.register_render_system("grid");
        ctx.register_shader("uber", "");
        ctx.record_draw_calls(4);
        let summary = RenderInspector::summary(&ctx);
        assert_eq!(summary.systems, vec!["grid".to_string()]);
        assert_eq!(summary.shaders, vec!["uber".to_string()]);
        assert!(summary.to_string().contains("draw_calls=4"));
    }

    #[test]
    fn describe_camera_pose() {
        let mut ctx = RenderContext::default();
        let cam = ctx.create_camera(CameraSettings::default());
        ctx.set_camera_pose(cam, Vec3::new(0.0, 3.0, 4.0), Vec3::ZERO)
            .unwrap();
        let text = RenderInspector::describe_camera(&ctx, cam);
        assert!(text.contains("distance=5.00"));
        ctx.destroy_camera(cam);
        assert_eq!(RenderInspector::describe_camera(&ctx, cam), "camera <destroyed>");
    }
}
