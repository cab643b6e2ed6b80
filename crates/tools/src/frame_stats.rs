use orbitview_render::{RenderContext, TextColor};

/// Frames between samples of the displayed numbers, so they stay readable.
const SAMPLE_INTERVAL: u64 = 10;

/// Frame timing sampled every few frames for the debug overlay.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u64,
    fps: f32,
    frame_ms: f32,
    highest_ms: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `dt` seconds.
    pub fn record(&mut self, dt: f32) {
        self.frames += 1;
        if self.frames % SAMPLE_INTERVAL != 0 || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.fps = 1.0 / dt;
        self.frame_ms = 1000.0 * dt;
        if self.frame_ms > self.highest_ms {
            self.highest_ms = self.frame_ms;
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    /// Slowest sampled frame since start.
    pub fn highest_ms(&self) -> f32 {
        self.highest_ms
    }

    /// Overlay lines, top to bottom.
    pub fn lines(&self, draw_calls: u32, texture_mib: f32) -> Vec<String> {
        vec![
            format!(
                "cpu(application):  {:.2} ms [{:.2} ms]",
                self.frame_ms, self.highest_ms
            ),
            format!("draw calls:        {draw_calls}"),
            format!("framerate:         {:.2} fps", self.fps),
            format!("textures:          {texture_mib:.2} MiB"),
        ]
    }

    /// Queue the overlay into `ctx` at character cell (`x`, `y`).
    ///
    /// A red warning is added to the left when more than `mesh_budget`
    /// renderables are queued.
    pub fn submit_overlay(&self, ctx: &mut RenderContext, x: u16, y: u16, mesh_budget: usize) {
        let texture_bytes: usize = ctx.textures().iter().map(|t| t.size_bytes()).sum();
        let texture_mib = texture_bytes as f32 / (1024.0 * 1024.0);
        for (row, line) in self.lines(ctx.draw_calls(), texture_mib).into_iter().enumerate() {
            ctx.submit_debug_text(x, y + row as u16, line);
        }
        if ctx.renderables().len() > mesh_budget {
            ctx.submit_debug_text_colored(x.saturating_sub(20), y, TextColor::Red, "Too many meshes!!");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitview_render::Geometry;

    #[test]
    fn samples_every_tenth_frame() {
        let mut stats = FrameStats::new();
        for _ in 0..9 {
            stats.record(0.01);
        }
        assert_eq!(stats.fps(), 0.0);
        stats.record(0.02);
        assert_eq!(stats.frames(), 10);
        assert!((stats.fps() - 50.0).abs() < 1e-3);
        assert!((stats.frame_ms() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn highest_is_sticky() {
        let mut stats = FrameStats::new();
        for dt in [0.05; 10] {
            stats.record(dt);
        }
        for dt in [0.01; 10] {
            stats.record(dt);
        }
        assert!((stats.frame_ms() - 10.0).abs() < 1e-3);
        assert!((stats.highest_ms() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn zero_dt_does_not_divide() {
        let mut stats = FrameStats::new();
        for _ in 0..10 {
            stats.record(0.0);
        }
        assert!(stats.fps().is_finite());
    }

    #[test]
    fn overlay_lines_are_queued() {
        let mut ctx = RenderContext::default();
        let mut stats = FrameStats::new();
        for _ in 0..10 {
            stats.record(1.0 / 60.0);
        }
        stats.submit_overlay(&mut ctx, 45, 2, 100);
        let text = ctx.debug_text();
        assert_eq!(text.len(), 4);
        assert_eq!(text[0].y, 2);
        assert_eq!(text[3].y, 5);
        assert!(text[2].text.contains("60.00 fps"));
    }

    #[test]
    fn mesh_budget_warning() {
        let mut ctx = RenderContext::default();
        let stats = FrameStats::new();
        stats.submit_overlay(&mut ctx, 45, 2, 0);
        assert!(ctx.debug_text().iter().all(|l| l.color == TextColor::White));
        ctx.take_debug_text();

        ctx.register_shader("uber", "");
        let geo = ctx.create_geometry(Geometry::default());
        let mat = ctx.create_material("uber").unwrap();
        ctx.create_renderable(geo, mat).unwrap();
        stats.submit_overlay(&mut ctx, 45, 2, 0);
        let warning = ctx.debug_text().last().unwrap();
        assert_eq!(warning.color, TextColor::Red);
        assert_eq!(warning.x, 25);
    }
}
