use egui::Context as EguiContext;
use orbitview_render::{DebugTextLine, RendererKind, TextColor};
use orbitview_tools::RenderInspector;

use crate::app::AppState;

const PANEL_TITLE: &str = " orbitview | Rendering Framework";
/// Size of one debug text character cell in points.
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

/// The settings panel.
pub fn draw_panel(ctx: &EguiContext, state: &mut AppState) {
    if !state.show_panel {
        return;
    }

    egui::Window::new(PANEL_TITLE)
        .fixed_pos([10.0, 10.0])
        .auto_sized()
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label("A 3D rendering framework with an orbit camera\nand live shader reloading");
            if ui.button("Recompile & load shaders").clicked() {
                match state.recompile_shaders() {
                    Ok(count) => tracing::info!(count, "shaders recompiled"),
                    Err(e) => tracing::error!("shader recompile failed: {e:#}"),
                }
            }
            ui.checkbox(&mut state.draw_stats, "Draw stats");
            ui.separator();

            let summary = RenderInspector::summary(&state.ctx);

            egui::CollapsingHeader::new("Render Settings")
                .default_open(true)
                .show(ui, |ui| {
                    let mut renderer = state.ctx.settings().renderer;
                    egui::ComboBox::from_label("Renderer")
                        .selected_text(renderer.name())
                        .show_ui(ui, |ui| {
                            for kind in RendererKind::ALL {
                                ui.selectable_value(&mut renderer, kind, kind.name());
                            }
                        });
                    if renderer != state.ctx.settings().renderer {
                        state.set_renderer(renderer);
                    }

                    ui.label(format!("Num render states : {}", summary.render_states));
                    ui.label(format!("Num buffers       : {}", summary.buffers));
                    ui.label(format!("Num draw calls    : {}", summary.draw_calls));
                    ui.label(format!(
                        "Render Resolution : {}x{}",
                        summary.resolution.0, summary.resolution.1
                    ));

                    let mut vsync = summary.vsync;
                    if ui.checkbox(&mut vsync, "VSync").changed() {
                        state.set_vsync(vsync);
                    }
                });

            egui::CollapsingHeader::new("Render Systems")
                .default_open(true)
                .show(ui, |ui| {
                    for system in &summary.systems {
                        ui.label(system.as_str());
                    }
                });

            egui::CollapsingHeader::new("Shaders")
                .default_open(true)
                .show(ui, |ui| {
                    for shader in &summary.shaders {
                        ui.label(shader.as_str());
                    }
                });

            ui.separator();
            ui.small(RenderInspector::describe_camera(&state.ctx, state.camera));
            ui.small("LMB: Orbit | RMB/MMB: Pan | Wheel: Zoom | F1: Panel | F5: Shaders");
        });
}

/// Paint queued debug text on top of everything, on a character grid.
pub fn draw_debug_text(ctx: &EguiContext, lines: &[DebugTextLine]) {
    if lines.is_empty() {
        return;
    }
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("debug_text"),
    ));
    let font = egui::FontId::monospace(CELL_HEIGHT * 0.8);
    for line in lines {
        let pos = egui::pos2(line.x as f32 * CELL_WIDTH, line.y as f32 * CELL_HEIGHT);
        painter.text(
            pos,
            egui::Align2::LEFT_TOP,
            &line.text,
            font.clone(),
            text_color(line.color),
        );
    }
}

fn text_color(color: TextColor) -> egui::Color32 {
    match color {
        TextColor::White => egui::Color32::WHITE,
        TextColor::Red => egui::Color32::RED,
        TextColor::Green => egui::Color32::GREEN,
        TextColor::Yellow => egui::Color32::YELLOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn panel_runs_headless() {
        let mut state = AppState::new(&AppConfig::default(), 480, 720).unwrap();
        let ctx = EguiContext::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            draw_panel(ctx, &mut state);
        });
        assert!(state.draw_stats);
    }

    #[test]
    fn debug_text_paints_headless() {
        let ctx = EguiContext::default();
        let lines = vec![DebugTextLine {
            x: 45,
            y: 2,
            color: TextColor::Red,
            text: "Too many meshes!!".to_string(),
        }];
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            draw_debug_text(ctx, &lines);
        });
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn colors_distinct() {
        assert_ne!(text_color(TextColor::Red), text_color(TextColor::White));
    }
}
