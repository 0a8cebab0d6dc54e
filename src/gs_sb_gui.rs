// ============================================================================
// GS.Phy2D - Open source 2D physics engine
// 2026, Vincent Gsell
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA
//
// Created by Vincent Gsell [https://github.com/VincentGsell]
// ============================================================================

// History
// 20261019 - Sandbox created (rapier2d + macroquad).

// =============================================================================
// gs_sb_gui.rs - Immediate-mode panels (macroquad::ui)
// =============================================================================
//
// Deux panneaux :
// - "Config" : toujours visible. Slider de force d'explosion, choix de la
//   loi de décroissance, bouton Reset.
// - "Debug"  : affiché avec F1. FPS, temps par section, nombre de corps.
//
// Les panneaux sont redessinés à chaque image (mode immédiat) ; l'état
// modifié vit dans SimulationParams, pas dans l'interface.
//
// =============================================================================

use log::info;
use macroquad::color::Color;
use macroquad::hash;
use macroquad::input::mouse_position;
use macroquad::math::{vec2, Vec2};
use macroquad::ui::{root_ui, widgets, Skin};
use macroquad::window::{screen_height, screen_width};

use crate::gs_sb_config::FalloffLaw;
use crate::gs_sb_error::{SandboxError, SandboxResult};
use crate::gs_sb_input::SimulationParams;
use crate::gs_sb_profiler::Profiler;
use crate::gs_sb_scene::Sandbox;

const CONFIG_PANEL_POS: Vec2 = Vec2::new(10.0, 10.0);
const CONFIG_PANEL_SIZE: Vec2 = Vec2::new(360.0, 130.0);
const DEBUG_PANEL_POS: Vec2 = Vec2::new(10.0, 150.0);
const DEBUG_PANEL_SIZE: Vec2 = Vec2::new(360.0, 170.0);

/// Actions demandées par le panneau de configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelAction {
    pub reset_requested: bool,
}

/// Initialise le style de l'interface.
///
/// Échoue si la fenêtre n'a pas de surface de dessin.
pub fn init() -> SandboxResult<()> {
    let (width, height) = (screen_width(), screen_height());
    if width <= 0.0 || height <= 0.0 {
        return Err(SandboxError::GuiInit(format!(
            "window has no drawable surface ({width}x{height})"
        )));
    }

    let label_style = root_ui()
        .style_builder()
        .text_color(Color::from_rgba(230, 230, 230, 255))
        .font_size(14)
        .build();
    let skin = Skin {
        label_style,
        ..root_ui().default_skin()
    };
    root_ui().push_skin(&skin);

    info!("GUI initialised ({width}x{height})");
    Ok(())
}

/// L'interface possède-t-elle la souris ? (pointeur au-dessus d'un panneau)
pub fn gui_captures_pointer() -> bool {
    let (x, y) = mouse_position();
    root_ui().is_mouse_over(vec2(x, y))
}

/// Panneau "Config"
pub fn draw_config_panel(params: &mut SimulationParams, strength_range: [f32; 2]) -> PanelAction {
    let mut action = PanelAction::default();

    widgets::Window::new(hash!(), CONFIG_PANEL_POS, CONFIG_PANEL_SIZE)
        .label("Config")
        .ui(&mut *root_ui(), |ui| {
            ui.slider(
                hash!(),
                "Explode Strength",
                strength_range[0]..strength_range[1],
                &mut params.explode_strength,
            );

            ui.label(None, &format!("Falloff: {}", params.falloff.label()));
            if ui.button(None, "Toggle falloff") {
                params.falloff = match params.falloff {
                    FalloffLaw::Linear => FalloffLaw::Squared,
                    FalloffLaw::Squared => FalloffLaw::Linear,
                };
            }

            if ui.button(None, "Reset") {
                action.reset_requested = true;
            }
        });

    action
}

/// Panneau "Debug"
pub fn draw_debug_overlay(profiler: &Profiler, sandbox: &Sandbox) {
    widgets::Window::new(hash!(), DEBUG_PANEL_POS, DEBUG_PANEL_SIZE)
        .label("Debug")
        .ui(&mut *root_ui(), |ui| {
            ui.label(
                None,
                &format!(
                    "FPS: {:.0} ({:.2} ms)",
                    profiler.fps(),
                    profiler.average_frame_ms()
                ),
            );
            for section in profiler.report() {
                ui.label(
                    None,
                    &format!(
                        "{}: {:.3} ms (avg {:.3} ms)",
                        section.name, section.last_ms, section.average_ms
                    ),
                );
            }
            ui.label(
                None,
                &format!(
                    "Bodies: {} ({} dynamic)",
                    sandbox.world().body_count(),
                    sandbox.dynamic_body_count()
                ),
            );
        });
}
