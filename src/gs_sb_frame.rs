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
// gs_sb_frame.rs - Frame loop
// =============================================================================
//
// Machine à deux états : Running -> Closed (terminal).
//
// UNE IMAGE :
// 1. Collecte des événements (clavier, souris, fermeture) et dispatch
// 2. Un pas de simulation FIXE (indépendant du temps réel de l'image)
// 3. Dessin : fond, boîtes statiques, boîtes dynamiques, corps spécial
// 4. Overlay de debug (si F1) et panneau de configuration
// 5. Présentation (vsync), puis passage à Closed si demandé
//
// À la sortie, tous les corps sont libérés explicitement, puis le monde.
//
// =============================================================================

use log::{error, info};
use macroquad::input::{
    get_keys_pressed, get_keys_released, is_mouse_button_released, is_quit_requested,
    mouse_position, prevent_quit, KeyCode, MouseButton,
};
use macroquad::math::vec2;
use macroquad::window::{clear_background, next_frame, screen_height};

use crate::gs_sb_config::SandboxConfig;
use crate::gs_sb_error::SandboxResult;
use crate::gs_sb_gui;
use crate::gs_sb_input::{
    dispatch, DispatchContext, FrameSignals, InputEvent, Keyboard, SimulationParams,
};
use crate::gs_sb_profiler::Profiler;
use crate::gs_sb_renderer::{self, colors};
use crate::gs_sb_scene::Sandbox;
use crate::gs_sb_texture::load_texture_or_placeholder;

/// État de la boucle principale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

const MOUSE_BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// macroquad rend les touches d'une image dans un ensemble non ordonné :
/// on les trie par code pour un dispatch reproductible.
fn in_key_order(keys: impl IntoIterator<Item = KeyCode>) -> Vec<KeyCode> {
    let mut keys: Vec<KeyCode> = keys.into_iter().collect();
    keys.sort_by_key(|key| *key as u16);
    keys
}

/// Traduit l'état d'entrée macroquad de cette image en événements
pub fn collect_events() -> Vec<InputEvent> {
    let mut events = Vec::new();

    if is_quit_requested() {
        events.push(InputEvent::Closed);
    }
    events.extend(in_key_order(get_keys_pressed()).into_iter().map(InputEvent::KeyPressed));
    events.extend(in_key_order(get_keys_released()).into_iter().map(InputEvent::KeyReleased));

    let (x, y) = mouse_position();
    for button in MOUSE_BUTTONS {
        if is_mouse_button_released(button) {
            events.push(InputEvent::MouseButtonReleased {
                button,
                position: vec2(x, y),
            });
        }
    }
    events
}

/// État mutable de la boucle, hors ressources graphiques
pub struct FrameState {
    pub sandbox: Sandbox,
    pub keyboard: Keyboard,
    pub signals: FrameSignals,
    pub params: SimulationParams,
    pub profiler: Profiler,
}

impl FrameState {
    pub fn new(sandbox: Sandbox) -> Self {
        let params = SimulationParams::from_config(sandbox.config());
        Self {
            sandbox,
            keyboard: Keyboard::new(),
            signals: FrameSignals::default(),
            params,
            profiler: Profiler::new(),
        }
    }

    /// Partie simulation d'une image : dispatch des événements puis un pas
    /// fixe. Retourne l'état de la boucle après cette image.
    pub fn update(&mut self, events: &[InputEvent], ctx: &DispatchContext) -> LoopState {
        for event in events {
            dispatch(
                event,
                &mut self.sandbox,
                &mut self.keyboard,
                &mut self.signals,
                &self.params,
                ctx,
            );
        }

        let sandbox = &mut self.sandbox;
        self.profiler.time("Update", || sandbox.step());

        if self.signals.close_requested {
            LoopState::Closed
        } else {
            LoopState::Running
        }
    }

    /// Reset demandé par l'interface. La table des touches est vidée avec
    /// la scène. Une erreur est loggée, pas propagée : la scène reste
    /// utilisable sans corps spécial.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        if let Err(err) = self.sandbox.reset() {
            error!("Reset failed: {err}");
        }
    }

    /// Libère tous les corps puis le monde
    pub fn shutdown(self) -> usize {
        self.sandbox.shutdown()
    }
}

/// Boucle principale : s'exécute jusqu'à la fermeture de la fenêtre
pub async fn run(config: SandboxConfig) -> SandboxResult<()> {
    gs_sb_gui::init()?;

    let background = match &config.background_texture {
        Some(path) => Some(load_texture_or_placeholder(path).await),
        None => None,
    };
    let strength_range = config.explode_strength_range;

    let mut state = FrameState::new(Sandbox::new(config)?);
    prevent_quit();

    let mut loop_state = LoopState::Running;
    while loop_state == LoopState::Running {
        let window_height = screen_height();
        let ctx = DispatchContext {
            window_height,
            gui_captures_pointer: gs_sb_gui::gui_captures_pointer(),
        };

        let events = collect_events();
        loop_state = state.update(&events, &ctx);

        let sandbox = &state.sandbox;
        state.profiler.time("Render", || {
            clear_background(colors::BACKGROUND);
            if let Some(texture) = &background {
                gs_sb_renderer::draw_background(texture);
            }
            gs_sb_renderer::draw_scene(sandbox, window_height);
        });

        state.profiler.end_frame();
        if state.signals.show_debug {
            gs_sb_gui::draw_debug_overlay(&state.profiler, &state.sandbox);
        }

        let action = gs_sb_gui::draw_config_panel(&mut state.params, strength_range);
        if action.reset_requested {
            state.reset();
        }

        next_frame().await;
    }

    info!("Close requested, shutting down");
    state.shutdown();
    Ok(())
}

// =============================================================================
// Tests unitaires
// =============================================================================
