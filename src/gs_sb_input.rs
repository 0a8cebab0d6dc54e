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
// gs_sb_input.rs - Input events, key table and dispatch
// =============================================================================
//
// Les entrées macroquad (touches, souris, fermeture) sont traduites en une
// liste d'InputEvent par image, puis traitées une par une par `dispatch` :
//
// - Closed                 -> demande de fermeture
// - KeyPressed(Escape)     -> demande de fermeture
// - KeyPressed(F1)         -> affiche / masque l'overlay de debug
// - KeyPressed/Released    -> table des touches enfoncées
// - MouseButtonReleased    -> explosion au point cliqué, sauf si
//                             l'interface capture la souris
//
// =============================================================================

use macroquad::input::{KeyCode, MouseButton};
use macroquad::math::Vec2;

use crate::gs_sb_config::{FalloffLaw, SandboxConfig};
use crate::gs_sb_coords::to_world_position;
use crate::gs_sb_scene::Sandbox;

/// Touche de fermeture
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Touche d'affichage de l'overlay de debug
pub const DEBUG_KEY: KeyCode = KeyCode::F1;

/// Taille de la table des touches (les codes macroquad vont jusqu'à 0x1FF)
pub const KEY_TABLE_SIZE: usize = 512;

// =============================================================================
// InputEvent
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Fermeture de la fenêtre demandée par le système
    Closed,
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    /// Position en pixels écran
    MouseButtonReleased { button: MouseButton, position: Vec2 },
}

// =============================================================================
// Keyboard - Table des touches enfoncées
// =============================================================================

pub struct Keyboard {
    keys: [bool; KEY_TABLE_SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_TABLE_SIZE],
        }
    }

    /// Met à jour la table ; les autres événements sont ignorés
    pub fn update(&mut self, event: &InputEvent) {
        let (key, down) = match *event {
            InputEvent::KeyPressed(key) => (key, true),
            InputEvent::KeyReleased(key) => (key, false),
            _ => return,
        };
        if let Some(slot) = self.keys.get_mut(key as usize) {
            *slot = down;
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn reset(&mut self) {
        self.keys.fill(false);
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Drapeaux modifiés par les événements d'une image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSignals {
    pub close_requested: bool,
    pub show_debug: bool,
}

/// Paramètres de simulation modifiés en direct par l'interface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub explode_strength: f32,
    pub falloff: FalloffLaw,
}

impl SimulationParams {
    pub fn from_config(config: &SandboxConfig) -> Self {
        Self {
            explode_strength: config.explode_strength,
            falloff: config.falloff,
        }
    }
}

/// Contexte fenêtre nécessaire au traitement d'un événement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchContext {
    pub window_height: f32,
    /// L'interface possède la souris (clic sur un panneau)
    pub gui_captures_pointer: bool,
}

/// Traite un événement. Retourne le nombre de corps poussés par une
/// éventuelle explosion.
pub fn dispatch(
    event: &InputEvent,
    sandbox: &mut Sandbox,
    keyboard: &mut Keyboard,
    signals: &mut FrameSignals,
    params: &SimulationParams,
    ctx: &DispatchContext,
) -> usize {
    keyboard.update(event);

    match *event {
        InputEvent::Closed => {
            signals.close_requested = true;
            0
        }
        InputEvent::KeyPressed(QUIT_KEY) => {
            signals.close_requested = true;
            0
        }
        InputEvent::KeyPressed(DEBUG_KEY) => {
            signals.show_debug = !signals.show_debug;
            0
        }
        InputEvent::KeyPressed(_) | InputEvent::KeyReleased(_) => 0,
        InputEvent::MouseButtonReleased { position, .. } => {
            if ctx.gui_captures_pointer {
                return 0;
            }
            let scale = sandbox.config().scale;
            let point = to_world_position(position, ctx.window_height, scale);
            sandbox.apply_explosion(point, params.explode_strength, params.falloff)
        }
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::rngs::StdRng;
    use ::rand::SeedableRng;
    use macroquad::math::vec2;

    const HEIGHT: f32 = 900.0;

    fn sandbox_with_one_box() -> (Sandbox, crate::gs_sb_physics::PhysicsBody) {
        let config = SandboxConfig {
            box_count: 0,
            static_boxes: Vec::new(),
            special_enabled: false,
            ..Default::default()
        };
        let mut sandbox = Sandbox::with_rng(config, StdRng::seed_from_u64(1)).unwrap();
        let body = sandbox.spawn_box_at(vec2(20.0, 20.0)).unwrap();
        sandbox.step();
        (sandbox, body)
    }

    fn run(
        sandbox: &mut Sandbox,
        signals: &mut FrameSignals,
        event: InputEvent,
        gui_captures_pointer: bool,
    ) -> usize {
        let mut keyboard = Keyboard::new();
        let params = SimulationParams::from_config(sandbox.config());
        let ctx = DispatchContext {
            window_height: HEIGHT,
            gui_captures_pointer,
        };
        dispatch(&event, sandbox, &mut keyboard, signals, &params, &ctx)
    }

    /// Clic écran correspondant au point monde (10, 20)
    fn click_left_of_box() -> InputEvent {
        InputEvent::MouseButtonReleased {
            button: MouseButton::Left,
            position: vec2(100.0, HEIGHT - 200.0),
        }
    }

    #[test]
    fn test_keyboard_table() {
        let mut keyboard = Keyboard::new();
        assert!(!keyboard.is_key_down(KeyCode::A));

        keyboard.update(&InputEvent::KeyPressed(KeyCode::A));
        assert!(keyboard.is_key_down(KeyCode::A));
        assert!(!keyboard.is_key_down(KeyCode::B));

        keyboard.update(&InputEvent::KeyReleased(KeyCode::A));
        assert!(!keyboard.is_key_down(KeyCode::A));

        keyboard.update(&InputEvent::KeyPressed(KeyCode::Space));
        keyboard.update(&InputEvent::KeyPressed(KeyCode::Unknown));
        keyboard.reset();
        assert!(!keyboard.is_key_down(KeyCode::Space));
        assert!(!keyboard.is_key_down(KeyCode::Unknown));
    }

    #[test]
    fn test_close_and_debug_toggle() {
        let (mut sandbox, _) = sandbox_with_one_box();
        let mut signals = FrameSignals::default();

        run(&mut sandbox, &mut signals, InputEvent::KeyPressed(DEBUG_KEY), false);
        assert!(signals.show_debug);
        run(&mut sandbox, &mut signals, InputEvent::KeyPressed(DEBUG_KEY), false);
        assert!(!signals.show_debug);
        assert!(!signals.close_requested);

        run(&mut sandbox, &mut signals, InputEvent::KeyPressed(QUIT_KEY), false);
        assert!(signals.close_requested);

        let mut signals = FrameSignals::default();
        run(&mut sandbox, &mut signals, InputEvent::Closed, false);
        assert!(signals.close_requested);
    }

    #[test]
    fn test_click_pushes_box_away() {
        let (mut sandbox, body) = sandbox_with_one_box();
        let mut signals = FrameSignals::default();

        let pushed = run(&mut sandbox, &mut signals, click_left_of_box(), false);
        sandbox.step();

        assert_eq!(pushed, 1);
        let vel = sandbox.world().linear_velocity(body);
        assert!(vel.x > 0.0);
        assert!(vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_click_ignored_when_gui_captures_pointer() {
        let (mut sandbox, body) = sandbox_with_one_box();
        let mut signals = FrameSignals::default();

        let pushed = run(&mut sandbox, &mut signals, click_left_of_box(), true);
        sandbox.step();

        assert_eq!(pushed, 0);
        assert_eq!(sandbox.world().linear_velocity(body), Vec2::ZERO);
    }

    #[test]
    fn test_click_on_box_center_is_ignored() {
        let (mut sandbox, body) = sandbox_with_one_box();
        let mut signals = FrameSignals::default();

        // (20, 20) mètres -> (200, 700) pixels
        let event = InputEvent::MouseButtonReleased {
            button: MouseButton::Right,
            position: vec2(200.0, HEIGHT - 200.0),
        };
        let pushed = run(&mut sandbox, &mut signals, event, false);

        assert_eq!(pushed, 0);
        assert_eq!(sandbox.world().linear_velocity(body), Vec2::ZERO);
    }
}
