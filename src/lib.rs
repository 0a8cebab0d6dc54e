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
// lib.rs - Library entry point
// =============================================================================
//
// GS.Sandbox2D est un bac à sable physique 2D interactif.
//
// Le moteur physique (rapier2d), le rendu et l'interface (macroquad) sont
// externes ; ce crate fournit la colle :
// - Conversion de coordonnées monde (mètres, Y vers le haut) <-> écran
// - Construction de la scène (boîtes statiques, boîtes dynamiques,
//   corps convexe)
// - Dispatch des entrées (fermeture, debug, explosion au clic)
// - Boucle principale à pas de temps fixe
//
// UTILISATION BASIQUE (sans fenêtre) :
// ```rust
// use gs_sandbox2d::prelude::*;
//
// let mut sandbox = Sandbox::new(SandboxConfig::default())?;
//
// // Explosion au point (30, 30) mètres
// sandbox.apply_explosion(vec2(30.0, 30.0), 500.0, FalloffLaw::Squared);
//
// for _ in 0..60 {
//     sandbox.step();
// }
// sandbox.shutdown();
// ```
//
// =============================================================================

// Déclaration des modules
pub mod gs_sb_error;
pub mod gs_sb_config;
pub mod gs_sb_coords;
pub mod gs_sb_physics;
pub mod gs_sb_scene;
pub mod gs_sb_input;
pub mod gs_sb_profiler;
pub mod gs_sb_renderer;
pub mod gs_sb_gui;
pub mod gs_sb_texture;
pub mod gs_sb_frame;

// Ré-exportations pour un accès facile
pub use gs_sb_error::{SandboxError, SandboxResult};
pub use gs_sb_config::{FalloffLaw, SandboxConfig, StaticBoxConfig, WindowSettings};
pub use gs_sb_coords::{to_screen_position, to_screen_size, to_world_position};
pub use gs_sb_physics::{BodyDesc, BodyKind, Material, PhysicsBody, PhysicsWorld, ShapeDesc};
pub use gs_sb_scene::{
    create_box, create_box_at, create_special, create_static_box, explosion_impulse,
    BoxEntity, HullEntity, Sandbox,
};
pub use gs_sb_input::{dispatch, InputEvent, Keyboard, SimulationParams};
pub use gs_sb_profiler::Profiler;
pub use gs_sb_frame::{run, LoopState};

// =============================================================================
// Prélude - imports communs en une seule ligne
// =============================================================================

pub mod prelude {
    pub use macroquad::math::{vec2, Vec2};
    pub use crate::gs_sb_config::{FalloffLaw, SandboxConfig};
    pub use crate::gs_sb_error::{SandboxError, SandboxResult};
    pub use crate::gs_sb_physics::{PhysicsBody, PhysicsWorld};
    pub use crate::gs_sb_scene::Sandbox;
}
