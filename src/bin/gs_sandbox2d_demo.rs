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
// gs_sandbox2d_demo.rs - Interactive sandbox
// =============================================================================
//
// Boîtes dynamiques (sans gravité, avec amortissement) entre quelques
// obstacles statiques, plus un triangle construit par enveloppe convexe.
//
// CONTRÔLES :
// -----------
// [Clic]     : Explosion au point cliqué (hors panneaux)
// [F1]       : Afficher / masquer l'overlay de debug
// [Escape]   : Quitter
// Panneau "Config" : force de l'explosion, loi de décroissance, Reset
//
// CONFIGURATION :
// ---------------
// `sandbox.toml` dans le répertoire courant, ou le fichier indiqué par
// GS_SANDBOX_CONFIG. Niveau de log via RUST_LOG (défaut : info).
//
// =============================================================================

use gs_sandbox2d::{run, SandboxConfig, WindowSettings};

use macroquad::window::Conf;

// =============================================================================
// Configuration de la fenêtre
// =============================================================================

fn window_conf() -> Conf {
    WindowSettings::default().to_conf()
}

// =============================================================================
// Point d'entrée
// =============================================================================

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = match SandboxConfig::load(&SandboxConfig::default_path()) {
        Ok(config) => run(config).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        log::error!("Sandbox failed to start: {err}");
        std::process::exit(1);
    }
}
