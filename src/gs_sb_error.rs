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
// gs_sb_error.rs - Error types
// =============================================================================
//
// Le sandbox n'a que peu de modes d'échec réels :
// - lecture / analyse du fichier de configuration
// - valeurs de configuration incohérentes
// - nuage de points dégénéré pour l'enveloppe convexe
// - initialisation de l'interface
//
// Tout le reste (création de boîtes, pas de simulation, événements) est
// considéré comme infaillible.
//
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Erreurs du sandbox.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Le fichier de configuration existe mais n'a pas pu être lu.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Le fichier de configuration n'est pas du TOML valide.
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Valeur de configuration hors domaine.
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Impossible de construire une enveloppe convexe à partir des points.
    #[error("Cannot build a convex hull from {points} point(s)")]
    DegenerateHull { points: usize },

    /// L'interface n'a pas pu être initialisée.
    #[error("Failed to initialise the GUI: {0}")]
    GuiInit(String),
}

/// Résultat des opérations du sandbox.
pub type SandboxResult<T> = std::result::Result<T, SandboxError>;

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SandboxError::DegenerateHull { points: 2 };
        assert_eq!(format!("{err}"), "Cannot build a convex hull from 2 point(s)");

        let err = SandboxError::InvalidConfig {
            field: "scale",
            reason: "must be > 0".to_owned(),
        };
        assert!(format!("{err}").contains("`scale`"));
    }
}
