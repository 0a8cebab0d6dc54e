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
// gs_sb_config.rs - Sandbox configuration
// =============================================================================
//
// Tous les paramètres numériques du sandbox sont regroupés ici :
// - échelle pixels / mètre
// - taille, nombre et zone d'apparition des boîtes dynamiques
// - matériau (densité, friction) et amortissement
// - pas de temps fixe et itérations du solveur
// - force et loi de décroissance de l'explosion
// - disposition des boîtes statiques
//
// Les valeurs par défaut reproduisent la scène d'origine. Un fichier
// `sandbox.toml` (optionnel) peut surcharger n'importe quel champ :
//
// ```toml
// scale = 12.0
// box_count = 80
// falloff = "linear"
// seed = 42
// ```
//
// =============================================================================

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use macroquad::math::{vec2, Vec2};
use macroquad::miniquad::conf::Platform;
use macroquad::window::Conf;
use serde::{Deserialize, Serialize};

use crate::gs_sb_error::{SandboxError, SandboxResult};

/// Nom du fichier de configuration cherché dans le répertoire courant
pub const CONFIG_FILE_NAME: &str = "sandbox.toml";

/// Variable d'environnement permettant de pointer vers un autre fichier
pub const CONFIG_ENV_VAR: &str = "GS_SANDBOX_CONFIG";

// =============================================================================
// FalloffLaw - Loi de décroissance de l'explosion
// =============================================================================
//
// L'impulsion appliquée à un corps vaut : diff * (force / métrique)
// où diff = position_corps - point_clic.
//
// - Linear  : métrique = |diff|
// - Squared : métrique = |diff|² / 2   (loi par défaut)
//
// Avec Squared, la norme de l'impulsion décroît en 1/distance ;
// avec Linear, elle reste constante (seule la direction dépend du clic).
//
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalloffLaw {
    Linear,
    #[default]
    Squared,
}

impl FalloffLaw {
    /// Métrique de distance à partir de la distance au carré
    #[inline]
    pub fn metric(self, distance_sq: f32) -> f32 {
        match self {
            FalloffLaw::Linear => distance_sq.sqrt(),
            FalloffLaw::Squared => distance_sq * 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FalloffLaw::Linear => "linear",
            FalloffLaw::Squared => "squared",
        }
    }
}

// =============================================================================
// StaticBoxConfig - Boîte statique (demi-taille + position, en mètres)
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticBoxConfig {
    pub half_size: [f32; 2],
    pub position: [f32; 2],
}

impl StaticBoxConfig {
    pub const fn new(half_size: [f32; 2], position: [f32; 2]) -> Self {
        Self { half_size, position }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::from_array(self.half_size)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Sol, mur gauche et trois obstacles
pub const DEFAULT_STATIC_BOXES: [StaticBoxConfig; 5] = [
    StaticBoxConfig::new([60.0, 1.0], [61.0, 2.0]),
    StaticBoxConfig::new([1.0, 30.0], [2.0, 33.0]),
    StaticBoxConfig::new([2.0, 2.0], [50.0, 50.0]),
    StaticBoxConfig::new([2.0, 2.0], [40.0, 10.0]),
    StaticBoxConfig::new([2.0, 2.0], [10.0, 10.0]),
];

/// Triangle utilisé pour le corps "spécial"
pub const DEFAULT_SPECIAL_POINTS: [[f32; 2]; 3] = [[-5.0, 0.0], [5.0, 0.0], [0.0, 5.0]];

// =============================================================================
// SandboxConfig
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Pixels par mètre
    pub scale: f32,

    /// Demi-taille des boîtes dynamiques (mètres)
    pub box_half_size: f32,

    /// Nombre de boîtes dynamiques créées au démarrage
    pub box_count: usize,

    /// Zone d'apparition des boîtes dynamiques [min, max[ (mètres)
    pub spawn_min: [f32; 2],
    pub spawn_max: [f32; 2],

    /// Sans gravité, l'amortissement est indispensable : sinon les
    /// impulsions ne se dissipent jamais
    pub linear_damping: f32,
    pub angular_damping: f32,

    pub density: f32,
    pub friction: f32,

    pub gravity: [f32; 2],

    /// Pas de temps fixe (secondes) et itérations du solveur par pas
    pub timestep: f32,
    pub solver_iterations: usize,

    /// Force initiale de l'explosion et bornes du slider
    pub explode_strength: f32,
    pub explode_strength_range: [f32; 2],
    pub falloff: FalloffLaw,

    /// En dessous de cette métrique, le corps est ignoré
    pub explode_epsilon: f32,

    pub static_boxes: Vec<StaticBoxConfig>,

    pub special_enabled: bool,
    pub special_points: Vec<[f32; 2]>,

    /// Graine du générateur aléatoire (None = entropie système)
    pub seed: Option<u64>,

    /// Image de fond optionnelle
    pub background_texture: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            box_half_size: 1.0,
            box_count: 50,
            spawn_min: [10.0, 10.0],
            spawn_max: [50.0, 50.0],
            linear_damping: 1.0,
            angular_damping: 1.0,
            density: 1.0,
            friction: 0.3,
            gravity: [0.0, 0.0],
            timestep: 1.0 / 60.0,
            solver_iterations: 4,
            explode_strength: 50.0,
            explode_strength_range: [1.0, 10000.0],
            falloff: FalloffLaw::Squared,
            explode_epsilon: 0.001,
            static_boxes: DEFAULT_STATIC_BOXES.to_vec(),
            special_enabled: true,
            special_points: DEFAULT_SPECIAL_POINTS.to_vec(),
            seed: None,
            background_texture: None,
        }
    }
}

impl SandboxConfig {
    /// Chemin du fichier de configuration (variable d'environnement ou défaut)
    pub fn default_path() -> PathBuf {
        env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Charge la configuration depuis un fichier TOML.
    ///
    /// Un fichier absent n'est pas une erreur : on retourne les valeurs par
    /// défaut. Un fichier illisible ou invalide en est une.
    pub fn load(path: &Path) -> SandboxResult<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| SandboxError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&text).map_err(|source| SandboxError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Vérifie la cohérence des valeurs
    pub fn validate(&self) -> SandboxResult<()> {
        fn invalid(field: &'static str, reason: &str) -> SandboxResult<()> {
            Err(SandboxError::InvalidConfig {
                field,
                reason: reason.to_owned(),
            })
        }

        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid("scale", "must be finite and > 0");
        }
        if !(self.box_half_size.is_finite() && self.box_half_size > 0.0) {
            return invalid("box_half_size", "must be finite and > 0");
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return invalid("timestep", "must be finite and > 0");
        }
        if self.solver_iterations == 0 {
            return invalid("solver_iterations", "must be >= 1");
        }
        // gen_range exige un intervalle fini et non vide
        if !self.spawn_min.iter().all(|v| v.is_finite()) {
            return invalid("spawn_min", "must be finite");
        }
        if !self.spawn_max.iter().all(|v| v.is_finite()) {
            return invalid("spawn_max", "must be finite");
        }
        if !(self.spawn_min[0] < self.spawn_max[0] && self.spawn_min[1] < self.spawn_max[1]) {
            return invalid("spawn_min", "must be strictly below spawn_max on both axes");
        }
        let [low, high] = self.explode_strength_range;
        if !(low.is_finite() && high.is_finite()) {
            return invalid("explode_strength_range", "bounds must be finite");
        }
        if !(low < high) {
            return invalid("explode_strength_range", "lower bound must be below upper bound");
        }
        if !self.explode_strength.is_finite() {
            return invalid("explode_strength", "must be finite");
        }
        if !(self.explode_epsilon >= 0.0) {
            return invalid("explode_epsilon", "must be >= 0");
        }
        if self
            .static_boxes
            .iter()
            .any(|b| !b.half_size.iter().all(|v| v.is_finite() && *v > 0.0))
        {
            return invalid("static_boxes", "half sizes must be > 0");
        }
        Ok(())
    }

    #[inline]
    pub fn spawn_region(&self) -> (Vec2, Vec2) {
        (Vec2::from_array(self.spawn_min), Vec2::from_array(self.spawn_max))
    }

    #[inline]
    pub fn box_half_extents(&self) -> Vec2 {
        vec2(self.box_half_size, self.box_half_size)
    }

    #[inline]
    pub fn gravity(&self) -> Vec2 {
        Vec2::from_array(self.gravity)
    }

    pub fn special_points(&self) -> Vec<Vec2> {
        self.special_points.iter().copied().map(Vec2::from_array).collect()
    }
}

// =============================================================================
// WindowSettings - Fenêtre (non configurable par fichier)
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub sample_count: i32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Rapier2D + macroquad sandbox".to_owned(),
            width: 1600,
            height: 900,
            sample_count: 4,
            vsync: true,
        }
    }
}

impl WindowSettings {
    /// Conversion vers la configuration de fenêtre macroquad
    pub fn to_conf(&self) -> Conf {
        Conf {
            window_title: self.title.clone(),
            window_width: self.width,
            window_height: self.height,
            sample_count: self.sample_count,
            window_resizable: false,
            platform: Platform {
                swap_interval: if self.vsync { Some(1) } else { Some(0) },
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SandboxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.static_boxes.len(), 5);
        assert_eq!(config.falloff, FalloffLaw::Squared);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SandboxConfig = toml::from_str(
            r#"
            scale = 12.5
            box_count = 3
            falloff = "linear"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.scale, 12.5);
        assert_eq!(config.box_count, 3);
        assert_eq!(config.falloff, FalloffLaw::Linear);
        assert_eq!(config.seed, Some(7));
        // Champs non précisés : valeurs par défaut
        assert_eq!(config.solver_iterations, 4);
        assert_eq!(config.static_boxes, DEFAULT_STATIC_BOXES.to_vec());
    }

    #[test]
    fn test_static_boxes_from_toml() {
        let config: SandboxConfig = toml::from_str(
            r#"
            [[static_boxes]]
            half_size = [10.0, 0.5]
            position = [20.0, 1.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.static_boxes.len(), 1);
        assert_eq!(config.static_boxes[0].half_size(), vec2(10.0, 0.5));
        assert_eq!(config.static_boxes[0].position(), vec2(20.0, 1.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SandboxConfig {
            scale: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SandboxError::InvalidConfig { field: "scale", .. })
        ));

        let config = SandboxConfig {
            spawn_min: [10.0, 60.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SandboxConfig {
            explode_strength_range: [100.0, 1.0],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SandboxConfig {
            solver_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let cases = [
            ("spawn_min = [nan, 10.0]", "spawn_min"),
            ("spawn_max = [inf, 50.0]", "spawn_max"),
            ("spawn_min = [-inf, 10.0]", "spawn_min"),
            ("scale = inf", "scale"),
            ("scale = nan", "scale"),
            ("timestep = inf", "timestep"),
            ("explode_strength_range = [1.0, inf]", "explode_strength_range"),
            ("explode_strength_range = [nan, 10.0]", "explode_strength_range"),
            ("explode_epsilon = nan", "explode_epsilon"),
        ];
        for (text, expected) in cases {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "{text}").unwrap();

            match SandboxConfig::load(file.path()) {
                Err(SandboxError::InvalidConfig { field, .. }) => {
                    assert_eq!(field, expected, "{text}")
                }
                other => panic!("{text}: expected InvalidConfig, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SandboxConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "box_count = 12\nexplode_strength = 250.0").unwrap();

        let config = SandboxConfig::load(file.path()).unwrap();
        assert_eq!(config.box_count, 12);
        assert_eq!(config.explode_strength, 250.0);
    }

    #[test]
    fn test_load_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scale = \"big\"").unwrap();

        let result = SandboxConfig::load(file.path());
        assert!(matches!(result, Err(SandboxError::ConfigParse { .. })));
    }

    #[test]
    fn test_falloff_metric() {
        // Distance 2 -> distance² = 4
        assert!((FalloffLaw::Linear.metric(4.0) - 2.0).abs() < 1e-6);
        assert!((FalloffLaw::Squared.metric(4.0) - 2.0).abs() < 1e-6);
        // Distance 4 -> distance² = 16
        assert!((FalloffLaw::Linear.metric(16.0) - 4.0).abs() < 1e-6);
        assert!((FalloffLaw::Squared.metric(16.0) - 8.0).abs() < 1e-6);
    }
}
