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
// gs_sb_coords.rs - Physics <-> screen coordinate mapping
// =============================================================================
//
// Le moteur physique travaille en mètres, Y vers le haut, origine en bas
// à gauche. L'écran travaille en pixels, Y vers le bas, origine en haut à
// gauche. On passe de l'un à l'autre avec une échelle fixe (pixels/mètre) :
//
//   écran.x = monde.x * scale
//   écran.y = hauteur_fenêtre - monde.y * scale
//
// Les boîtes sont décrites par leur DEMI-taille côté physique, d'où le
// facteur 2 pour la taille affichée.
//
// =============================================================================

use macroquad::math::{vec2, Vec2};

/// Position physique (mètres) -> position écran (pixels)
#[inline]
pub fn to_screen_position(world: Vec2, window_height: f32, scale: f32) -> Vec2 {
    vec2(world.x * scale, window_height - world.y * scale)
}

/// Demi-taille physique -> taille affichée complète
#[inline]
pub fn to_screen_size(half_size: Vec2, scale: f32) -> Vec2 {
    vec2(half_size.x * scale * 2.0, half_size.y * scale * 2.0)
}

/// Position écran (pixels) -> position physique (mètres)
/// Inverse exact de `to_screen_position`
#[inline]
pub fn to_world_position(screen: Vec2, window_height: f32, scale: f32) -> Vec2 {
    vec2(screen.x / scale, (window_height - screen.y) / scale)
}

/// L'inversion de l'axe Y inverse aussi le sens de rotation
#[inline]
pub fn to_screen_rotation(angle: f32) -> f32 {
    -angle
}

/// Coins d'une boîte orientée, en coordonnées écran.
///
/// Ordre : bas-gauche, bas-droite, haut-droite, haut-gauche (repère local
/// de la boîte, côté physique). Le calcul se fait côté écran : taille
/// affichée, rotation miroir, puis translation au centre projeté.
pub fn box_screen_corners(
    center: Vec2,
    half_size: Vec2,
    angle: f32,
    window_height: f32,
    scale: f32,
) -> [Vec2; 4] {
    let origin = to_screen_position(center, window_height, scale);
    let half = to_screen_size(half_size, scale) * 0.5;
    let (sin, cos) = to_screen_rotation(angle).sin_cos();

    // Y écran vers le bas : le "bas" physique est à +y
    let local = [
        vec2(-half.x, half.y),
        vec2(half.x, half.y),
        vec2(half.x, -half.y),
        vec2(-half.x, -half.y),
    ];

    local.map(|p| origin + vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: f32 = 10.0;
    const HEIGHT: f32 = 900.0;

    #[test]
    fn test_screen_position_flips_y() {
        let p = to_screen_position(vec2(0.0, 0.0), HEIGHT, SCALE);
        assert_eq!(p, vec2(0.0, HEIGHT));

        let p = to_screen_position(vec2(61.0, 2.0), HEIGHT, SCALE);
        assert_eq!(p, vec2(610.0, 880.0));
    }

    #[test]
    fn test_position_round_trip() {
        let samples = [
            vec2(0.0, 0.0),
            vec2(12.5, 33.25),
            vec2(-4.0, 120.0),
            vec2(159.9, 0.001),
        ];
        for height in [600.0, 768.0, 900.0] {
            for p in samples {
                let back = to_world_position(to_screen_position(p, height, SCALE), height, SCALE);
                assert!((back - p).length() < 1e-4, "{p:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn test_screen_size_doubles_half_extents() {
        assert_eq!(to_screen_size(vec2(1.0, 1.0), SCALE), vec2(20.0, 20.0));
        assert_eq!(to_screen_size(vec2(60.0, 1.0), SCALE), vec2(1200.0, 20.0));
        assert_eq!(to_screen_size(vec2(0.25, 3.0), 8.0), vec2(4.0, 48.0));
    }

    #[test]
    fn test_click_to_world() {
        // Clic en bas à gauche de la fenêtre = origine du monde
        assert_eq!(to_world_position(vec2(0.0, HEIGHT), HEIGHT, SCALE), Vec2::ZERO);
        assert_eq!(to_world_position(vec2(100.0, 800.0), HEIGHT, SCALE), vec2(10.0, 10.0));
    }

    #[test]
    fn test_box_corners_unrotated() {
        let corners = box_screen_corners(vec2(10.0, 10.0), vec2(1.0, 2.0), 0.0, HEIGHT, SCALE);
        // Bas-gauche (9, 8) et haut-droite (11, 12) en mètres
        assert!((corners[0] - vec2(90.0, 820.0)).length() < 1e-4);
        assert!((corners[2] - vec2(110.0, 780.0)).length() < 1e-4);
    }

    #[test]
    fn test_box_corners_quarter_turn() {
        // Quart de tour : la boîte 1x2 devient 2x1
        let corners = box_screen_corners(
            vec2(10.0, 10.0),
            vec2(1.0, 2.0),
            std::f32::consts::FRAC_PI_2,
            HEIGHT,
            SCALE,
        );
        let min_x = corners.iter().map(|c| c.x).fold(f32::MAX, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::MIN, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::MAX, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::MIN, f32::max);
        assert!((max_x - min_x - 40.0).abs() < 1e-3);
        assert!((max_y - min_y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_is_mirrored() {
        assert_eq!(to_screen_rotation(0.5), -0.5);
    }

    #[test]
    fn test_box_corners_follow_world_rotation() {
        // Chaque coin affiché doit être la projection du coin physique
        // centre + R(angle) * coin_local
        let center = vec2(30.0, 40.0);
        let half = vec2(1.5, 0.5);
        for angle in [0.3_f32, 1.0, -2.2, 3.0] {
            let corners = box_screen_corners(center, half, angle, HEIGHT, SCALE);
            let (sin, cos) = angle.sin_cos();
            let local = [
                vec2(-half.x, -half.y),
                vec2(half.x, -half.y),
                vec2(half.x, half.y),
                vec2(-half.x, half.y),
            ];
            for (corner, p) in corners.iter().zip(local) {
                let world = center + vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
                let expected = to_screen_position(world, HEIGHT, SCALE);
                assert!((*corner - expected).length() < 1e-3, "{angle}: {corner:?} vs {expected:?}");
            }
        }
    }

    #[test]
    fn test_box_corners_span_screen_size() {
        let corners = box_screen_corners(vec2(10.0, 10.0), vec2(1.0, 2.0), 0.0, HEIGHT, SCALE);
        let size = to_screen_size(vec2(1.0, 2.0), SCALE);
        assert!((corners[1].x - corners[0].x - size.x).abs() < 1e-4);
        assert!((corners[0].y - corners[3].y - size.y).abs() < 1e-4);
    }
}
