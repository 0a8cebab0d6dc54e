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
// gs_sb_renderer.rs - Drawing the scene with macroquad
// =============================================================================
//
// Ce module fournit :
// - Les couleurs du sandbox
// - Le calcul des sommets écran d'un corps convexe
// - Les appels de dessin (un par corps, un par boîte statique)
//
// Toutes les formes passent par draw_polygon (éventail de triangles +
// contour), ce qui donne le même rendu pour les boîtes et les enveloppes.
//
// =============================================================================

use macroquad::color::{Color, WHITE};
use macroquad::math::{vec2, Vec2};
use macroquad::shapes::{draw_line, draw_rectangle, draw_triangle};
use macroquad::texture::{draw_texture_ex, DrawTextureParams, Texture2D};
use macroquad::window::{screen_height, screen_width};

use crate::gs_sb_coords::{box_screen_corners, to_screen_position};
use crate::gs_sb_physics::PhysicsWorld;
use crate::gs_sb_scene::{BoxEntity, HullEntity, Sandbox};

/// Couleurs prédéfinies
pub mod colors {
    use macroquad::color::{Color, BLACK, RED, WHITE};

    pub const BACKGROUND: Color = BLACK;
    pub const OUTLINE: Color = WHITE;
    pub const CENTER_OF_MASS: Color = RED;
}

/// Épaisseur du contour (pixels)
pub const OUTLINE_THICKNESS: f32 = 1.0;

/// Taille du marqueur de centre de masse (pixels)
pub const COM_MARKER_SIZE: f32 = 2.0;

// =============================================================================
// Géométrie écran
// =============================================================================

#[inline]
fn rotate(p: Vec2, sin: f32, cos: f32) -> Vec2 {
    vec2(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Point d'ancrage (centre de masse, monde) d'un corps convexe
pub fn hull_anchor(position: Vec2, angle: f32, origin: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    position + rotate(origin, sin, cos)
}

/// Sommets écran d'un corps convexe.
///
/// Les sommets sont exprimés relativement à `origin` (centre de masse
/// local), tournés, puis placés autour du centre de masse monde.
pub fn hull_screen_points(
    position: Vec2,
    angle: f32,
    points: &[Vec2],
    origin: Vec2,
    window_height: f32,
    scale: f32,
) -> Vec<Vec2> {
    let (sin, cos) = angle.sin_cos();
    let anchor = hull_anchor(position, angle, origin);
    points
        .iter()
        .map(|&p| to_screen_position(anchor + rotate(p - origin, sin, cos), window_height, scale))
        .collect()
}

// =============================================================================
// Dessin
// =============================================================================

/// Polygone convexe rempli avec contour
pub fn draw_polygon(points: &[Vec2], fill: Color, outline: Color) {
    if points.len() < 3 {
        return;
    }
    let first = points[0];
    for pair in points[1..].windows(2) {
        draw_triangle(first, pair[0], pair[1], fill);
    }
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        draw_line(a.x, a.y, b.x, b.y, OUTLINE_THICKNESS, outline);
    }
}

pub fn draw_box(world: &PhysicsWorld, entity: &BoxEntity, window_height: f32, scale: f32) {
    let corners = box_screen_corners(
        world.position(entity.body),
        entity.half_size,
        world.rotation(entity.body),
        window_height,
        scale,
    );
    draw_polygon(&corners, entity.color, colors::OUTLINE);
}

pub fn draw_hull(world: &PhysicsWorld, entity: &HullEntity, window_height: f32, scale: f32) {
    let position = world.position(entity.body);
    let angle = world.rotation(entity.body);
    let points = hull_screen_points(position, angle, &entity.points, entity.origin, window_height, scale);
    draw_polygon(&points, entity.color, colors::OUTLINE);

    // Marqueur du centre de masse
    let anchor = to_screen_position(hull_anchor(position, angle, entity.origin), window_height, scale);
    draw_rectangle(anchor.x, anchor.y, COM_MARKER_SIZE, COM_MARKER_SIZE, colors::CENTER_OF_MASS);
}

/// Dessine toute la scène : statiques, boîtes dynamiques, corps spécial
pub fn draw_scene(sandbox: &Sandbox, window_height: f32) {
    let world = sandbox.world();
    let scale = sandbox.config().scale;

    for entity in sandbox.static_boxes() {
        draw_box(world, entity, window_height, scale);
    }
    for entity in sandbox.dynamic_boxes() {
        draw_box(world, entity, window_height, scale);
    }
    if let Some(special) = sandbox.special() {
        draw_hull(world, special, window_height, scale);
    }
}

/// Image de fond étirée sur toute la fenêtre
pub fn draw_background(texture: &Texture2D) {
    draw_texture_ex(
        texture,
        0.0,
        0.0,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(screen_width(), screen_height())),
            ..Default::default()
        },
    );
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: f32 = 10.0;
    const HEIGHT: f32 = 900.0;

    fn triangle() -> Vec<Vec2> {
        vec![vec2(-5.0, 0.0), vec2(5.0, 0.0), vec2(0.0, 5.0)]
    }

    #[test]
    fn test_hull_points_without_rotation() {
        let origin = vec2(0.0, 5.0 / 3.0);
        let position = vec2(20.0, 30.0);
        let screen = hull_screen_points(position, 0.0, &triangle(), origin, HEIGHT, SCALE);

        for (s, p) in screen.iter().zip(triangle()) {
            let expected = to_screen_position(position + p, HEIGHT, SCALE);
            assert!((*s - expected).length() < 1e-3);
        }
    }

    #[test]
    fn test_hull_rotates_about_center_of_mass() {
        let origin = vec2(0.0, 5.0 / 3.0);
        let position = vec2(20.0, 30.0);
        let angle: f32 = 1.2;

        // Même transformation que le corps rigide : position + R * p
        let (sin, cos) = angle.sin_cos();
        let screen = hull_screen_points(position, angle, &triangle(), origin, HEIGHT, SCALE);
        for (s, p) in screen.iter().zip(triangle()) {
            let expected = to_screen_position(position + rotate(p, sin, cos), HEIGHT, SCALE);
            assert!((*s - expected).length() < 1e-3);
        }

        // Le centre de masse affiché ne dépend que de la transformation
        let anchor = hull_anchor(position, angle, origin);
        let centroid = screen.iter().fold(Vec2::ZERO, |acc, p| acc + *p) / 3.0;
        assert!((centroid - to_screen_position(anchor, HEIGHT, SCALE)).length() < 1e-3);
    }
}
