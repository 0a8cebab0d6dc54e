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
// gs_sb_physics.rs - Rapier2D world wrapper
// =============================================================================
//
// Regroupe toute la plomberie Rapier (ensembles de corps et de colliders,
// pipeline, gestionnaire d'îlots, broad/narrow phase...) dans une seule
// structure, PhysicsWorld.
//
// Le reste du sandbox ne manipule que des PhysicsBody : des poignées
// opaques (copiables) vers un corps et son collider. Le monde reste
// propriétaire des corps ; une poignée ne fait jamais vivre un corps.
//
// Conversions : le sandbox utilise Vec2 (macroquad/glam), Rapier utilise
// nalgebra. Les conversions sont privées à ce module.
//
// =============================================================================

use std::num::NonZeroUsize;

use macroquad::math::{vec2, Vec2};
use rapier2d::prelude::*;

use crate::gs_sb_error::{SandboxError, SandboxResult};

// =============================================================================
// Conversions glam <-> nalgebra
// =============================================================================

#[inline]
fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

#[inline]
fn from_na(v: &Vector<Real>) -> Vec2 {
    vec2(v.x, v.y)
}

#[inline]
fn point_from_na(p: &Point<Real>) -> Vec2 {
    vec2(p.x, p.y)
}

// =============================================================================
// Descriptions de corps
// =============================================================================

/// Type de corps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    /// Immobile, masse infinie
    Static,
    /// Mobile sous l'effet des forces et impulsions
    Dynamic,
}

/// Forme du collider
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeDesc {
    /// Boîte décrite par ses demi-dimensions
    Cuboid { half_extents: Vec2 },
    /// Enveloppe convexe d'un nuage de points (repère local du corps)
    ConvexHull { points: Vec<Vec2> },
}

impl ShapeDesc {
    fn build_collider(&self) -> SandboxResult<ColliderBuilder> {
        match self {
            ShapeDesc::Cuboid { half_extents } => {
                Ok(ColliderBuilder::cuboid(half_extents.x, half_extents.y))
            }
            ShapeDesc::ConvexHull { points } => {
                let degenerate = SandboxError::DegenerateHull {
                    points: points.len(),
                };
                if points.len() < 3 {
                    return Err(degenerate);
                }
                let na_points: Vec<Point<Real>> =
                    points.iter().map(|p| point![p.x, p.y]).collect();
                ColliderBuilder::convex_hull(&na_points).ok_or(degenerate)
            }
        }
    }
}

/// Matériau du collider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.6,
        }
    }
}

/// Description complète d'un corps avant création
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub shape: ShapeDesc,
}

impl BodyDesc {
    pub fn fixed(shape: ShapeDesc) -> Self {
        Self {
            kind: BodyKind::Static,
            position: Vec2::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            shape,
        }
    }

    pub fn dynamic(shape: ShapeDesc) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            ..Self::fixed(shape)
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }
}

/// Poignée opaque vers un corps et son unique collider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsBody {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

// =============================================================================
// PhysicsWorld
// =============================================================================

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Crée un monde avec un pas de temps fixe et un nombre fixe
    /// d'itérations du solveur par pas
    pub fn new(gravity: Vec2, timestep: f32, solver_iterations: usize) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: timestep,
            num_solver_iterations: NonZeroUsize::new(solver_iterations)
                .unwrap_or(NonZeroUsize::MIN),
            ..Default::default()
        };

        Self {
            gravity: to_na(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Crée un corps et son collider.
    ///
    /// Les propriétés de masse sont recalculées immédiatement : le centre de
    /// masse et les impulsions sont valides avant le premier pas.
    pub fn create_body(&mut self, desc: &BodyDesc, material: Material) -> SandboxResult<PhysicsBody> {
        let collider = desc
            .shape
            .build_collider()?
            .density(material.density)
            .friction(material.friction)
            .build();

        let builder = match desc.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let rb = builder
            .translation(to_na(desc.position))
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .build();

        let body = self.bodies.insert(rb);
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        if let Some(rb) = self.bodies.get_mut(body) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        Ok(PhysicsBody { body, collider })
    }

    /// Retire un corps et son collider du monde
    pub fn remove_body(&mut self, body: PhysicsBody) {
        self.bodies.remove(
            body.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Avance la simulation d'un pas de temps fixe
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    // =========================================================================
    // Accesseurs
    // =========================================================================

    /// Position de l'origine du corps (mètres)
    pub fn position(&self, body: PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body)
            .map(|rb| from_na(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Angle du corps (radians, sens trigonométrique)
    pub fn rotation(&self, body: PhysicsBody) -> f32 {
        self.bodies
            .get(body.body)
            .map(|rb| rb.rotation().angle())
            .unwrap_or(0.0)
    }

    pub fn linear_velocity(&self, body: PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body)
            .map(|rb| from_na(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn angular_velocity(&self, body: PhysicsBody) -> f32 {
        self.bodies.get(body.body).map(|rb| rb.angvel()).unwrap_or(0.0)
    }

    /// Centre de masse dans le repère local du corps
    pub fn local_center_of_mass(&self, body: PhysicsBody) -> Vec2 {
        self.colliders
            .get(body.collider)
            .map(|co| point_from_na(&co.mass_properties().local_com))
            .unwrap_or(Vec2::ZERO)
    }

    /// Sommets du polygone convexe (repère local), None pour les autres formes
    pub fn hull_points(&self, body: PhysicsBody) -> Option<Vec<Vec2>> {
        let collider = self.colliders.get(body.collider)?;
        let polygon = collider.shape().as_convex_polygon()?;
        Some(polygon.points().iter().map(point_from_na).collect())
    }

    pub fn is_dynamic(&self, body: PhysicsBody) -> bool {
        self.bodies
            .get(body.body)
            .map(|rb| rb.is_dynamic())
            .unwrap_or(false)
    }

    /// Nombre de corps dans le monde
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    // =========================================================================
    // Modificateurs
    // =========================================================================

    /// Téléporte le corps (position + angle)
    pub fn set_transform(&mut self, body: PhysicsBody, position: Vec2, angle: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body) {
            rb.set_position(Isometry::new(to_na(position), angle), true);
        }
    }

    pub fn set_linear_velocity(&mut self, body: PhysicsBody, velocity: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body) {
            rb.set_linvel(to_na(velocity), true);
        }
    }

    pub fn set_angular_velocity(&mut self, body: PhysicsBody, velocity: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body) {
            rb.set_angvel(velocity, true);
        }
    }

    /// Applique une impulsion (espace monde) en un point (espace monde)
    pub fn apply_impulse_at_point(&mut self, body: PhysicsBody, impulse: Vec2, point: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body) {
            rb.apply_impulse_at_point(to_na(impulse), point![point.x, point.y], true);
        }
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> ShapeDesc {
        ShapeDesc::Cuboid {
            half_extents: vec2(1.0, 1.0),
        }
    }

    #[test]
    fn test_create_and_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let body = world
            .create_body(&BodyDesc::dynamic(unit_box()), Material::default())
            .unwrap();
        assert_eq!(world.body_count(), 1);
        assert!(world.is_dynamic(body));

        world.remove_body(body);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_gravity_moves_dynamic_not_static() {
        let mut world = PhysicsWorld::new(vec2(0.0, -10.0), 1.0 / 60.0, 4);
        let ground = world
            .create_body(
                &BodyDesc::fixed(unit_box()).with_position(vec2(0.0, -50.0)),
                Material::default(),
            )
            .unwrap();
        let falling = world
            .create_body(
                &BodyDesc::dynamic(unit_box()).with_position(vec2(0.0, 10.0)),
                Material::default(),
            )
            .unwrap();

        for _ in 0..30 {
            world.step();
        }

        assert!(world.position(falling).y < 10.0);
        assert_eq!(world.position(ground), vec2(0.0, -50.0));
        assert!(!world.is_dynamic(ground));
    }

    #[test]
    fn test_impulse_sets_velocity_direction() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let body = world
            .create_body(
                &BodyDesc::dynamic(unit_box()).with_position(vec2(5.0, 5.0)),
                Material::default(),
            )
            .unwrap();
        world.step();

        world.apply_impulse_at_point(body, vec2(10.0, 0.0), vec2(5.0, 5.0));
        world.step();

        let vel = world.linear_velocity(body);
        assert!(vel.x > 0.0);
        assert!(vel.y.abs() < 1e-4);
        // Impulsion au centre de masse : pas de rotation
        assert!(world.angular_velocity(body).abs() < 1e-4);
    }

    #[test]
    fn test_set_transform_and_velocities() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let body = world
            .create_body(&BodyDesc::dynamic(unit_box()), Material::default())
            .unwrap();

        world.set_linear_velocity(body, vec2(3.0, -2.0));
        world.set_angular_velocity(body, 1.5);
        assert_eq!(world.linear_velocity(body), vec2(3.0, -2.0));
        assert_eq!(world.angular_velocity(body), 1.5);

        world.set_transform(body, vec2(20.0, 30.0), 0.0);
        world.set_linear_velocity(body, Vec2::ZERO);
        world.set_angular_velocity(body, 0.0);
        assert_eq!(world.position(body), vec2(20.0, 30.0));
        assert_eq!(world.rotation(body), 0.0);
        assert_eq!(world.linear_velocity(body), Vec2::ZERO);
    }

    #[test]
    fn test_convex_hull_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let triangle = vec![vec2(-5.0, 0.0), vec2(5.0, 0.0), vec2(0.0, 5.0)];
        let body = world
            .create_body(
                &BodyDesc::dynamic(ShapeDesc::ConvexHull { points: triangle }),
                Material::default(),
            )
            .unwrap();

        let hull = world.hull_points(body).unwrap();
        assert_eq!(hull.len(), 3);

        // Centroïde d'un triangle : moyenne des sommets
        let com = world.local_center_of_mass(body);
        assert!(com.x.abs() < 1e-4);
        assert!((com.y - 5.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_cuboid_has_no_hull_points() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let body = world
            .create_body(&BodyDesc::fixed(unit_box()), Material::default())
            .unwrap();
        assert!(world.hull_points(body).is_none());
    }

    #[test]
    fn test_degenerate_hull_is_rejected() {
        let mut world = PhysicsWorld::new(Vec2::ZERO, 1.0 / 60.0, 4);
        let result = world.create_body(
            &BodyDesc::dynamic(ShapeDesc::ConvexHull {
                points: vec![vec2(0.0, 0.0), vec2(1.0, 1.0)],
            }),
            Material::default(),
        );
        assert!(matches!(result, Err(SandboxError::DegenerateHull { points: 2 })));
        assert_eq!(world.body_count(), 0);
    }
}
