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
// gs_sb_scene.rs - Scene construction, reset and explosions
// =============================================================================
//
// Sandbox possède le monde physique et la liste plate des entités :
// - boîtes statiques (sol, mur, obstacles)
// - boîtes dynamiques (position et couleur aléatoires)
// - un corps "spécial" optionnel, construit à partir d'une enveloppe convexe
//
// Chaque entité associe une poignée PhysicsBody à ses données d'affichage
// (couleur, taille ou sommets). Les deux sont créées et détruites ensemble.
//
// Le générateur aléatoire est possédé par Sandbox (pas d'état global) :
// avec une graine fixe, la scène est entièrement reproductible.
//
// =============================================================================

use ::rand::rngs::StdRng;
use ::rand::{Rng, SeedableRng};
use log::{debug, info};
use macroquad::color::{Color, GREEN};
use macroquad::math::{vec2, Vec2};

use crate::gs_sb_config::{FalloffLaw, SandboxConfig};
use crate::gs_sb_error::SandboxResult;
use crate::gs_sb_physics::{BodyDesc, Material, PhysicsBody, PhysicsWorld, ShapeDesc};

// =============================================================================
// Entités
// =============================================================================

/// Boîte (statique ou dynamique) et ses données d'affichage
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxEntity {
    pub body: PhysicsBody,
    /// Demi-taille en mètres
    pub half_size: Vec2,
    pub color: Color,
}

/// Corps convexe et ses données d'affichage
#[derive(Clone, Debug, PartialEq)]
pub struct HullEntity {
    pub body: PhysicsBody,
    /// Sommets de l'enveloppe, repère local du corps (mètres)
    pub points: Vec<Vec2>,
    /// Origine de rendu : centre de masse local, pour que la forme affichée
    /// tourne autour du même point que le corps physique
    pub origin: Vec2,
    pub color: Color,
}

// =============================================================================
// Fonctions de construction
// =============================================================================

/// Position aléatoire dans [min, max[
pub fn random_position<R: Rng>(rng: &mut R, min: Vec2, max: Vec2) -> Vec2 {
    vec2(rng.gen_range(min.x..max.x), rng.gen_range(min.y..max.y))
}

/// Couleur opaque aléatoire
pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::from_rgba(rng.gen(), rng.gen(), rng.gen(), 255)
}

fn dynamic_material(config: &SandboxConfig) -> Material {
    Material {
        density: config.density,
        friction: config.friction,
    }
}

/// Crée une boîte immobile
pub fn create_static_box(
    world: &mut PhysicsWorld,
    half_size: Vec2,
    position: Vec2,
) -> SandboxResult<BoxEntity> {
    let desc = BodyDesc::fixed(ShapeDesc::Cuboid {
        half_extents: half_size,
    })
    .with_position(position);
    let body = world.create_body(&desc, Material::default())?;

    Ok(BoxEntity {
        body,
        half_size,
        color: GREEN,
    })
}

/// Crée une boîte dynamique à une position donnée
pub fn create_box_at(
    world: &mut PhysicsWorld,
    config: &SandboxConfig,
    position: Vec2,
    color: Color,
) -> SandboxResult<BoxEntity> {
    let half_size = config.box_half_extents();
    let desc = BodyDesc::dynamic(ShapeDesc::Cuboid {
        half_extents: half_size,
    })
    .with_position(position)
    .with_damping(config.linear_damping, config.angular_damping);
    let body = world.create_body(&desc, dynamic_material(config))?;

    Ok(BoxEntity {
        body,
        half_size,
        color,
    })
}

/// Crée une boîte dynamique à une position aléatoire de la zone d'apparition
pub fn create_box<R: Rng>(
    world: &mut PhysicsWorld,
    config: &SandboxConfig,
    rng: &mut R,
) -> SandboxResult<BoxEntity> {
    let (min, max) = config.spawn_region();
    let position = random_position(rng, min, max);
    let color = random_color(rng);
    create_box_at(world, config, position, color)
}

/// Crée un corps dynamique à partir de l'enveloppe convexe de `points`
pub fn create_special<R: Rng>(
    world: &mut PhysicsWorld,
    config: &SandboxConfig,
    rng: &mut R,
    points: &[Vec2],
) -> SandboxResult<HullEntity> {
    let (min, max) = config.spawn_region();
    let desc = BodyDesc::dynamic(ShapeDesc::ConvexHull {
        points: points.to_vec(),
    })
    .with_position(random_position(rng, min, max))
    .with_damping(config.linear_damping, config.angular_damping);
    let body = world.create_body(&desc, dynamic_material(config))?;

    // On affiche l'enveloppe réellement calculée par le moteur
    let points = world.hull_points(body).unwrap_or_else(|| points.to_vec());
    let origin = world.local_center_of_mass(body);

    Ok(HullEntity {
        body,
        points,
        origin,
        color: random_color(rng),
    })
}

// =============================================================================
// Explosion
// =============================================================================
//
// diff = position_corps - point_explosion   (vers l'extérieur)
// impulsion = diff * force / métrique(diff)
//
// Si la métrique est sous epsilon, le corps est ignoré (division par ~0).
//
// =============================================================================

/// Impulsion à appliquer à un corps, ou None s'il est trop proche du point
pub fn explosion_impulse(
    body_position: Vec2,
    explosion_point: Vec2,
    strength: f32,
    falloff: FalloffLaw,
    epsilon: f32,
) -> Option<Vec2> {
    let diff = body_position - explosion_point;
    let metric = falloff.metric(diff.length_squared());
    if metric > epsilon {
        Some(diff * (strength / metric))
    } else {
        None
    }
}

// =============================================================================
// Sandbox - Monde + entités
// =============================================================================

pub struct Sandbox {
    config: SandboxConfig,
    world: PhysicsWorld,
    static_boxes: Vec<BoxEntity>,
    dynamic_boxes: Vec<BoxEntity>,
    special: Option<HullEntity>,
    rng: StdRng,
}

impl Sandbox {
    /// Construit la scène initiale. Le générateur est initialisé avec la
    /// graine de la configuration, ou l'entropie système à défaut.
    pub fn new(config: SandboxConfig) -> SandboxResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Construit la scène avec un générateur fourni. La configuration est
    /// revalidée : une zone d'apparition vide ou non finie ferait paniquer
    /// le tirage aléatoire.
    pub fn with_rng(config: SandboxConfig, mut rng: StdRng) -> SandboxResult<Self> {
        config.validate()?;

        let mut world = PhysicsWorld::new(
            config.gravity(),
            config.timestep,
            config.solver_iterations,
        );

        let static_boxes = config
            .static_boxes
            .iter()
            .map(|b| create_static_box(&mut world, b.half_size(), b.position()))
            .collect::<SandboxResult<Vec<_>>>()?;

        let mut sandbox = Self {
            dynamic_boxes: Vec::with_capacity(config.box_count),
            config,
            world,
            static_boxes,
            special: None,
            rng,
        };

        for _ in 0..sandbox.config.box_count {
            let entity = create_box(&mut sandbox.world, &sandbox.config, &mut sandbox.rng)?;
            sandbox.dynamic_boxes.push(entity);
        }

        if sandbox.config.special_enabled {
            let points = sandbox.config.special_points();
            sandbox.special = Some(create_special(
                &mut sandbox.world,
                &sandbox.config,
                &mut sandbox.rng,
                &points,
            )?);
        }

        info!(
            "Scene built: {} static boxes, {} dynamic boxes, special body: {}",
            sandbox.static_boxes.len(),
            sandbox.dynamic_boxes.len(),
            sandbox.special.is_some()
        );

        Ok(sandbox)
    }

    /// Remise à zéro :
    /// - boîtes dynamiques : vitesses nulles, nouvelle position aléatoire,
    ///   rotation nulle (les corps sont conservés)
    /// - corps spécial : détruit puis recréé
    pub fn reset(&mut self) -> SandboxResult<()> {
        let (min, max) = self.config.spawn_region();
        for entity in &self.dynamic_boxes {
            let position = random_position(&mut self.rng, min, max);
            self.world.set_linear_velocity(entity.body, Vec2::ZERO);
            self.world.set_angular_velocity(entity.body, 0.0);
            self.world.set_transform(entity.body, position, 0.0);
        }

        if let Some(old) = self.special.take() {
            self.world.remove_body(old.body);
        }
        if self.config.special_enabled {
            let points = self.config.special_points();
            self.special = Some(create_special(
                &mut self.world,
                &self.config,
                &mut self.rng,
                &points,
            )?);
        }

        info!("Scene reset ({} dynamic boxes)", self.dynamic_boxes.len());
        Ok(())
    }

    /// Pousse tous les corps dynamiques loin de `point` (mètres).
    /// Retourne le nombre de corps ayant reçu une impulsion.
    pub fn apply_explosion(&mut self, point: Vec2, strength: f32, falloff: FalloffLaw) -> usize {
        let epsilon = self.config.explode_epsilon;
        let targets = self
            .dynamic_boxes
            .iter()
            .map(|b| b.body)
            .chain(self.special.iter().map(|s| s.body));

        let mut pushed = 0;
        for body in targets {
            let position = self.world.position(body);
            if let Some(impulse) = explosion_impulse(position, point, strength, falloff, epsilon) {
                self.world.apply_impulse_at_point(body, impulse, position);
                pushed += 1;
            }
        }

        debug!(
            "Explosion at ({:.2}, {:.2}) strength {:.1} ({}): {} bodies pushed",
            point.x,
            point.y,
            strength,
            falloff.label(),
            pushed
        );
        pushed
    }

    /// Avance la simulation d'un pas fixe
    pub fn step(&mut self) {
        self.world.step();
    }

    // =========================================================================
    // Accesseurs
    // =========================================================================

    pub fn config(&self) -> &SandboxConfig { &self.config }
    pub fn world(&self) -> &PhysicsWorld { &self.world }
    pub fn static_boxes(&self) -> &[BoxEntity] { &self.static_boxes }
    pub fn dynamic_boxes(&self) -> &[BoxEntity] { &self.dynamic_boxes }
    pub fn special(&self) -> Option<&HullEntity> { self.special.as_ref() }

    /// Nombre de corps dynamiques (boîtes + corps spécial)
    pub fn dynamic_body_count(&self) -> usize {
        self.dynamic_boxes.len() + usize::from(self.special.is_some())
    }

    /// Libère explicitement tous les corps, puis le monde.
    /// Retourne le nombre de corps libérés.
    pub fn shutdown(mut self) -> usize {
        let mut released = 0;
        for entity in self.dynamic_boxes.drain(..).chain(self.static_boxes.drain(..)) {
            self.world.remove_body(entity.body);
            released += 1;
        }
        if let Some(special) = self.special.take() {
            self.world.remove_body(special.body);
            released += 1;
        }

        debug_assert_eq!(self.world.body_count(), 0);
        info!("Released {} bodies, dropping physics world", released);
        released
    }
}

#[cfg(test)]
impl Sandbox {
    /// Ajoute une boîte dynamique à une position donnée (scénarios de test)
    pub(crate) fn spawn_box_at(&mut self, position: Vec2) -> SandboxResult<PhysicsBody> {
        let color = random_color(&mut self.rng);
        let entity = create_box_at(&mut self.world, &self.config, position, color)?;
        self.dynamic_boxes.push(entity);
        Ok(entity.body)
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================
