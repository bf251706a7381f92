//! Ambient particle field: pollen, rain, wind-blown grit, dust, snow.
//!
//! ## Design
//!
//! A fixed pool of particles lives in a cube of half-extent `particle_radius`
//! around the camera.  Every frame the field:
//!
//! 1. resolves the zone and looks up its [`ParticleBehavior`];
//! 2. drifts each particle by the zone's velocity, respawning any that fell
//!    below the cube at the top (with fresh x/z) and wrapping x at the sides;
//! 3. eases its shared opacity and size toward the zone's values, and tints
//!    its colour toward the zone's fog colour.
//!
//! The simulation lives in the [`ParticleField`] resource so it runs (and is
//! tested) without a renderer; [`sync_particle_entities_system`] copies it onto
//! one entity per particle that all share a mesh and a material.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::constants::{PARTICLE_INITIAL_OPACITY, PARTICLE_INITIAL_SIZE};
use crate::integrator::AscentCamera;
use crate::interp::{smooth_toward, smoothing_factor};
use crate::zones::{resolve_zone, ZoneId};
use bevy::color::{Alpha, Mix};
use bevy::prelude::*;
use rand::Rng;

// ── Per-zone behaviour ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBehavior {
    /// Vertical drift (world units/s); negative falls.
    pub speed_y: f32,
    /// Horizontal drift (world units/s).
    pub speed_x: f32,
    pub opacity: f32,
    pub size: f32,
}

pub fn behavior_for(zone: ZoneId) -> ParticleBehavior {
    let (speed_y, speed_x, opacity, size) = match zone {
        // Pollen
        ZoneId::Cultivation => (-0.5, 0.2, 0.2, 0.05),
        // Mist and rain
        ZoneId::Rainforest => (-4.0, 0.1, 0.4, 0.05),
        // Wind
        ZoneId::Moorland => (-1.0, 1.5, 0.3, 0.05),
        // Dust
        ZoneId::Alpine => (-0.2, 0.5, 0.2, 0.05),
        // Snow
        ZoneId::Summit => (-0.5, 0.2, 0.6, 0.08),
    };
    ParticleBehavior {
        speed_y,
        speed_x,
        opacity,
        size,
    }
}

// ── Field resource ────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub opacity: f32,
    pub size: f32,
    pub color: LinearRgba,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            opacity: PARTICLE_INITIAL_OPACITY,
            size: PARTICLE_INITIAL_SIZE,
            color: LinearRgba::WHITE,
        }
    }
}

impl ParticleField {
    /// `count` particles scattered uniformly in the cube `[-radius, radius]³`.
    pub fn scattered(count: u32, radius: f32, rng: &mut impl Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-radius..radius),
                    rng.gen_range(-radius..radius),
                    rng.gen_range(-radius..radius),
                )
            })
            .collect();
        Self {
            positions,
            ..default()
        }
    }

    /// Move every particle one frame and recycle the ones that left the cube.
    pub fn drift(
        &mut self,
        behavior: ParticleBehavior,
        dt: f32,
        camera_y: f32,
        radius: f32,
        rng: &mut impl Rng,
    ) {
        for p in self.positions.iter_mut() {
            p.y += behavior.speed_y * dt;
            p.x += behavior.speed_x * dt;

            if p.y < camera_y - radius {
                p.y = camera_y + radius;
                p.x = rng.gen_range(-radius..radius);
                p.z = rng.gen_range(-radius..radius);
            }
            if p.x > radius {
                p.x = -radius;
            }
            if p.x < -radius {
                p.x = radius;
            }
        }
    }

    /// Ease the shared appearance toward `behavior` and `tint`.
    pub fn settle(
        &mut self,
        behavior: ParticleBehavior,
        tint: LinearRgba,
        rate: f32,
        tint_rate: f32,
        dt: f32,
    ) {
        self.opacity = smooth_toward(self.opacity, behavior.opacity, rate, dt);
        self.size = smooth_toward(self.size, behavior.size, rate, dt);
        self.color = self.color.mix(&tint, smoothing_factor(tint_rate, dt));
    }
}

/// Index of a rendered particle into [`ParticleField::positions`].
#[derive(Component, Debug, Clone, Copy)]
pub struct FieldParticle(pub usize);

/// Shared render handles for the particle entities.
#[derive(Resource)]
pub struct ParticleAssets {
    pub material: Handle<StandardMaterial>,
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Fill the field with `particle_count` particles.
pub fn seed_particle_field(mut field: ResMut<ParticleField>, config: Res<AscentConfig>) {
    let mut rng = rand::thread_rng();
    *field = ParticleField::scattered(config.particle_count, config.particle_radius, &mut rng);
}

/// Spawn one entity per particle, all sharing a unit sphere and one material.
pub fn spawn_particle_entities(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<ParticleField>,
) {
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(8, 6));
    let material = materials.add(StandardMaterial {
        base_color: Color::LinearRgba(field.color.with_alpha(field.opacity)),
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    for (i, p) in field.positions.iter().enumerate() {
        commands.spawn((
            FieldParticle(i),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(*p).with_scale(Vec3::splat(field.size)),
        ));
    }
    commands.insert_resource(ParticleAssets { material });
}

// ── Update systems ────────────────────────────────────────────────────────────

pub fn particle_field_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut field: ResMut<ParticleField>,
) {
    let dt = time.delta_secs();
    let altitude = state.altitude();
    let zone = resolve_zone(altitude);
    let behavior = behavior_for(zone.id);
    let camera_y = altitude * config.world_scale;

    let mut rng = rand::thread_rng();
    field.drift(behavior, dt, camera_y, config.particle_radius, &mut rng);
    field.settle(
        behavior,
        LinearRgba::from(zone.fog_srgba()),
        config.particle_smoothing_rate,
        config.particle_tint_rate,
        dt,
    );
}

/// Copy particle positions, size, and colour onto the rendered entities.
pub fn sync_particle_entities_system(
    field: Res<ParticleField>,
    assets: Option<Res<ParticleAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&FieldParticle, &mut Transform), Without<AscentCamera>>,
) {
    for (particle, mut transform) in query.iter_mut() {
        if let Some(p) = field.positions.get(particle.0) {
            transform.translation = *p;
            transform.scale = Vec3::splat(field.size);
        }
    }
    if let Some(assets) = assets {
        if let Some(mat) = materials.get_mut(&assets.material) {
            mat.base_color = Color::LinearRgba(field.color.with_alpha(field.opacity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_zone_has_distinct_behaviour() {
        let rain = behavior_for(ZoneId::Rainforest);
        assert_eq!(rain.speed_y, -4.0);
        let snow = behavior_for(ZoneId::Summit);
        assert_eq!(snow.size, 0.08);
        assert_eq!(snow.opacity, 0.6);
        assert_eq!(behavior_for(ZoneId::Moorland).speed_x, 1.5);
    }

    #[test]
    fn scattered_field_stays_inside_cube() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::scattered(500, 20.0, &mut rng);
        assert_eq!(field.positions.len(), 500);
        assert!(field.positions.iter().all(|p| p.abs().max_element() <= 20.0));
    }

    #[test]
    fn fallen_particles_respawn_above_camera() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = ParticleField {
            positions: vec![Vec3::new(0.0, 80.5, 0.0), Vec3::new(0.0, 90.0, 0.0)],
            ..default()
        };
        // Camera at y = 100, radius 20 → floor at 80.
        field.drift(behavior_for(ZoneId::Rainforest), 0.25, 100.0, 20.0, &mut rng);
        assert_eq!(field.positions[0].y, 120.0);
        assert!((field.positions[1].y - 89.0).abs() < 1e-5);
    }

    #[test]
    fn horizontal_drift_wraps() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = ParticleField {
            positions: vec![Vec3::new(19.9, 0.0, 0.0)],
            ..default()
        };
        field.drift(behavior_for(ZoneId::Moorland), 0.1, 0.0, 20.0, &mut rng);
        assert_eq!(field.positions[0].x, -20.0);
    }

    #[test]
    fn appearance_eases_toward_zone() {
        let mut field = ParticleField::default();
        let snow = behavior_for(ZoneId::Summit);
        field.settle(snow, LinearRgba::BLACK, 2.0, 1.0, 0.1);
        // 0.5 → 0.6 by a factor of 0.2
        assert!((field.opacity - 0.52).abs() < 1e-6);
        assert!((field.size - 0.056).abs() < 1e-6);
        assert!((field.color.red - 0.9).abs() < 1e-6);
    }
}
