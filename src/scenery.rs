//! Static scenery: camera, lights, ground, placeholder terrain, and flora.
//!
//! Nothing here moves after startup.  The camera is the one exception: it is
//! spawned here and then owned by [`crate::integrator`].
//!
//! Flora is scattered per zone band as 300 instances in an annulus around the
//! climb axis (radius 10–80, so the view straight ahead stays clear), with
//! heights drawn from the band's altitude range.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::constants::{CAMERA_FAR, CAMERA_NEAR};
use crate::environment::FogState;
use crate::integrator::{camera_transform, AscentCamera};
use crate::interp::hex_color;
use crate::zones::{ZoneId, ZONES};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

// ── Constants ─────────────────────────────────────────────────────────────────

pub const FLORA_PER_ZONE: usize = 300;
pub const FLORA_INNER_RADIUS: f32 = 10.0;
pub const FLORA_OUTER_RADIUS: f32 = 80.0;

pub const TERRAIN_BLOCKS: usize = 500;
pub const TERRAIN_SPREAD: f32 = 60.0;
pub const TERRAIN_HEIGHT: f32 = 600.0;

pub const GROUND_Y: f32 = 70.0;
pub const GROUND_SIZE: f32 = 100.0;

// ── Flora ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloraKind {
    /// Cone
    Tree,
    /// Tapered cylinder
    TallTree,
    /// Top-heavy frustum
    Groundsel,
    Rock,
    Ice,
}

pub fn flora_for(zone: ZoneId) -> (FloraKind, &'static str) {
    match zone {
        ZoneId::Cultivation => (FloraKind::Tree, "#4a6741"),
        ZoneId::Rainforest => (FloraKind::TallTree, "#1a3c18"),
        ZoneId::Moorland => (FloraKind::Groundsel, "#6b4c35"),
        ZoneId::Alpine => (FloraKind::Rock, "#8c8c8c"),
        ZoneId::Summit => (FloraKind::Ice, "#e6f7ff"),
    }
}

fn flora_mesh(kind: FloraKind) -> Mesh {
    match kind {
        FloraKind::Tree => Cone::new(1.0, 4.0).mesh().resolution(8).into(),
        FloraKind::TallTree => ConicalFrustum {
            radius_top: 0.5,
            radius_bottom: 1.0,
            height: 8.0,
        }
        .mesh()
        .resolution(8)
        .into(),
        FloraKind::Groundsel => ConicalFrustum {
            radius_top: 0.8,
            radius_bottom: 0.2,
            height: 6.0,
        }
        .mesh()
        .resolution(8)
        .into(),
        FloraKind::Rock => Sphere::new(1.5).mesh().uv(6, 4),
        FloraKind::Ice => Tetrahedron::default().mesh().into(),
    }
}

/// Transforms for `count` flora instances between `min_altitude` and
/// `max_altitude`, in world units.
pub fn flora_placements(
    min_altitude: f32,
    max_altitude: f32,
    count: usize,
    world_scale: f32,
    rng: &mut impl Rng,
) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let y = rng.gen_range(min_altitude..max_altitude) * world_scale;
            let angle = rng.gen_range(0.0..TAU);
            let radius = rng.gen_range(FLORA_INNER_RADIUS..FLORA_OUTER_RADIUS);
            Transform::from_xyz(angle.cos() * radius, y, angle.sin() * radius)
                .with_rotation(Quat::from_rotation_y(rng.gen_range(0.0..TAU)))
                .with_scale(Vec3::splat(rng.gen_range(0.5..1.5)))
        })
        .collect()
}

/// Scattered unit boxes standing in for terrain.
pub fn terrain_placements(count: usize, rng: &mut impl Rng) -> Vec<Transform> {
    (0..count)
        .map(|_| {
            let half = TERRAIN_SPREAD * 0.5;
            Transform::from_xyz(
                rng.gen_range(-half..half),
                rng.gen_range(0.0..TERRAIN_HEIGHT),
                rng.gen_range(-half..half),
            )
            .with_rotation(Quat::from_euler(
                EulerRot::XYZ,
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                0.0,
            ))
            .with_scale(Vec3::splat(rng.gen_range(0.5..1.0)))
        })
        .collect()
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Spawn the scene camera at the starting altitude with fog already settled.
pub fn spawn_camera(
    mut commands: Commands,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    fog: Res<FogState>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera_fov_degrees.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        camera_transform(state.altitude(), &config),
        fog.to_distance_fog(),
        AmbientLight {
            brightness: 500.0,
            ..default()
        },
        AscentCamera,
    ));
}

pub fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<AscentConfig>,
) {
    let mut rng = rand::thread_rng();

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // ── Ground ────────────────────────────────────────────────────────────────
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb_u8(0x3a, 0x3a, 0x3a))),
        Transform::from_xyz(0.0, GROUND_Y, 0.0),
    ));

    // ── Placeholder terrain ───────────────────────────────────────────────────
    let block = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x88, 0x88, 0x88),
        cull_mode: None,
        ..default()
    });
    for transform in terrain_placements(TERRAIN_BLOCKS, &mut rng) {
        commands.spawn((
            Mesh3d(block.clone()),
            MeshMaterial3d(stone.clone()),
            transform,
        ));
    }

    // ── Flora ─────────────────────────────────────────────────────────────────
    for zone in ZONES.iter() {
        let (kind, color) = flora_for(zone.id);
        let mesh = meshes.add(flora_mesh(kind));
        let material = materials.add(StandardMaterial {
            base_color: Color::Srgba(hex_color(color)),
            perceptual_roughness: if kind == FloraKind::Ice { 0.1 } else { 0.8 },
            cull_mode: None,
            double_sided: true,
            ..default()
        });
        let placements = flora_placements(
            zone.min_altitude,
            zone.max_altitude,
            FLORA_PER_ZONE,
            config.world_scale,
            &mut rng,
        );
        for transform in placements {
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                transform,
            ));
        }
    }

    info!(
        "[scenery] Spawned {} terrain blocks and {} flora",
        TERRAIN_BLOCKS,
        FLORA_PER_ZONE * ZONES.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn flora_stays_in_its_band_and_annulus() {
        let mut rng = StdRng::seed_from_u64(9);
        let placements = flora_placements(1800.0, 2800.0, 300, 0.1, &mut rng);
        assert_eq!(placements.len(), 300);
        for t in placements {
            let p = t.translation;
            assert!((180.0..280.0).contains(&p.y), "y = {}", p.y);
            let r = Vec2::new(p.x, p.z).length();
            assert!(r >= FLORA_INNER_RADIUS - 1e-3 && r <= FLORA_OUTER_RADIUS + 1e-3);
            assert!((0.5..1.5).contains(&t.scale.x));
        }
    }

    #[test]
    fn every_zone_has_flora() {
        let kinds: Vec<_> = ZONES.iter().map(|z| flora_for(z.id).0).collect();
        assert_eq!(
            kinds,
            vec![
                FloraKind::Tree,
                FloraKind::TallTree,
                FloraKind::Groundsel,
                FloraKind::Rock,
                FloraKind::Ice
            ]
        );
    }

    #[test]
    fn terrain_blocks_fill_column() {
        let mut rng = StdRng::seed_from_u64(3);
        for t in terrain_placements(200, &mut rng) {
            assert!(t.translation.x.abs() <= TERRAIN_SPREAD * 0.5);
            assert!((0.0..TERRAIN_HEIGHT).contains(&t.translation.y));
        }
    }
}
