//! Sky gradient dome and star field.
//!
//! ## Gradient
//!
//! The dome is a camera-following sphere whose vertex colours blend a horizon
//! colour (`bottom`, the current zone's fog colour) into a zenith colour
//! (`top`, stepped by [`SKY_THRESHOLDS`], which are independent of the zone
//! table).  Each vertex's blend weight is fixed at spawn:
//!
//! ```text
//! h = normalize(p + (0, offset, 0)).y
//! w = max(h, 0) ^ exponent
//! ```
//!
//! so per frame only the two colours change.
//!
//! ## Stars
//!
//! A single mesh of small triangles on a shell inside the dome.  Opacity ramps
//! linearly from 0 at 3500 m to 1 at 5500 m; the shell spins slowly about Y.
//!
//! Both [`SkyGradient`] and [`StarFieldState`] are smoothed independently at
//! their own configured rates.

use crate::altitude::AltitudeState;
use crate::config::AscentConfig;
use crate::constants::{
    SKY_DOME_EXPONENT, SKY_DOME_OFFSET, SKY_DOME_RADIUS, SKY_THRESHOLDS, SKY_TOP_COLORS,
    STAR_FADE_END, STAR_FADE_START, STAR_ROTATION_SPEED, STAR_SHELL_RADIUS, STAR_SIZE,
};
use crate::integrator::AscentCamera;
use crate::interp::{hex_color, map_linear, smooth_toward, smoothing_factor};
use crate::zones::resolve_zone;
use bevy::color::{Alpha, ColorToComponents, Mix};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use rand::Rng;

// ── Gradient state ────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub top: LinearRgba,
    pub bottom: LinearRgba,
}

impl Default for SkyGradient {
    /// Daylight blue over white; eases to the zone colours in the first seconds.
    fn default() -> Self {
        Self {
            top: LinearRgba::from(Srgba::hex("#0077ff").unwrap_or(Srgba::BLUE)),
            bottom: LinearRgba::WHITE,
        }
    }
}

impl SkyGradient {
    pub fn step(&mut self, altitude: f32, rate: f32, dt: f32) {
        let t = smoothing_factor(rate, dt);
        self.top = self.top.mix(&LinearRgba::from(sky_top_color(altitude)), t);
        let bottom = LinearRgba::from(resolve_zone(altitude).fog_srgba());
        self.bottom = self.bottom.mix(&bottom, t);
    }

    /// Colour at blend weight `w` (0 = horizon, 1 = zenith).
    pub fn at(&self, w: f32) -> LinearRgba {
        self.bottom.mix(&self.top, w)
    }
}

/// Zenith colour for `altitude`.
pub fn sky_top_color(altitude: f32) -> Srgba {
    let band = SKY_THRESHOLDS
        .iter()
        .position(|&threshold| altitude < threshold)
        .unwrap_or(SKY_THRESHOLDS.len());
    hex_color(SKY_TOP_COLORS[band])
}

/// Blend weight of a dome vertex at local position `p`.
pub fn dome_weight(p: Vec3, offset: f32, exponent: f32) -> f32 {
    let h = (p + Vec3::new(0.0, offset, 0.0)).normalize_or_zero().y;
    h.max(0.0).powf(exponent).max(0.0)
}

// ── Star state ────────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct StarFieldState {
    pub opacity: f32,
    /// Accumulated spin about Y (rad).
    pub rotation: f32,
}

impl StarFieldState {
    pub fn step(&mut self, altitude: f32, rate: f32, dt: f32) {
        self.opacity = smooth_toward(self.opacity, star_target_opacity(altitude), rate, dt);
        self.rotation = (self.rotation + dt * STAR_ROTATION_SPEED) % std::f32::consts::TAU;
    }
}

/// Star opacity the altitude asks for: 0 below 3500 m, 1 from 5500 m.
pub fn star_target_opacity(altitude: f32) -> f32 {
    if altitude <= STAR_FADE_START {
        return 0.0;
    }
    map_linear(altitude, STAR_FADE_START, STAR_FADE_END, 0.0, 1.0).clamp(0.0, 1.0)
}

// ── Components ───────────────────────────────────────────────────────────────

/// The gradient dome; holds one blend weight per mesh vertex.
#[derive(Component)]
pub struct SkyDome {
    pub weights: Vec<f32>,
}

/// Marker for the star-field mesh entity.
#[derive(Component)]
pub struct StarField;

// ── Update systems ───────────────────────────────────────────────────────────

pub fn sky_gradient_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut gradient: ResMut<SkyGradient>,
) {
    gradient.step(state.altitude(), config.sky_smoothing_rate, time.delta_secs());
}

pub fn star_field_system(
    time: Res<Time>,
    config: Res<AscentConfig>,
    state: Res<AltitudeState>,
    mut stars: ResMut<StarFieldState>,
) {
    stars.step(state.altitude(), config.star_smoothing_rate, time.delta_secs());
}

// ── Startup: meshes ──────────────────────────────────────────────────────────

pub fn spawn_sky_dome(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    gradient: Res<SkyGradient>,
) {
    let mut mesh = Sphere::new(SKY_DOME_RADIUS).mesh().uv(32, 15);
    let weights: Vec<f32> = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => positions
            .iter()
            .map(|p| dome_weight(Vec3::from_array(*p), SKY_DOME_OFFSET, SKY_DOME_EXPONENT))
            .collect(),
        _ => Vec::new(),
    };
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, dome_colors(&gradient, &weights));

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            fog_enabled: false,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        SkyDome { weights },
    ));
}

pub fn spawn_star_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<AscentConfig>,
) {
    let mut rng = rand::thread_rng();
    let positions = star_positions(config.star_count, STAR_SHELL_RADIUS, &mut rng);

    commands.spawn((
        Mesh3d(meshes.add(star_field_mesh(&positions, STAR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.0),
            unlit: true,
            fog_enabled: false,
            alpha_mode: AlphaMode::Add,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        StarField,
    ));
}

// ── Update: push state to the scene ─────────────────────────────────────────

/// Keep the dome centred on the camera and recolour its vertices.
pub fn sync_sky_dome_system(
    gradient: Res<SkyGradient>,
    camera: Query<&Transform, (With<AscentCamera>, Without<SkyDome>)>,
    mut domes: Query<(&SkyDome, &Mesh3d, &mut Transform)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    for (dome, mesh, mut transform) in domes.iter_mut() {
        transform.translation = camera.translation;
        if !gradient.is_changed() {
            continue;
        }
        if let Some(mesh) = meshes.get_mut(&mesh.0) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, dome_colors(&gradient, &dome.weights));
        }
    }
}

/// Keep the star shell centred on the camera, spin it, and fade it.
pub fn sync_star_field_system(
    stars: Res<StarFieldState>,
    camera: Query<&Transform, (With<AscentCamera>, Without<StarField>)>,
    mut fields: Query<(&MeshMaterial3d<StandardMaterial>, &mut Transform), With<StarField>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(camera) = camera.single() else {
        return;
    };
    for (material, mut transform) in fields.iter_mut() {
        transform.translation = camera.translation;
        transform.rotation = Quat::from_rotation_y(stars.rotation);
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color.set_alpha(stars.opacity);
        }
    }
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

fn dome_colors(gradient: &SkyGradient, weights: &[f32]) -> Vec<[f32; 4]> {
    weights
        .iter()
        .map(|&w| gradient.at(w).to_f32_array())
        .collect()
}

/// Uniformly distributed points on a sphere of `radius`.
pub fn star_positions(count: u32, radius: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let theta = std::f32::consts::TAU * rng.gen::<f32>();
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            )
        })
        .collect()
}

/// One small inward-facing triangle per star.
pub fn star_field_mesh(stars: &[Vec3], size: f32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(stars.len() * 3);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(stars.len() * 3);

    for &star in stars {
        let n = star.normalize_or_zero();
        let u = n.any_orthonormal_vector();
        let v = n.cross(u);
        let inward = (-n).to_array();
        for corner in [u, v, -(u + v) * 0.5] {
            positions.push((star + corner * size).to_array());
            normals.push(inward);
        }
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn top_colour_steps_at_fixed_thresholds() {
        assert_eq!(sky_top_color(1000.0), hex_color("#4CA1AF"));
        assert_eq!(sky_top_color(1800.0), hex_color("#2C3E50"));
        assert_eq!(sky_top_color(3999.0), hex_color("#1a2a6c"));
        assert_eq!(sky_top_color(4000.0), hex_color("#0f0c29"));
        assert_eq!(sky_top_color(5000.0), hex_color("#000000"));
    }

    #[test]
    fn star_opacity_ramps_between_3500_and_5500() {
        assert_eq!(star_target_opacity(800.0), 0.0);
        assert_eq!(star_target_opacity(3500.0), 0.0);
        assert!((star_target_opacity(4500.0) - 0.5).abs() < 1e-6);
        assert_eq!(star_target_opacity(5500.0), 1.0);
        assert_eq!(star_target_opacity(6000.0), 1.0);
    }

    #[test]
    fn stars_fade_in_gradually() {
        let mut stars = StarFieldState::default();
        stars.step(5500.0, 0.5, 0.1);
        assert!((stars.opacity - 0.05).abs() < 1e-6);
        assert!(stars.rotation > 0.0);
    }

    #[test]
    fn dome_weight_is_zero_below_horizon_and_one_at_zenith() {
        assert_eq!(dome_weight(Vec3::new(0.0, -1000.0, 0.0), 100.0, 0.6), 0.0);
        assert!((dome_weight(Vec3::new(0.0, 1000.0, 0.0), 100.0, 0.6) - 1.0).abs() < 1e-6);
        let side = dome_weight(Vec3::new(1000.0, 0.0, 0.0), 100.0, 0.6);
        assert!(side > 0.0 && side < 1.0);
    }

    #[test]
    fn gradient_converges_to_zone_colours() {
        let mut gradient = SkyGradient::default();
        for _ in 0..1200 {
            gradient.step(4500.0, 0.5, 1.0 / 30.0);
        }
        let top = LinearRgba::from(sky_top_color(4500.0));
        let bottom = LinearRgba::from(hex_color("#a6a6a6"));
        assert!((gradient.top.red - top.red).abs() < 1e-3);
        assert!((gradient.bottom.green - bottom.green).abs() < 1e-3);
    }

    #[test]
    fn star_positions_lie_on_shell() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in star_positions(200, 900.0, &mut rng) {
            assert!((p.length() - 900.0).abs() < 0.1);
        }
    }

    #[test]
    fn star_mesh_has_three_vertices_per_star() {
        let mut rng = StdRng::seed_from_u64(9);
        let stars = star_positions(10, 900.0, &mut rng);
        let mesh = star_field_mesh(&stars, 1.5);
        assert_eq!(mesh.count_vertices(), 30);
    }
}
