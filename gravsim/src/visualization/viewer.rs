use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;
use tracing::{info, warn};

use crate::simulation::integrator::{step, PositionSink};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Component tagging each sphere with its body index into `Scenario.system.bodies`
#[derive(Component)]
struct BodyIndex(pub usize);

/// Latest published position per body, in screen space.
/// This is the rendering sink: the simulation writes here, the sync
/// system maps body index -> entity transform.
#[derive(Resource, Default)]
struct RenderFrame {
    positions: Vec<Vec3>,
}

impl PositionSink for RenderFrame {
    fn publish(&mut self, body_id: usize, position: &NVec3) {
        if let Some(slot) = self.positions.get_mut(body_id) {
            *slot = to_screen(position);
        }
    }
}

/// World-space -> screen-space scaling factor
const SCALE3D: f32 = 10.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 1500.0;

/// Spheres are drawn at least this big so distant bodies stay visible
const MIN_VISUAL_RADIUS: f32 = 4.0;

/// Factor applied per key press to the time scale
const TIME_SCALE_STEP: f64 = 2.0;

pub fn run_3d(scenario: Scenario) {
    let frame = RenderFrame {
        positions: scenario.system.bodies.iter().map(|b| to_screen(&b.x)).collect(),
    };

    App::new()
        .insert_resource(scenario)
        .insert_resource(frame)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (time_scale_keys, physics_step_3d, sync_transforms_3d).chain())
        .run();
}

fn to_screen(x: &NVec3) -> Vec3 {
    Vec3::new(x.x as f32, x.y as f32, x.z as f32) * SCALE3D
}

/// Startup system: spawn camera, light, axes and one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
    frame: Res<RenderFrame>,
) {
    // Logged here rather than in run_3d: LogPlugin is live once Startup runs
    info!(
        bodies = scenario.system.bodies.len(),
        seed = ?scenario.seed,
        "starting 3D viewer (arrow up/down changes time scale)"
    );

    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(200.0, 150.0, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 1000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    let radius_screen = (scenario.parameters.body_radius as f32 * SCALE3D).max(MIN_VISUAL_RADIUS);
    let mesh = meshes.add(Sphere::new(radius_screen).mesh());
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..Default::default()
    });

    for (i, pos) in frame.positions.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: Transform::from_translation(*pos),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

/// Arrow Up doubles the time scale, Arrow Down halves it
fn time_scale_keys(keys: Res<ButtonInput<KeyCode>>, scenario: Res<Scenario>) {
    let factor = if keys.just_pressed(KeyCode::ArrowUp) {
        TIME_SCALE_STEP
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        TIME_SCALE_STEP.recip()
    } else {
        return;
    };

    let value = scenario.time_scale.get() * factor;
    match scenario.time_scale.set(value) {
        Ok(()) => info!(time_scale = value, "time scale updated"),
        Err(e) => warn!(error = %e, "time scale update rejected"),
    }
}

/// Per-frame physics tick driven by Bevy's frame clock
fn physics_step_3d(time: Res<Time>, mut scenario: ResMut<Scenario>, mut frame: ResMut<RenderFrame>) {
    step(&mut scenario, time.delta_seconds_f64(), &mut *frame);
}

fn sync_transforms_3d(frame: Res<RenderFrame>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(pos) = frame.positions.get(*i) {
            transform.translation = *pos;
        }
    }
}

// =========================================================================================
// Draw 3D axes for visual reference
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 100.0 * SCALE3D;
    let axis_thickness = 0.1 * SCALE3D;

    let axes = [
        (Vec3::new(axis_len, axis_thickness, axis_thickness), Color::srgb(1.0, 0.0, 0.0)), // x: red
        (Vec3::new(axis_thickness, axis_len, axis_thickness), Color::srgb(0.0, 1.0, 0.0)), // y: green
        (Vec3::new(axis_thickness, axis_thickness, axis_len), Color::srgb(0.0, 0.0, 1.0)), // z: blue
    ];

    for (size, color) in axes {
        // Cuboid is centered on its transform, so each one crosses the origin
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z).mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..Default::default()
            }),
            ..Default::default()
        });
    }
}
