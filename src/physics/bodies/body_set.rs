use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::components::{BodyHandle, FieldBody, PointerBody};
use crate::core::config::SceneConfig;

/// Handle -> entity table for every simulated body of the scene. Filled once at
/// startup; bodies are never added or removed afterwards.
#[derive(Resource, Debug, Default, Clone)]
pub struct BodySet {
    entities: Vec<Entity>,
    field_count: usize,
    pointer: Option<BodyHandle>,
}

impl BodySet {
    /// `entities[..field_count]` are field bodies, an optional trailing entity is the pointer.
    pub fn new(entities: Vec<Entity>, field_count: usize) -> Self {
        let pointer = (entities.len() > field_count).then(|| BodyHandle(field_count as u32));
        Self {
            entities,
            field_count,
            pointer,
        }
    }

    pub fn entity(&self, handle: BodyHandle) -> Option<Entity> {
        self.entities.get(handle.index()).copied()
    }

    pub fn field_handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        (0..self.field_count).map(|i| BodyHandle(i as u32))
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn pointer(&self) -> Option<BodyHandle> {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

pub struct BodySpawnPlugin;

impl Plugin for BodySpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene_bodies);
    }
}

/// Spawn the field bodies and the pointer body. Meshes are attached only when
/// the asset stores exist, so headless apps get bare physics bodies.
pub fn spawn_scene_bodies(
    mut commands: Commands,
    cfg: Res<SceneConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let mut visuals = match (meshes, materials) {
        (Some(mut meshes), Some(materials)) => {
            let sphere = meshes.add(Sphere::new(1.0).mesh().uv(32, 18));
            Some((sphere, materials))
        }
        _ => None,
    };
    let b = &cfg.bodies;
    let positions = cfg.body_positions();
    let mut entities = Vec::with_capacity(positions.len() + 1);

    for (i, pos) in positions.iter().enumerate() {
        let mut body = commands.spawn((
            Name::new(format!("FieldBody:{i}")),
            BodyHandle(i as u32),
            FieldBody,
            Transform::from_translation(*pos),
            Visibility::default(),
            RigidBody::Dynamic,
            Collider::ball(b.collider_radius),
            Damping {
                linear_damping: b.linear_damping,
                angular_damping: b.angular_damping,
            },
            ExternalImpulse::default(),
        ));
        if let Some((sphere, materials)) = visuals.as_mut() {
            let [r, g, bl] = cfg.body_color(i);
            let material = materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, bl),
                perceptual_roughness: 0.0,
                ..default()
            });
            body.with_children(|parent| {
                parent.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(material),
                    Transform::from_scale(Vec3::splat(b.visual_radius)),
                ));
            });
        }
        entities.push(body.id());
    }

    let p = &cfg.pointer;
    if p.enabled {
        let handle = BodyHandle(positions.len() as u32);
        let mut pointer = commands.spawn((
            Name::new("PointerBody"),
            handle,
            PointerBody,
            Transform::from_translation(Vec3::ZERO),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::ball(p.collider_radius),
        ));
        if let Some((sphere, materials)) = visuals.as_mut() {
            let [r, g, bl] = p.color;
            let material = materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, bl),
                perceptual_roughness: 0.0,
                ..default()
            });
            pointer.with_children(|parent| {
                parent.spawn((
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(material),
                    Transform::from_scale(Vec3::splat(p.visual_radius)),
                ));
            });
        }
        entities.push(pointer.id());
    }

    info!(
        bodies = positions.len(),
        pointer = p.enabled,
        "spawned scene bodies"
    );
    commands.insert_resource(BodySet::new(entities, positions.len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_set_indexes_field_and_pointer() {
        let mut world = World::new();
        let entities: Vec<Entity> = (0..4).map(|_| world.spawn_empty().id()).collect();
        let set = BodySet::new(entities.clone(), 3);
        assert_eq!(set.field_handles().count(), 3);
        assert_eq!(set.pointer(), Some(BodyHandle(3)));
        assert_eq!(set.entity(BodyHandle(3)), Some(entities[3]));
        assert_eq!(set.entity(BodyHandle(9)), None);
    }

    #[test]
    fn body_set_without_pointer() {
        let mut world = World::new();
        let entities: Vec<Entity> = (0..2).map(|_| world.spawn_empty().id()).collect();
        let set = BodySet::new(entities, 2);
        assert_eq!(set.pointer(), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn spawns_fixed_pool_headless() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SceneConfig::metaballs())
            .add_systems(Startup, spawn_scene_bodies);
        app.update();
        let set = app.world().resource::<BodySet>().clone();
        assert_eq!(set.field_count(), 6);
        assert_eq!(set.len(), 7);
        let first = set.entity(BodyHandle(0)).unwrap();
        let damping = app.world().get::<Damping>(first).unwrap();
        assert_eq!(damping.linear_damping, 4.0);
        let tf = app.world().get::<Transform>(first).unwrap();
        assert_eq!(tf.translation, Vec3::new(1.0, 1.0, 0.5));
        let pointer = set.entity(set.pointer().unwrap()).unwrap();
        assert!(matches!(
            app.world().get::<RigidBody>(pointer),
            Some(RigidBody::KinematicPositionBased)
        ));
        let world = app.world_mut();
        let field: Vec<Entity> = world
            .query_filtered::<Entity, With<FieldBody>>()
            .iter(world)
            .collect();
        assert_eq!(field.len(), 6);
        assert!(!field.contains(&pointer));
        let pointers: Vec<Entity> = world
            .query_filtered::<Entity, With<PointerBody>>()
            .iter(world)
            .collect();
        assert_eq!(pointers, vec![pointer]);
    }
}
