//! 场景
//!
//! 持有一帧所需的全部 CPU 侧状态：相机、玩家、太阳、聚光灯立方体阵列、
//! 地形、草地和天空盒。帧循环按 `handle_input` → `update` → `stage` 的顺序驱动它。

use std::path::Path;
use std::sync::Arc;

use bytemuck::Pod;

use crate::component::{
    fit_shadow, Component, DirectionalLight, GameObject, Instance, InstanceData, LightObject,
    LightSystem, Material, Object, Player, RotatingObject, SceneObject, ShadowMap,
    SpotLight, Sun, Terrain, ThirdPersonCamera,
};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::input::InputSystem;
use crate::core::scene::{AssetConfig, SceneConfig};
use crate::geometry::loaders::{load_mesh, MeshLayout};
use crate::geometry::{primitives, MeshData, TerrainVertex, TextureVertex, Topology, Vertex};
use crate::math::geometry::BoundingSphere;
use crate::math::utils::normalize_or_zero;
use crate::math::Vector3;
use crate::renderer::frame::{FramePacket, MaterialBuffers};
use crate::renderer::upload::{BufferUsageType, UploadBuffer};
use crate::terrain::{mesh::patch_mesh, HeightSampler};

/// 场景使用的网格
#[derive(Debug, Clone)]
pub struct SceneMeshes {
    pub cube: MeshData<TextureVertex>,
    pub skybox: MeshData<Vertex>,
    pub billboard: MeshData<TextureVertex>,
    pub terrain: MeshData<TerrainVertex>,
}

impl SceneMeshes {
    /// 按配置加载网格文件，未配置的使用内置网格
    pub fn load(assets: &AssetConfig, sampler: &HeightSampler) -> Result<Self> {
        let cube = load_or(assets.cube_mesh.as_deref(), MeshLayout::default(), primitives::cube)?;
        let skybox = load_or(assets.skybox_mesh.as_deref(), MeshLayout::default(), primitives::skybox)?;
        let billboard = load_or(
            assets.billboard_mesh.as_deref(),
            MeshLayout {
                topology: Topology::PointList,
                ..MeshLayout::default()
            },
            primitives::billboard,
        )?;
        let terrain = patch_mesh(sampler.grid());

        Ok(Self {
            cube,
            skybox,
            billboard,
            terrain,
        })
    }
}

fn load_or<V: Pod>(
    path: Option<&str>,
    layout: MeshLayout,
    builtin: fn() -> MeshData<V>,
) -> Result<MeshData<V>> {
    match path {
        Some(path) => load_mesh(Path::new(path), layout),
        None => Ok(builtin()),
    }
}

/// 场景材质
#[derive(Debug, Clone)]
pub struct SceneMaterials {
    pub cube: Material,
    pub terrain: Material,
    pub grass: Material,
}

impl Default for SceneMaterials {
    fn default() -> Self {
        Self {
            cube: Material::single([0.95, 0.93, 0.88], 0.125, [0.1, 0.1, 0.1]),
            terrain: Material::single([0.01, 0.01, 0.01], 0.9, [0.3, 0.3, 0.3]),
            grass: Material::single([0.01, 0.01, 0.01], 0.9, [0.3, 0.3, 0.3]),
        }
    }
}

impl SceneMaterials {
    fn stage(&self) -> Result<MaterialBuffers> {
        Ok(MaterialBuffers {
            cube: Arc::new(self.cube.stage()?),
            terrain: Arc::new(self.terrain.stage()?),
            grass: Arc::new(self.grass.stage()?),
        })
    }
}

pub struct Scene {
    camera: ThirdPersonCamera,
    player: Player,
    sun: Sun,
    lights: LightSystem,

    /// 聚光灯立方体；玩家在暂存时追加到同一个实例缓冲区的末尾
    cubes: Instance<LightObject>,
    grass: Instance<Object>,
    terrain: Terrain,
    skybox: GameObject,

    meshes: SceneMeshes,
    materials: SceneMaterials,
    material_buffers: MaterialBuffers,
    /// 草地不会移动，只在构建时暂存一次
    grass_buffer: Arc<UploadBuffer<InstanceData>>,

    bounds: BoundingSphere,
    shadow_map: ShadowMap,
    clamp_to_terrain: bool,
}

impl Scene {
    /// 构建场景
    pub fn build(config: &Config, scene: &SceneConfig, sampler: HeightSampler) -> Result<Self> {
        let meshes = SceneMeshes::load(&scene.assets, &sampler)?;
        let materials = SceneMaterials::default();
        let material_buffers = materials.stage()?;

        // 太阳
        let mut lights = LightSystem::new();
        let sun_light = lights.add_directional(DirectionalLight::default())?;
        let mut sun = Sun::new(sun_light, scene.sun.radius);
        sun.set_strength(Vector3::from(scene.sun.strength));
        sun.set_angular_speed(scene.sun.angular_speed);
        sun.tick(0.0);
        sun.drive(&mut lights)?;

        // 玩家
        let mut player = Player::from_config(&config.player);
        player.object_mut().set_position(Vector3::from(scene.player_start));
        player.object_mut().set_texture_index(0);

        // 聚光灯立方体阵列
        let grid = &scene.spot_lights;
        let positions = grid.positions();
        let mut cubes = Instance::new("CUBE", positions.len());
        for position in positions {
            let spot = lights.add_spot(SpotLight::new(
                Vector3::from(grid.strength),
                Vector3::from(grid.direction),
                Vector3::zeros(),
                grid.fall_off_start,
                grid.fall_off_end,
                grid.spot_power,
            ))?;
            let mut rotating = RotatingObject::new();
            rotating.object_mut().set_position(position);
            rotating.object_mut().set_texture_index(grid.texture_index);
            let object = LightObject::new(rotating, spot);
            object.drive(&mut lights)?;
            cubes.push(object);
        }

        // 相机
        let mut camera = ThirdPersonCamera::from_config(&config.camera, config.window.aspect_ratio());
        player.update(&mut camera);

        let mut skybox = GameObject::new("Skybox", "SKYBOX");
        skybox.object_mut().set_position(camera.eye());

        // 地形和草地
        let terrain = Terrain::new(sampler, Vector3::from(scene.terrain.position));
        let placements = scene.grass.placements();
        let texture_count = scene.grass.texture_count.max(1);
        let mut grass = Instance::new("BILLBOARD", placements.len());
        for (index, (x, z)) in placements.into_iter().enumerate() {
            let mut object = Object::with_position(Vector3::new(x, terrain.height(x, z), z))
                .with_name("Grass");
            object.set_texture_index(index as u32 % texture_count);
            grass.push(object);
        }
        let grass_buffer = Arc::new(grass.stage()?);

        let center = Vector3::from(scene.bounds.center);
        let bounds = BoundingSphere::new(center, scene.bounds.radius);

        crate::engine_info!(
            spot_lights = cubes.len(),
            grass = grass.len(),
            terrain_patches = meshes.terrain.primitive_count(),
            sampler = ?terrain.sampler().kind(),
            "Scene built"
        );

        Ok(Self {
            camera,
            player,
            sun,
            lights,
            cubes,
            grass,
            terrain,
            skybox,
            meshes,
            materials,
            material_buffers,
            grass_buffer,
            bounds,
            shadow_map: ShadowMap::from_config(&config.shadow),
            clamp_to_terrain: config.player.clamp_to_terrain,
        })
    }

    /// 处理鼠标和键盘输入
    ///
    /// 鼠标位移先转动相机，再按新的相机朝向移动玩家。
    pub fn handle_input(&mut self, input: &mut InputSystem, delta_time: f32) {
        let (yaw, pitch) = input.take_rotation();
        self.camera.rotate_yaw(yaw);
        self.camera.rotate_pitch(pitch);

        self.player.handle_input(input, &self.camera, delta_time);

        if self.clamp_to_terrain {
            let position = self.player.position();
            let ground = self.terrain.height(position.x, position.z);
            self.player.clamp_to_ground(ground);
        }
    }

    /// 更新场景对象
    pub fn update(&mut self, delta_time: f32) -> Result<()> {
        self.player.update(&mut self.camera);

        self.sun.tick(delta_time);
        self.sun.drive(&mut self.lights)?;

        self.cubes.tick(delta_time);
        for object in self.cubes.objects() {
            object.drive(&mut self.lights)?;
        }

        let eye = self.camera.eye();
        self.skybox.object_mut().set_position(eye);
        Ok(())
    }

    /// 把当前状态写入上传缓冲区
    pub fn stage(&self, frame_index: u64, delta_time: f32) -> Result<FramePacket> {
        let camera = UploadBuffer::from_slice(&[self.camera.camera_data()], BufferUsageType::Constant);

        let direction = normalize_or_zero(&self.sun.direction());
        let shadow_data = fit_shadow(&direction, &self.bounds).shadow_data();
        let shadow = UploadBuffer::from_slice(&[shadow_data], BufferUsageType::Constant);

        let terrain = UploadBuffer::from_slice(
            &[self.terrain.game_object().object_data()],
            BufferUsageType::Constant,
        );
        let skybox = UploadBuffer::from_slice(&[self.skybox.object_data()], BufferUsageType::Constant);

        let mut cube_data = self.cubes.instance_data();
        cube_data.push(self.player.object().instance_data());
        let mut cube_instances =
            UploadBuffer::new(self.cubes.max_objects() + 1, BufferUsageType::Structured);
        cube_instances.copy_all(&cube_data)?;

        Ok(FramePacket {
            frame_index,
            delta_time,
            camera,
            lights: self.lights.stage(),
            shadow,
            terrain,
            skybox,
            cube_instances,
            cube_count: cube_data.len(),
            grass_instances: Arc::clone(&self.grass_buffer),
            grass_count: self.grass.len(),
            materials: self.material_buffers.clone(),
        })
    }

    // ========== 访问器 ==========

    pub fn camera(&self) -> &ThirdPersonCamera {
        &self.camera
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn lights(&self) -> &LightSystem {
        &self.lights
    }

    pub fn cubes(&self) -> &Instance<LightObject> {
        &self.cubes
    }

    pub fn grass(&self) -> &Instance<Object> {
        &self.grass
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn skybox(&self) -> &GameObject {
        &self.skybox
    }

    pub fn meshes(&self) -> &SceneMeshes {
        &self.meshes
    }

    pub fn materials(&self) -> &SceneMaterials {
        &self.materials
    }

    pub fn bounds(&self) -> &BoundingSphere {
        &self.bounds
    }

    pub fn shadow_map(&self) -> &ShadowMap {
        &self.shadow_map
    }
}
