//! 场景中的具体对象
//!
//! - `GameObject`：单独绘制的网格对象（天空盒、地形）
//! - `RotatingObject`：以随机速度绕自身 yaw 轴旋转
//! - `LightObject`：旋转的同时驱动一盏聚光灯
//! - `Terrain`：带高度查询的地形
//! - `Sun`：绕场景运动的方向光

use rand::Rng;

use super::component::{Component, SceneObject};
use super::light::{Light, LightSystem};
use super::object::{Object, ObjectData};
use crate::core::error::Result;
use crate::math::constants::{ONE_DIV_TWO_PI, QUARTER_PI};
use crate::math::utils::spherical_offset;
use crate::math::Vector3;
use crate::terrain::HeightSampler;

/// 放置在地形上的对象离地面的高度
pub const GROUND_OFFSET: f32 = 0.3;

/// 单独绘制的网格对象
#[derive(Debug, Clone)]
pub struct GameObject {
    object: Object,
    /// 场景网格表中的键
    mesh: String,
}

impl GameObject {
    pub fn new(name: &'static str, mesh: impl Into<String>) -> Self {
        Self {
            object: Object::new().with_name(name),
            mesh: mesh.into(),
        }
    }

    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    pub fn object_data(&self) -> ObjectData {
        self.object.object_data()
    }
}

impl Component for GameObject {
    fn name(&self) -> &str {
        self.object.name()
    }
}

impl SceneObject for GameObject {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

/// 绕 yaw 轴匀速旋转的对象
#[derive(Debug, Clone)]
pub struct RotatingObject {
    object: Object,
    /// 角速度（度/秒）
    rotating_speed: f32,
}

impl RotatingObject {
    /// 速度在 [10, 50) 度/秒之间随机
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_speed(rng.gen_range(10.0..50.0))
    }

    pub fn with_speed(rotating_speed: f32) -> Self {
        Self {
            object: Object::new().with_name("RotatingObject"),
            rotating_speed,
        }
    }

    pub fn rotating_speed(&self) -> f32 {
        self.rotating_speed
    }
}

impl Default for RotatingObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RotatingObject {
    fn name(&self) -> &str {
        self.object.name()
    }

    fn tick(&mut self, delta_time: f32) {
        self.object.rotate(0.0, self.rotating_speed * delta_time, 0.0);
    }
}

impl SceneObject for RotatingObject {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

/// 带着一盏聚光灯旋转的对象
///
/// 聚光灯保存在 `LightSystem` 中，这里只记录它的索引。
#[derive(Debug, Clone)]
pub struct LightObject {
    rotating: RotatingObject,
    spot_index: usize,
}

impl LightObject {
    pub fn new(rotating: RotatingObject, spot_index: usize) -> Self {
        Self {
            rotating,
            spot_index,
        }
    }

    pub fn spot_index(&self) -> usize {
        self.spot_index
    }

    /// 把聚光灯放到对象的位置，并沿对象的前方向照射
    pub fn drive(&self, lights: &mut LightSystem) -> Result<()> {
        let spot = lights.spot_mut(self.spot_index)?;
        spot.set_direction(self.rotating.object().front());
        spot.position = self.rotating.object().position();
        Ok(())
    }
}

impl Component for LightObject {
    fn name(&self) -> &str {
        "LightObject"
    }

    fn tick(&mut self, delta_time: f32) {
        self.rotating.tick(delta_time);
    }
}

impl SceneObject for LightObject {
    fn object(&self) -> &Object {
        self.rotating.object()
    }

    fn object_mut(&mut self) -> &mut Object {
        self.rotating.object_mut()
    }
}

/// 地形对象
#[derive(Debug, Clone)]
pub struct Terrain {
    game_object: GameObject,
    sampler: HeightSampler,
}

impl Terrain {
    pub fn new(sampler: HeightSampler, position: Vector3) -> Self {
        let mut game_object = GameObject::new("Terrain", "TERRAIN");
        game_object.object_mut().set_position(position);
        Self {
            game_object,
            sampler,
        }
    }

    /// 世界坐标 (x, z) 处可以放置对象的高度
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let position = self.game_object.object().position();
        self.sampler.height(x - position.x, z - position.z) + position.y + GROUND_OFFSET
    }

    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    pub fn game_object(&self) -> &GameObject {
        &self.game_object
    }
}

/// 太阳
///
/// 在半径为 `radius` 的球面上运动，光照方向始终指向原点。
/// 低于地平线（cos φ <= 0）时强度为零。
#[derive(Debug, Clone)]
pub struct Sun {
    object: Object,
    light_index: usize,
    strength: Vector3,
    phi: f32,
    theta: f32,
    radius: f32,
    /// φ 的变化速度（弧度/秒），0 表示静止
    angular_speed: f32,
}

impl Sun {
    pub fn new(light_index: usize, radius: f32) -> Self {
        Self {
            object: Object::new().with_name("Sun"),
            light_index,
            strength: Vector3::new(1.0, 1.0, 1.0),
            phi: ONE_DIV_TWO_PI + 0.5,
            theta: QUARTER_PI,
            radius,
            angular_speed: 0.0,
        }
    }

    pub fn set_strength(&mut self, strength: Vector3) {
        self.strength = strength;
    }

    pub fn set_angular_speed(&mut self, angular_speed: f32) {
        self.angular_speed = angular_speed;
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn position(&self) -> Vector3 {
        self.object.position()
    }

    /// 光照方向（从太阳指向原点）
    pub fn direction(&self) -> Vector3 {
        -self.object.position()
    }

    /// 当前实际强度
    pub fn current_strength(&self) -> Vector3 {
        let cosine = self.phi.cos();
        if cosine > 0.0 {
            self.strength * cosine
        } else {
            Vector3::zeros()
        }
    }

    /// 把方向和强度写入对应的方向光
    pub fn drive(&self, lights: &mut LightSystem) -> Result<()> {
        let light = lights.directional_mut(self.light_index)?;
        light.set_direction(self.direction());
        light.set_strength(self.current_strength());
        Ok(())
    }
}

impl Component for Sun {
    fn name(&self) -> &str {
        self.object.name()
    }

    fn tick(&mut self, delta_time: f32) {
        self.phi += self.angular_speed * delta_time;
        let offset = spherical_offset(self.radius, self.phi, self.theta);
        self.object.set_position(offset);
    }
}
