//! 光源组件
//!
//! 方向光、点光源、聚光灯以及把它们打包成着色器常量缓冲区的 `LightSystem`。
//! 各数据结构的字段顺序和填充与 HLSL 中的 cbuffer 一致。

use bytemuck::{Pod, Zeroable};

use crate::core::error::{Result, SceneError};
use crate::math::utils::normalize_or_zero;
use crate::math::Vector3;
use crate::renderer::upload::constant_buffer_size;

/// 着色器中方向光数组的长度
pub const MAX_DIRECTIONAL_LIGHTS: usize = 5;

/// 着色器中点光源数组的长度
pub const MAX_POINT_LIGHTS: usize = 10;

/// 着色器中聚光灯数组的长度
pub const MAX_SPOT_LIGHTS: usize = 130;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightData {
    pub strength: [f32; 3],
    pub padding0: u32,
    pub direction: [f32; 3],
    pub padding1: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightData {
    pub strength: [f32; 3],
    pub fall_off_start: f32,
    pub position: [f32; 3],
    pub fall_off_end: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpotLightData {
    pub strength: [f32; 3],
    pub fall_off_start: f32,
    pub direction: [f32; 3],
    pub fall_off_end: f32,
    pub position: [f32; 3],
    pub spot_power: f32,
}

/// 光源常量缓冲区未对齐时的字节数：
/// `uint4 lightNum` 加上三个定长数组
pub const LIGHT_DATA_SIZE: usize = std::mem::size_of::<[u32; 4]>()
    + MAX_DIRECTIONAL_LIGHTS * std::mem::size_of::<DirectionalLightData>()
    + MAX_POINT_LIGHTS * std::mem::size_of::<PointLightData>()
    + MAX_SPOT_LIGHTS * std::mem::size_of::<SpotLightData>();

/// 光源类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// 方向光
    Directional,
    /// 点光源
    Point,
    /// 聚光灯
    Spot,
}

impl LightType {
    pub fn name(self) -> &'static str {
        match self {
            LightType::Directional => "directional",
            LightType::Point => "point",
            LightType::Spot => "spot",
        }
    }

    /// 着色器数组容量
    pub fn capacity(self) -> usize {
        match self {
            LightType::Directional => MAX_DIRECTIONAL_LIGHTS,
            LightType::Point => MAX_POINT_LIGHTS,
            LightType::Spot => MAX_SPOT_LIGHTS,
        }
    }
}

/// 光源基础 trait
pub trait Light {
    /// 获取光源类型
    fn light_type(&self) -> LightType;

    /// 获取光照强度（RGB）
    fn strength(&self) -> Vector3;

    /// 设置光照强度
    fn set_strength(&mut self, strength: Vector3);
}

/// 方向光（平行光）
///
/// 模拟太阳光等远距离光源，所有光线平行
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    strength: Vector3,
    direction: Vector3,
}

impl DirectionalLight {
    pub fn new(strength: Vector3, direction: Vector3) -> Self {
        Self {
            strength,
            direction: normalize_or_zero(&direction),
        }
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// 设置光照方向（自动归一化）
    pub fn set_direction(&mut self, direction: Vector3) {
        self.direction = normalize_or_zero(&direction);
    }

    pub fn data(&self) -> DirectionalLightData {
        DirectionalLightData {
            strength: self.strength.into(),
            padding0: 0,
            direction: self.direction.into(),
            padding1: 0,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, -1.0, 0.0))
    }
}

impl Light for DirectionalLight {
    fn light_type(&self) -> LightType {
        LightType::Directional
    }

    fn strength(&self) -> Vector3 {
        self.strength
    }

    fn set_strength(&mut self, strength: Vector3) {
        self.strength = strength;
    }
}

/// 点光源
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    strength: Vector3,
    pub position: Vector3,
    pub fall_off_start: f32,
    pub fall_off_end: f32,
}

impl PointLight {
    pub fn new(strength: Vector3, position: Vector3, fall_off_start: f32, fall_off_end: f32) -> Self {
        Self {
            strength,
            position,
            fall_off_start,
            fall_off_end,
        }
    }

    pub fn data(&self) -> PointLightData {
        PointLightData {
            strength: self.strength.into(),
            fall_off_start: self.fall_off_start,
            position: self.position.into(),
            fall_off_end: self.fall_off_end,
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros(), 0.1, 10.0)
    }
}

impl Light for PointLight {
    fn light_type(&self) -> LightType {
        LightType::Point
    }

    fn strength(&self) -> Vector3 {
        self.strength
    }

    fn set_strength(&mut self, strength: Vector3) {
        self.strength = strength;
    }
}

/// 聚光灯
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    strength: Vector3,
    direction: Vector3,
    pub position: Vector3,
    pub fall_off_start: f32,
    pub fall_off_end: f32,
    pub spot_power: f32,
}

impl SpotLight {
    pub fn new(
        strength: Vector3,
        direction: Vector3,
        position: Vector3,
        fall_off_start: f32,
        fall_off_end: f32,
        spot_power: f32,
    ) -> Self {
        Self {
            strength,
            direction: normalize_or_zero(&direction),
            position,
            fall_off_start,
            fall_off_end,
            spot_power,
        }
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// 设置光照方向（自动归一化）
    pub fn set_direction(&mut self, direction: Vector3) {
        self.direction = normalize_or_zero(&direction);
    }

    pub fn data(&self) -> SpotLightData {
        SpotLightData {
            strength: self.strength.into(),
            fall_off_start: self.fall_off_start,
            direction: self.direction.into(),
            fall_off_end: self.fall_off_end,
            position: self.position.into(),
            spot_power: self.spot_power,
        }
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::zeros(),
            0.1,
            10.0,
            10.0,
        )
    }
}

impl Light for SpotLight {
    fn light_type(&self) -> LightType {
        LightType::Spot
    }

    fn strength(&self) -> Vector3 {
        self.strength
    }

    fn set_strength(&mut self, strength: Vector3) {
        self.strength = strength;
    }
}

/// 场景中所有光源
///
/// 添加时返回光源在各自数组中的索引，场景对象通过索引驱动光源。
#[derive(Debug, Clone, Default)]
pub struct LightSystem {
    directional: Vec<DirectionalLight>,
    point: Vec<PointLight>,
    spot: Vec<SpotLight>,
}

impl LightSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directional(&mut self, light: DirectionalLight) -> Result<usize> {
        push_limited(&mut self.directional, light, LightType::Directional)
    }

    pub fn add_point(&mut self, light: PointLight) -> Result<usize> {
        push_limited(&mut self.point, light, LightType::Point)
    }

    pub fn add_spot(&mut self, light: SpotLight) -> Result<usize> {
        push_limited(&mut self.spot, light, LightType::Spot)
    }

    pub fn directional(&self) -> &[DirectionalLight] {
        &self.directional
    }

    pub fn point(&self) -> &[PointLight] {
        &self.point
    }

    pub fn spot(&self) -> &[SpotLight] {
        &self.spot
    }

    pub fn directional_mut(&mut self, index: usize) -> Result<&mut DirectionalLight> {
        self.directional
            .get_mut(index)
            .ok_or_else(|| missing(LightType::Directional, index))
    }

    pub fn point_mut(&mut self, index: usize) -> Result<&mut PointLight> {
        self.point
            .get_mut(index)
            .ok_or_else(|| missing(LightType::Point, index))
    }

    pub fn spot_mut(&mut self, index: usize) -> Result<&mut SpotLight> {
        self.spot
            .get_mut(index)
            .ok_or_else(|| missing(LightType::Spot, index))
    }

    /// 各类光源数量：(方向光, 点光源, 聚光灯, 0)
    pub fn light_num(&self) -> [u32; 4] {
        [
            self.directional.len() as u32,
            self.point.len() as u32,
            self.spot.len() as u32,
            0,
        ]
    }

    /// 打包为着色器常量缓冲区的字节，长度按 256 字节对齐
    ///
    /// 未使用的数组元素全部为零。
    pub fn stage(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(constant_buffer_size(LIGHT_DATA_SIZE));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.light_num()));

        let mut directional = [DirectionalLightData::zeroed(); MAX_DIRECTIONAL_LIGHTS];
        for (slot, light) in directional.iter_mut().zip(&self.directional) {
            *slot = light.data();
        }
        bytes.extend_from_slice(bytemuck::cast_slice(&directional));

        let mut point = [PointLightData::zeroed(); MAX_POINT_LIGHTS];
        for (slot, light) in point.iter_mut().zip(&self.point) {
            *slot = light.data();
        }
        bytes.extend_from_slice(bytemuck::cast_slice(&point));

        let mut spot = [SpotLightData::zeroed(); MAX_SPOT_LIGHTS];
        for (slot, light) in spot.iter_mut().zip(&self.spot) {
            *slot = light.data();
        }
        bytes.extend_from_slice(bytemuck::cast_slice(&spot));

        bytes.resize(constant_buffer_size(LIGHT_DATA_SIZE), 0);
        bytes
    }
}

fn push_limited<T>(lights: &mut Vec<T>, light: T, kind: LightType) -> Result<usize> {
    if lights.len() >= kind.capacity() {
        return Err(SceneError::LightLimit {
            kind: kind.name(),
            max: kind.capacity(),
        }
        .into());
    }
    lights.push(light);
    Ok(lights.len() - 1)
}

fn missing(kind: LightType, index: usize) -> crate::core::error::TerrainSceneError {
    SceneError::MissingResource(format!("{} light #{}", kind.name(), index)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TerrainSceneError;

    #[test]
    fn test_data_layout() {
        assert_eq!(std::mem::size_of::<DirectionalLightData>(), 32);
        assert_eq!(std::mem::size_of::<PointLightData>(), 32);
        assert_eq!(std::mem::size_of::<SpotLightData>(), 48);
        assert_eq!(LIGHT_DATA_SIZE, 16 + 5 * 32 + 10 * 32 + 130 * 48);
    }

    #[test]
    fn test_defaults() {
        let spot = SpotLight::default();
        assert_eq!(spot.direction(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(DirectionalLight::default().direction(), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(spot.fall_off_start, 0.1);
        assert_eq!(spot.fall_off_end, 10.0);
        assert_eq!(spot.spot_power, 10.0);
        assert_eq!(PointLight::default().fall_off_end, 10.0);
        assert_eq!(DirectionalLight::default().strength(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_direction_is_normalized() {
        let mut light = DirectionalLight::new(Vector3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(light.direction(), Vector3::new(0.0, 0.0, 1.0));
        light.set_direction(Vector3::new(-3.0, 0.0, 0.0));
        assert_eq!(light.direction(), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_capacity_limits() {
        let mut lights = LightSystem::new();
        for i in 0..MAX_DIRECTIONAL_LIGHTS {
            assert_eq!(lights.add_directional(DirectionalLight::default()).unwrap(), i);
        }
        let err = lights.add_directional(DirectionalLight::default()).unwrap_err();
        assert!(matches!(
            err,
            TerrainSceneError::Scene(SceneError::LightLimit { kind: "directional", max: 5 })
        ));

        for _ in 0..MAX_SPOT_LIGHTS {
            lights.add_spot(SpotLight::default()).unwrap();
        }
        assert!(lights.add_spot(SpotLight::default()).is_err());
        assert_eq!(lights.light_num(), [5, 0, 130, 0]);
    }

    #[test]
    fn test_missing_light_index() {
        let mut lights = LightSystem::new();
        assert!(lights.spot_mut(0).is_err());
        lights.add_spot(SpotLight::default()).unwrap();
        lights.spot_mut(0).unwrap().position = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(lights.spot()[0].position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_stage_layout() {
        let mut lights = LightSystem::new();
        lights
            .add_directional(DirectionalLight::new(Vector3::new(0.5, 0.5, 0.5), Vector3::new(0.0, -1.0, 0.0)))
            .unwrap();
        lights.add_spot(SpotLight::default()).unwrap();

        let bytes = lights.stage();
        assert_eq!(bytes.len(), constant_buffer_size(LIGHT_DATA_SIZE));
        assert_eq!(bytes.len() % 256, 0);

        let num: [u32; 4] = bytemuck::pod_read_unaligned(&bytes[..16]);
        assert_eq!(num, [1, 0, 1, 0]);

        let sun: DirectionalLightData = bytemuck::pod_read_unaligned(&bytes[16..48]);
        assert_eq!(sun.strength, [0.5, 0.5, 0.5]);
        assert_eq!(sun.direction, [0.0, -1.0, 0.0]);

        // 第二个方向光槽位为零
        assert!(bytes[48..80].iter().all(|&b| b == 0));

        let spot_offset = 16 + 5 * 32 + 10 * 32;
        let spot: SpotLightData = bytemuck::pod_read_unaligned(&bytes[spot_offset..spot_offset + 48]);
        assert_eq!(spot, SpotLight::default().data());
        assert!(bytes[spot_offset + 48..].iter().all(|&b| b == 0));
    }
}
