//! 场景对象的空间变换
//!
//! 世界矩阵使用列向量约定，平移位于第 4 列。
//! 旋转右乘到世界矩阵上（先在局部空间旋转再平移），
//! 同时把 right / up / front 三个基向量用同一旋转更新。

use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};

use super::component::{Component, SceneObject};
use crate::math::matrix::{gpu_matrix, rotation_roll_pitch_yaw};
use crate::math::utils::deg_to_rad;
use crate::math::{Matrix4, Vector3};

/// 单个对象的常量缓冲区数据
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectData {
    /// 转置后的世界矩阵
    pub world: [[f32; 4]; 4],
}

/// 实例缓冲区中每个实例的数据
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// 转置后的世界矩阵
    pub world: [[f32; 4]; 4],
    pub texture_index: u32,
    pub material_index: u32,
    pub padding: [u32; 2],
}

/// 带纹理和材质索引的场景对象
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    name: Cow<'static, str>,

    /// 世界矩阵
    world: Matrix4,

    /// 右方向
    right: Vector3,

    /// 上方向
    up: Vector3,

    /// 前方向
    front: Vector3,

    texture_index: u32,
    material_index: u32,
}

impl Object {
    /// 创建位于原点、朝向 +Z 的对象
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("Object"),
            world: Matrix4::identity(),
            right: Vector3::new(1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            front: Vector3::new(0.0, 0.0, 1.0),
            texture_index: 0,
            material_index: 0,
        }
    }

    /// 创建带位置的对象
    pub fn with_position(position: Vector3) -> Self {
        let mut object = Self::new();
        object.set_position(position);
        object
    }

    /// 设置名称
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    // ========== 位置 ==========

    /// 获取位置（世界矩阵的平移部分）
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.world[(0, 3)], self.world[(1, 3)], self.world[(2, 3)])
    }

    /// 设置位置，旋转部分保持不变
    pub fn set_position(&mut self, position: Vector3) {
        self.world[(0, 3)] = position.x;
        self.world[(1, 3)] = position.y;
        self.world[(2, 3)] = position.z;
    }

    /// 平移
    pub fn translate(&mut self, shift: Vector3) {
        let position = self.position() + shift;
        self.set_position(position);
    }

    // ========== 旋转 ==========

    /// 按 roll、pitch、yaw 的顺序旋转，参数为角度
    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        let rotate = rotation_roll_pitch_yaw(deg_to_rad(pitch), deg_to_rad(yaw), deg_to_rad(roll));
        self.world *= rotate;

        self.right = rotate.transform_vector(&self.right);
        self.up = rotate.transform_vector(&self.up);
        self.front = rotate.transform_vector(&self.front);
    }

    // ========== 基向量 ==========

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn front(&self) -> Vector3 {
        self.front
    }

    pub fn world_matrix(&self) -> &Matrix4 {
        &self.world
    }

    // ========== 资源索引 ==========

    pub fn texture_index(&self) -> u32 {
        self.texture_index
    }

    pub fn set_texture_index(&mut self, texture_index: u32) {
        self.texture_index = texture_index;
    }

    pub fn material_index(&self) -> u32 {
        self.material_index
    }

    pub fn set_material_index(&mut self, material_index: u32) {
        self.material_index = material_index;
    }

    // ========== GPU 数据 ==========

    pub fn object_data(&self) -> ObjectData {
        ObjectData {
            world: gpu_matrix(&self.world),
        }
    }

    pub fn instance_data(&self) -> InstanceData {
        InstanceData {
            world: gpu_matrix(&self.world),
            texture_index: self.texture_index,
            material_index: self.material_index,
            padding: [0; 2],
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Object {
    fn name(&self) -> &str {
        &self.name
    }
}

impl SceneObject for Object {
    fn object(&self) -> &Object {
        self
    }

    fn object_mut(&mut self) -> &mut Object {
        self
    }
}
