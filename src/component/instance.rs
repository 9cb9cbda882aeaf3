//! 实例化批次
//!
//! 同一网格的多个对象合并为一次实例化绘制。批次容量在创建时确定，
//! 与实例缓冲区的大小一致，超出容量的对象会被丢弃并记录警告。

use super::component::SceneObject;
use super::object::InstanceData;
use crate::core::error::Result;
use crate::renderer::upload::{BufferUsageType, UploadBuffer};

#[derive(Debug, Clone)]
pub struct Instance<T> {
    /// 场景网格表中的键
    mesh: String,
    max_objects: usize,
    objects: Vec<T>,
}

impl<T: SceneObject> Instance<T> {
    pub fn new(mesh: impl Into<String>, max_objects: usize) -> Self {
        Self {
            mesh: mesh.into(),
            max_objects,
            objects: Vec::with_capacity(max_objects),
        }
    }

    /// 添加一个对象；批次已满时忽略并返回 `false`
    pub fn push(&mut self, object: T) -> bool {
        if self.objects.len() >= self.max_objects {
            crate::engine_warn!(
                mesh = %self.mesh,
                max_objects = self.max_objects,
                object = object.name(),
                "Instance batch is full, object ignored"
            );
            return false;
        }
        self.objects.push(object);
        true
    }

    /// 依次添加，返回实际加入的数量
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, objects: I) -> usize {
        objects.into_iter().map(|object| self.push(object)).filter(|&added| added).count()
    }

    pub fn mesh(&self) -> &str {
        &self.mesh
    }

    pub fn max_objects(&self) -> usize {
        self.max_objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [T] {
        &mut self.objects
    }

    /// 更新批次中的所有对象
    pub fn tick(&mut self, delta_time: f32) {
        for object in &mut self.objects {
            object.tick(delta_time);
        }
    }

    pub fn instance_data(&self) -> Vec<InstanceData> {
        self.objects
            .iter()
            .map(|object| object.object().instance_data())
            .collect()
    }

    /// 写入一个容量为 `max_objects` 的结构化缓冲区
    pub fn stage(&self) -> Result<UploadBuffer<InstanceData>> {
        let mut buffer = UploadBuffer::new(self.max_objects, BufferUsageType::Structured);
        buffer.copy_all(&self.instance_data())?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::object::Object;
    use crate::component::game_object::RotatingObject;
    use crate::math::Vector3;

    #[test]
    fn test_capacity_is_enforced() {
        let mut batch = Instance::new("CUBE", 2);
        assert!(batch.push(Object::new()));
        assert!(batch.push(Object::new()));
        assert!(!batch.push(Object::new()));
        assert_eq!(batch.len(), 2);

        let mut batch = Instance::new("GRASS", 3);
        assert_eq!(batch.extend((0..5).map(|_| Object::new())), 3);
    }

    #[test]
    fn test_stage_instances() {
        let mut batch = Instance::new("BILLBOARD", 4);
        for i in 0..3u32 {
            let mut object = Object::with_position(Vector3::new(i as f32, 0.0, 0.0));
            object.set_texture_index(i % 2);
            batch.push(object);
        }

        let buffer = batch.stage().unwrap();
        assert_eq!(buffer.element_count(), 4);
        assert_eq!(buffer.element_size(), std::mem::size_of::<InstanceData>());

        let third = buffer.get(2).unwrap();
        assert_eq!(third.world[0][3], 2.0);
        assert_eq!(third.texture_index, 0);
        assert_eq!(buffer.get(1).unwrap().texture_index, 1);
        // 未使用的槽位为零
        assert_eq!(buffer.get(3).unwrap().world, [[0.0; 4]; 4]);
    }

    #[test]
    fn test_tick_updates_objects() {
        let mut batch = Instance::new("CUBE", 1);
        batch.push(RotatingObject::with_speed(90.0));
        batch.tick(1.0);
        let front = batch.objects()[0].object().front();
        assert!((front.x - 1.0).abs() < 1e-5);
    }
}
