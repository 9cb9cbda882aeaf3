//! 组件基类

use super::object::Object;

/// 组件 trait
///
/// 场景中每帧需要更新的对象的基础接口
pub trait Component {
    /// 获取组件名称
    fn name(&self) -> &str;

    /// 每帧更新（可选实现）
    fn tick(&mut self, _delta_time: f32) {}
}

/// 拥有世界变换、可以放进实例批次的对象
pub trait SceneObject: Component {
    fn object(&self) -> &Object;

    fn object_mut(&mut self) -> &mut Object;
}
