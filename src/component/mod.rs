//! 组件系统模块
//!
//! 场景中的对象与它们上传给着色器的数据：
//! 对象变换、第三人称相机、玩家、光源、材质、阴影和实例化批次。

mod component;
mod object;
mod camera;
mod game_object;
mod player;
pub mod light;
mod material;
mod shadow;
mod instance;

pub use component::{Component, SceneObject};
pub use object::{InstanceData, Object, ObjectData};
pub use camera::{CameraData, ThirdPersonCamera, MAX_PITCH, MIN_PITCH};
pub use game_object::{GameObject, LightObject, RotatingObject, Sun, Terrain, GROUND_OFFSET};
pub use player::Player;
pub use light::{
    DirectionalLight, DirectionalLightData, Light, LightSystem, LightType, PointLight,
    PointLightData, SpotLight, SpotLightData,
};
pub use material::{Material, MaterialData};
pub use shadow::{fit_shadow, ScissorRect, ShadowData, ShadowMap, ShadowTransform, Viewport};
pub use instance::Instance;
