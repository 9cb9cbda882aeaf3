//! 玩家
//!
//! W/A/S/D 在相机的水平坐标系中给出移动方向，R/F 直接升降。
//! 玩家先朝目标方向转身（每秒转过夹角的 10 倍），再沿自身前方向前进，
//! 所以转弯时走出的是一条弧线而不是折线。

use super::camera::ThirdPersonCamera;
use super::component::{Component, SceneObject};
use super::object::Object;
use crate::core::config::PlayerConfig;
use crate::core::input::{InputSystem, Key};
use crate::math::geometry::angle_between_normals;
use crate::math::utils::{normalize_or_zero, rad_to_deg};
use crate::math::Vector3;

/// 每秒转过的角度相对夹角的倍数
const TURN_RATE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Player {
    object: Object,
    /// 移动速度（单位/秒）
    speed: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            object: Object::new().with_name("Player"),
            speed,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(config.speed)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Vector3 {
        self.object.position()
    }

    /// 根据按键移动玩家
    pub fn handle_input(&mut self, input: &InputSystem, camera: &ThirdPersonCamera, delta_time: f32) {
        let step = self.speed * delta_time;

        if input.is_key_pressed(Key::R) {
            self.object.translate(Vector3::new(0.0, step, 0.0));
        }
        if input.is_key_pressed(Key::F) {
            self.object.translate(Vector3::new(0.0, -step, 0.0));
        }

        let Some(direction) = move_direction(input, camera) else {
            return;
        };

        let front = self.object.front();
        let angle = rad_to_deg(angle_between_normals(&front, &direction)) * TURN_RATE * delta_time;
        if front.cross(&direction).y >= 0.0 {
            self.object.rotate(0.0, angle, 0.0);
        } else {
            self.object.rotate(0.0, -angle, 0.0);
        }

        let front = self.object.front();
        self.object.translate(front * step);
    }

    /// 不低于给定的地面高度
    pub fn clamp_to_ground(&mut self, ground: f32) {
        let mut position = self.object.position();
        if position.y < ground {
            position.y = ground;
            self.object.set_position(position);
        }
    }

    /// 相机跟随玩家
    pub fn update(&self, camera: &mut ThirdPersonCamera) {
        camera.update_eye(self.object.position());
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl Component for Player {
    fn name(&self) -> &str {
        self.object.name()
    }
}

impl SceneObject for Player {
    fn object(&self) -> &Object {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }
}

/// 按键组合对应的水平移动方向，没有移动键时返回 `None`
///
/// 两个键同时按下时优先匹配对角方向，顺序为 W+A、W+D、S+A、S+D。
fn move_direction(input: &InputSystem, camera: &ThirdPersonCamera) -> Option<Vector3> {
    let mut front = camera.n();
    front.y = 0.0;
    let front = normalize_or_zero(&front);
    let right = camera.u();

    let w = input.is_key_pressed(Key::W);
    let a = input.is_key_pressed(Key::A);
    let s = input.is_key_pressed(Key::S);
    let d = input.is_key_pressed(Key::D);

    let direction = match (w, a, s, d) {
        (true, true, _, _) => normalize_or_zero(&(front - right)),
        (true, _, _, true) => normalize_or_zero(&(front + right)),
        (_, true, true, _) => normalize_or_zero(&(-front - right)),
        (_, _, true, true) => normalize_or_zero(&(-front + right)),
        (true, _, _, _) => front,
        (_, true, _, _) => -right,
        (_, _, true, _) => -front,
        (_, _, _, true) => right,
        _ => return None,
    };
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_behind(player: &Player) -> ThirdPersonCamera {
        let mut camera = ThirdPersonCamera::new(10.0);
        player.update(&mut camera);
        camera
    }

    #[test]
    fn test_idle_player_stays() {
        let mut player = Player::new(10.0);
        let camera = camera_behind(&player);
        player.handle_input(&InputSystem::new(), &camera, 0.1);
        assert_eq!(player.position(), Vector3::zeros());
    }

    #[test]
    fn test_forward_turns_and_moves() {
        // 默认相机位于 +X 一侧，水平观察方向为 -X
        let mut player = Player::new(10.0);
        let camera = camera_behind(&player);
        assert!(camera.n().x < 0.0);

        let mut input = InputSystem::new();
        input.press(Key::W);
        player.handle_input(&input, &camera, 0.1);

        // 夹角 90 度 * 10 * 0.1 = 90 度，一步转到 -X 再前进 1 个单位
        let front = player.object().front();
        assert!((front - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-4);
        assert!((player.position() - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_vertical_movement() {
        let mut player = Player::new(10.0);
        let camera = camera_behind(&player);
        let mut input = InputSystem::new();
        input.press(Key::R);
        player.handle_input(&input, &camera, 0.5);
        assert!((player.position().y - 5.0).abs() < 1e-5);

        input.release(Key::R);
        input.press(Key::F);
        player.handle_input(&input, &camera, 0.2);
        assert!((player.position().y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let player = Player::new(10.0);
        let camera = camera_behind(&player);
        let mut input = InputSystem::new();
        input.press(Key::W);
        input.press(Key::D);
        let direction = move_direction(&input, &camera).unwrap();
        assert!((direction.norm() - 1.0).abs() < 1e-5);
        assert!(direction.y.abs() < 1e-6);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut player = Player::new(10.0);
        player.object_mut().set_position(Vector3::new(4.0, 1.0, -2.0));
        let mut camera = ThirdPersonCamera::new(10.0);
        player.update(&mut camera);
        assert_eq!(camera.at(), player.position());
        assert!(((camera.eye() - player.position()).norm() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_to_ground() {
        let mut player = Player::new(10.0);
        player.clamp_to_ground(-3.0);
        assert_eq!(player.position().y, 0.0);
        player.clamp_to_ground(2.5);
        assert_eq!(player.position().y, 2.5);
    }
}
