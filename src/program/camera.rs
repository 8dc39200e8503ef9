use crate::foundation::core::Vec3;
use crate::foundation::math::Lerp;

/// Approach rate toward a desired camera target, per second.
const CAMERA_APPROACH_RATE: f64 = 4.0;
const CAMERA_SNAP_EPSILON: f64 = 1e-3;

/// Orbit camera state. Only the current pose is persisted; desired targets are transient
/// requests issued by phase scripts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// Orbit angles in degrees plus zoom in `z`.
    pub angle: Vec3,
    pub center: Vec3,
    #[serde(skip)]
    pub center_desired: Option<Vec3>,
    #[serde(skip)]
    pub angle_desired: Option<Vec3>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            angle: Vec3::new(290.0, 38.0, 2.5),
            center: Vec3::new(-6.0, 0.0, -80.0),
            center_desired: None,
            angle_desired: None,
        }
    }
}

impl Camera {
    /// Ease the pose toward any pending targets. Targets are cleared once reached.
    pub fn move_to_desired(&mut self, dt_secs: f64) {
        if !(dt_secs.is_finite() && dt_secs > 0.0) {
            return;
        }
        let k = 1.0 - (-dt_secs * CAMERA_APPROACH_RATE).exp();
        if let Some(target) = self.center_desired {
            self.center = Vec3::lerp(&self.center, &target, k);
            if (target - self.center).length() < CAMERA_SNAP_EPSILON {
                self.center = target;
                self.center_desired = None;
            }
        }
        if let Some(target) = self.angle_desired {
            self.angle = Vec3::lerp(&self.angle, &target, k);
            if (target - self.angle).length() < CAMERA_SNAP_EPSILON {
                self.angle = target;
                self.angle_desired = None;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/camera.rs"]
mod tests;
