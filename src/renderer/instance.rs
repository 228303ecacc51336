//! Per-instance GPU data

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Model transform and tint for one mesh instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
}

impl Instance {
    pub fn new(model: Mat4, tint: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: tint.to_array(),
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Same color with its alpha scaled
    pub fn faded(model: Mat4, color: [f32; 4], opacity: f32) -> Self {
        let [r, g, b, a] = color;
        Self::new(model, Vec4::new(r, g, b, a * opacity))
    }
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LASER: [f32; 4] = [0.3, 1.0, 0.3, 1.0];
}

/// Point light colors, (ambient, diffuse)
pub mod lights {
    pub const LASER: ([f32; 3], [f32; 3]) = ([0.0, 0.008, 0.0], [0.0, 0.020, 0.0]);
    pub const DEATH_ZONE_ALERT: ([f32; 3], [f32; 3]) =
        ([0.0004, 0.0004, 0.0], [0.0010, 0.0010, 0.0]);
    /// Scaled by the alarm intensity
    pub const ALARM: ([f32; 3], [f32; 3]) = ([0.0032, 0.0, 0.0], [0.0080, 0.0, 0.0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Instance>(), 80);
        let instances = [Instance::new(Mat4::IDENTITY, Vec4::ONE); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 240);
    }

    #[test]
    fn test_model_round_trips() {
        let model = Mat4::from_translation(Vec3::new(0.5, -0.25, 0.0));
        assert_eq!(Instance::new(model, Vec4::ONE).model(), model);
    }

    #[test]
    fn test_faded_scales_alpha_only() {
        let instance = Instance::faded(Mat4::IDENTITY, colors::LASER, 0.5);
        assert_eq!(instance.tint, [0.3, 1.0, 0.3, 0.5]);
    }
}
