//! Per-frame ordering: input first, then matrices, then the draw.

use glam::Mat4;
use moonvis_camera::{FrameMatrices, InteractionModel, apply_held_keys};
use moonvis_input::KeyboardState;
use moonvis_render::{GraphicsSurface, RenderError};

/// Hands the frame's transforms to the surface and draws `mesh`.
pub fn present_frame<S: GraphicsSurface>(
    surface: &mut S,
    mesh: &S::Mesh,
    matrices: &FrameMatrices,
    projection: Mat4,
) -> Result<(), RenderError> {
    surface.set_uniform("model", matrices.model)?;
    surface.set_uniform("view", matrices.view)?;
    surface.set_uniform("projection", projection)?;
    surface.draw(mesh)
}

/// Applies held movement keys for `elapsed` seconds, then presents the
/// resulting state. Pointer and wheel events have already been applied as
/// they arrived. Returns the matrices that were drawn.
pub fn update_and_present<S: GraphicsSurface>(
    model: &mut InteractionModel,
    keyboard: &KeyboardState,
    elapsed: f32,
    surface: &mut S,
    mesh: &S::Mesh,
    projection: Mat4,
) -> Result<FrameMatrices, RenderError> {
    apply_held_keys(model, keyboard, elapsed);
    let matrices = model.build_matrices();
    present_frame(surface, mesh, &matrices, projection)?;
    Ok(matrices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use moonvis_input::RawKeyEvent;
    use moonvis_mesh::SphereVertex;
    use winit::keyboard::KeyCode;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Upload { vertices: usize, indices: usize },
        Uniform(String, Mat4),
        Draw(u32),
    }

    /// Records every call instead of touching a GPU.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
        reject_uniform: Option<&'static str>,
    }

    impl GraphicsSurface for RecordingSurface {
        type Mesh = u32;

        fn upload_mesh(
            &mut self,
            _label: &str,
            vertices: &[SphereVertex],
            indices: &[u32],
        ) -> Result<u32, RenderError> {
            self.calls.push(Call::Upload {
                vertices: vertices.len(),
                indices: indices.len(),
            });
            Ok(7)
        }

        fn set_uniform(&mut self, name: &str, value: Mat4) -> Result<(), RenderError> {
            if self.reject_uniform == Some(name) {
                return Err(RenderError::UnknownUniform {
                    name: name.to_string(),
                });
            }
            self.calls.push(Call::Uniform(name.to_string(), value));
            Ok(())
        }

        fn draw(&mut self, mesh: &u32) -> Result<(), RenderError> {
            self.calls.push(Call::Draw(*mesh));
            Ok(())
        }
    }

    #[test]
    fn test_uniforms_are_set_before_draw() {
        let mut surface = RecordingSurface::default();
        let matrices = InteractionModel::default().build_matrices();
        let projection = Mat4::perspective_rh(0.8, 1.5, 100.0, 0.1);

        present_frame(&mut surface, &7, &matrices, projection).unwrap();

        assert_eq!(
            surface.calls,
            vec![
                Call::Uniform("model".into(), matrices.model),
                Call::Uniform("view".into(), matrices.view),
                Call::Uniform("projection".into(), projection),
                Call::Draw(7),
            ]
        );
    }

    #[test]
    fn test_uniform_error_skips_draw() {
        let mut surface = RecordingSurface {
            reject_uniform: Some("view"),
            ..Default::default()
        };
        let matrices = InteractionModel::default().build_matrices();

        let err = present_frame(&mut surface, &1, &matrices, Mat4::IDENTITY).unwrap_err();
        assert!(matches!(err, RenderError::UnknownUniform { ref name } if name == "view"));
        assert!(!surface.calls.iter().any(|c| matches!(c, Call::Draw(_))));
    }

    #[test]
    fn test_upload_then_draw_uses_returned_handle() {
        let mut surface = RecordingSurface::default();
        let mesh = moonvis_mesh::generate_sphere(1.0, 8, 4).unwrap();
        let handle = surface.upload_mesh("sphere", mesh.vertices(), mesh.indices()).unwrap();

        present_frame(&mut surface, &handle, &InteractionModel::default().build_matrices(), Mat4::IDENTITY)
            .unwrap();

        assert_eq!(
            surface.calls.first(),
            Some(&Call::Upload {
                vertices: mesh.vertex_count(),
                indices: mesh.index_count(),
            })
        );
        assert_eq!(surface.calls.last(), Some(&Call::Draw(7)));
    }

    #[test]
    fn test_held_keys_apply_before_matrices() {
        let mut surface = RecordingSurface::default();
        let mut model = InteractionModel::default();
        let mut keyboard = KeyboardState::new();
        keyboard.process_raw(RawKeyEvent::pressed(KeyCode::KeyW));

        let drawn = update_and_present(&mut model, &keyboard, 0.2, &mut surface, &1, Mat4::IDENTITY).unwrap();

        // 2.5 units/s for 0.2 s toward the body from z = 3.5.
        let position = model.rig().position();
        assert!((position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        assert_eq!(drawn, model.build_matrices());
        assert!(surface.calls.contains(&Call::Uniform("view".into(), drawn.view)));
    }

    #[test]
    fn test_idle_frames_draw_identical_matrices() {
        let mut surface = RecordingSurface::default();
        let mut model = InteractionModel::default();
        let keyboard = KeyboardState::new();

        let first = update_and_present(&mut model, &keyboard, 0.016, &mut surface, &1, Mat4::IDENTITY).unwrap();
        let second = update_and_present(&mut model, &keyboard, 0.016, &mut surface, &1, Mat4::IDENTITY).unwrap();
        assert_eq!(first, second);
    }
}
