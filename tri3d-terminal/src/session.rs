/// Presentation loop driving clear, transform, draw and present cycles
use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use nalgebra::Matrix4;
use std::path::Path;
use std::time::Duration;
use tri3d_core::{
    Buffers, FrameBuffer, IndexHandle, PositionHandle, Primitive, RasterError, Rasterizer, Scene,
    Transform, ANGLE_STEP, DEFAULT_OUTPUT,
};

/// Longest wait for a key press between two frames
pub const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Source of key presses for the interactive loop
pub trait InputSource {
    /// Wait at most `timeout` for one key; `None` when nothing was pressed
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>>;
}

/// Shows a finished frame
pub trait Presenter {
    fn present(&mut self, frame: &FrameBuffer, status: &FrameStatus) -> Result<()>;
}

/// Per-frame information shown next to the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStatus {
    pub frame: u64,
    pub angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exit,
}

/// A loaded scene together with the rasterizer that draws it
pub struct Session {
    scene: Scene,
    rasterizer: Rasterizer,
    positions: PositionHandle,
    indices: IndexHandle,
    angle: f32,
    frame_count: u64,
}

impl Session {
    pub fn new(scene: Scene) -> Self {
        let mut rasterizer = Rasterizer::new(scene.width, scene.height);
        let positions = rasterizer.load_positions(scene.positions.clone());
        let indices = rasterizer.load_indices(scene.indices.clone());

        Self {
            scene,
            rasterizer,
            positions,
            indices,
            angle: 0.0,
            frame_count: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current rotation angle in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Frames presented so far by the interactive loop
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.rasterizer.frame_buffer()
    }

    fn draw_frame(&mut self, model: Matrix4<f32>) -> Result<&FrameBuffer, RasterError> {
        self.rasterizer.clear(Buffers::COLOR | Buffers::DEPTH);

        self.rasterizer.set_model(model);
        self.rasterizer.set_view(self.scene.camera.view_matrix());
        self.rasterizer.set_projection(self.scene.camera.projection_matrix());

        self.rasterizer
            .draw(self.positions, self.indices, Primitive::Triangle)?;
        Ok(self.rasterizer.frame_buffer())
    }

    /// Render one frame rotated about the scene's rotation axis
    pub fn render_offline(&mut self, angle: f32) -> Result<&FrameBuffer, RasterError> {
        let model = Transform::axis_rotation(&self.scene.rotation_axis, angle);
        self.draw_frame(model)
    }

    /// Render one frame rotated about Z by the current angle
    pub fn render_interactive(&mut self) -> Result<&FrameBuffer, RasterError> {
        self.draw_frame(Transform::rotation_z(self.angle))
    }

    /// Offline render written as an 8-bit image to `path`
    pub fn render_to_file<P: AsRef<Path>>(&mut self, angle: f32, path: P) -> Result<()> {
        let path = path.as_ref();
        self.render_offline(angle)
            .context("failed to draw offline frame")?
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn render_to_default(&mut self, angle: f32) -> Result<()> {
        self.render_to_file(angle, DEFAULT_OUTPUT)
    }

    /// Apply one key press: `a` rotates +10°, `d` rotates -10°, `Esc` quits
    pub fn handle_key(&mut self, key: KeyCode) -> LoopState {
        match key {
            KeyCode::Esc => return LoopState::Exit,
            KeyCode::Char('a') => self.angle += ANGLE_STEP,
            KeyCode::Char('d') => self.angle -= ANGLE_STEP,
            _ => {}
        }
        LoopState::Running
    }

    /// Run frames until the input source reports `Esc`
    pub fn run<I, P>(&mut self, input: &mut I, presenter: &mut P) -> Result<()>
    where
        I: InputSource,
        P: Presenter,
    {
        loop {
            self.render_interactive()?;

            let status = FrameStatus {
                frame: self.frame_count,
                angle: self.angle,
            };
            presenter.present(self.rasterizer.frame_buffer(), &status)?;
            log::trace!("frame count: {} angle: {}", self.frame_count, self.angle);
            self.frame_count += 1;

            if let Some(key) = input.poll_key(POLL_TIMEOUT)? {
                if self.handle_key(key) == LoopState::Exit {
                    log::info!("exit requested after {} frames", self.frame_count);
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted polls; quits once the script runs out
    struct ScriptedInput {
        polls: VecDeque<Option<KeyCode>>,
    }

    impl ScriptedInput {
        fn new(polls: impl IntoIterator<Item = Option<KeyCode>>) -> Self {
            Self {
                polls: polls.into_iter().collect(),
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
            assert_eq!(timeout, POLL_TIMEOUT);
            Ok(self.polls.pop_front().unwrap_or(Some(KeyCode::Esc)))
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        frames: Vec<(FrameStatus, usize)>,
    }

    impl Presenter for RecordingPresenter {
        fn present(&mut self, frame: &FrameBuffer, status: &FrameStatus) -> Result<()> {
            self.frames.push((*status, frame.lit_pixel_count()));
            Ok(())
        }
    }

    #[test]
    fn test_key_handling() {
        let mut session = Session::new(Scene::default());
        assert_eq!(session.handle_key(KeyCode::Char('a')), LoopState::Running);
        assert_eq!(session.angle(), 10.0);
        assert_eq!(session.handle_key(KeyCode::Char('d')), LoopState::Running);
        assert_eq!(session.handle_key(KeyCode::Char('d')), LoopState::Running);
        assert_eq!(session.angle(), -10.0);
        assert_eq!(session.handle_key(KeyCode::Char('A')), LoopState::Running);
        assert_eq!(session.handle_key(KeyCode::Left), LoopState::Running);
        assert_eq!(session.angle(), -10.0);
        assert_eq!(session.handle_key(KeyCode::Esc), LoopState::Exit);
    }

    #[test]
    fn test_ten_presses_add_one_hundred_degrees() {
        let mut session = Session::new(Scene::default());
        let mut input = ScriptedInput::new(std::iter::repeat(Some(KeyCode::Char('a'))).take(10));
        let mut presenter = RecordingPresenter::default();

        session.run(&mut input, &mut presenter).unwrap();

        assert_eq!(session.angle(), 100.0);
        assert_eq!(presenter.frames.len(), 11);
        let last = presenter.frames.last().unwrap().0;
        assert_eq!(last, FrameStatus { frame: 10, angle: 100.0 });
    }

    #[test]
    fn test_escape_stops_updates() {
        let mut session = Session::new(Scene::default());
        let mut input = ScriptedInput::new([
            None,
            Some(KeyCode::Char('d')),
            Some(KeyCode::Esc),
            Some(KeyCode::Char('a')),
        ]);
        let mut presenter = RecordingPresenter::default();

        session.run(&mut input, &mut presenter).unwrap();

        assert_eq!(session.angle(), -10.0);
        assert_eq!(session.frame_count(), 3);
        assert_eq!(presenter.frames.len(), 3);
        assert!(presenter.frames.iter().all(|(_, lit)| *lit > 0));
        // the unread 'a' is never applied
        assert_eq!(input.polls.len(), 1);
    }

    #[test]
    fn test_offline_render_uses_axis_rotation() {
        let mut session = Session::new(Scene::default());
        let unrotated = session.render_offline(0.0).unwrap().clone();
        let rotated = session.render_offline(45.0).unwrap().clone();
        assert!(unrotated.lit_pixel_count() > 0);
        assert_ne!(unrotated, rotated);

        // a zero angle is the same frame in both modes
        session.set_angle(0.0);
        assert_eq!(session.render_interactive().unwrap(), &unrotated);
    }

    #[test]
    fn test_small_canvas() {
        let mut session = Session::new(Scene::default().with_canvas(70, 70));
        assert_eq!(session.scene().width, 70);
        let frame = session.render_offline(0.0).unwrap();
        assert_eq!((frame.width(), frame.height()), (70, 70));
        assert!(frame.lit_pixel_count() > 0);
    }

    #[test]
    fn test_render_to_file_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut session = Session::new(Scene::default());
        session.render_to_file(0.0, &path).unwrap();

        assert_eq!(image_dimensions(&path), (700, 700));
    }

    fn image_dimensions(path: &Path) -> (u32, u32) {
        let bytes = std::fs::read(path).unwrap();
        // PNG IHDR: width and height follow the 8 byte signature and 8 byte chunk header
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (width, height)
    }
}
