/// Terminal front end for the tri3d pipeline
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::path::Path;
use std::time::Duration;
use tri3d_core::{FrameBuffer, Scene};

pub mod cli;
pub mod renderer;
pub mod session;

pub use cli::{parse_args, CliError, Invocation};
pub use renderer::AsciiRenderer;
pub use session::{FrameStatus, InputSource, LoopState, Presenter, Session, POLL_TIMEOUT};

/// Reads key presses from the terminal
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyCode>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(Some(code)),
            _ => Ok(None),
        }
    }
}

/// Draws frames as ASCII art with a status line on top
pub struct TerminalPresenter<W: Write> {
    renderer: AsciiRenderer,
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(renderer: AsciiRenderer, out: W) -> Self {
        Self { renderer, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &FrameBuffer, status: &FrameStatus) -> Result<()> {
        self.renderer.render_frame(frame);

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "tri3d | frame count: {} | angle: {:.0} | Controls: A/D=Rotate ESC=Quit",
                status.frame, status.angle
            )),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;
        self.renderer.draw(&mut self.out)?;

        self.out.flush()?;
        Ok(())
    }
}

/// Main application struct for the interactive terminal view
pub struct TerminalApp {
    session: Session,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> Self {
        Self {
            session: Session::new(scene),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let (width, height) = terminal::size().context("failed to query terminal size")?;
        // one row is reserved for the status line
        let renderer = AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize);
        log::debug!("terminal view {}x{}", renderer.width(), renderer.height());
        let mut presenter = TerminalPresenter::new(renderer, stdout());

        terminal::enable_raw_mode()?;
        let result = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .map_err(anyhow::Error::from)
            .and_then(|_| self.session.run(&mut CrosstermInput, &mut presenter));

        // Cleanup
        let raw_mode = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);

        finish(result, [raw_mode, screen])
    }
}

/// Combine the loop result with terminal cleanup steps that have all been run.
///
/// A loop error wins; otherwise the first cleanup failure is reported.
fn finish<const N: usize>(result: Result<()>, cleanup: [std::io::Result<()>; N]) -> Result<()> {
    let mut first_cleanup_error = None;
    for step in cleanup {
        if let Err(err) = step {
            log::error!("failed to restore terminal: {err}");
            first_cleanup_error.get_or_insert(err);
        }
    }

    result?;
    match first_cleanup_error {
        Some(err) => Err(anyhow::Error::from(err).context("failed to restore terminal")),
        None => Ok(()),
    }
}

/// Render once and write the image, as the offline invocation does
pub fn render_offline(scene: Scene, angle: f32, output: &Path) -> Result<()> {
    log::info!("offline render at {angle} degrees to {}", output.display());
    Session::new(scene).render_to_file(angle, output)
}

/// Carry out an invocation against `scene`
pub fn dispatch(invocation: Invocation, scene: Scene) -> Result<()> {
    match invocation {
        Invocation::Exit => Ok(()),
        Invocation::Offline { angle, output } => render_offline(scene, angle, &output),
        Invocation::Interactive => {
            log::info!("starting interactive view");
            TerminalApp::new(scene).run()
        }
    }
}
