/// Terminal preview for vol3d scenes
///
/// Two surfaces over the same ASCII rasterizer: an interactive viewer that
/// plays a scenario live in the terminal, and a `Rasterizer` backend that
/// writes text frames where the external OpenGL collaborator would write
/// PNGs.
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::fs;
use std::io::{self, stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use vol3d_core::{Camera, Mesh, SceneResult};
use vol3d_render::{RasterContext, Rasterizer, Scenario};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Rasterizer backend rendering ASCII frames into text files.
pub struct TermRasterizer {
    width: usize,
    height: usize,
}

impl TermRasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Default for TermRasterizer {
    fn default() -> Self {
        Self::new(100, 50)
    }
}

impl Rasterizer for TermRasterizer {
    type Context = TermContext;

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn open(&mut self, camera: &Camera) -> SceneResult<Self::Context> {
        Ok(TermContext {
            camera: *camera,
            renderer: AsciiRenderer::new(self.width, self.height),
        })
    }
}

/// One framebuffer bound to one camera configuration.
pub struct TermContext {
    camera: Camera,
    renderer: AsciiRenderer,
}

impl RasterContext for TermContext {
    fn render(&mut self, meshes: &[&Mesh], path: &Path, wireframe: bool) -> SceneResult<()> {
        self.renderer.clear();
        self.renderer.render_scene(&self.camera, meshes, wireframe);
        fs::write(path, self.renderer.to_text())?;
        Ok(())
    }
}

/// Interactive viewer that plays a scenario in the terminal.
pub struct TerminalApp {
    renderer: AsciiRenderer,
    running: bool,
    paused: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            // Top row is reserved for the status line.
            renderer: AsciiRenderer::new(width as usize, (height as usize).saturating_sub(1)),
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self, scenario: &mut dyn Scenario) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop(scenario);

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self, scenario: &mut dyn Scenario) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            if !self.paused {
                scenario.advance();
            }

            self.render(scenario)?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self, scenario: &mut dyn Scenario) -> io::Result<()> {
        let scene = scenario.scene();

        self.renderer.clear();
        self.renderer
            .render_scene(scene.camera, &scene.meshes, false);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "vol3d preview | FPS: {:.1} | Space=Pause Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vol3d_core::Vec3;

    #[test]
    fn test_term_rasterizer_writes_text_frames() {
        let dir = std::env::temp_dir().join(format!("vol3d-term-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let camera = Camera::perspective(Vec3::new(0.5, 0.5, -1.2), Vec3::new(0.5, 0.5, 1.0));
        let mut cube = Mesh::cube();
        cube.set_translation(Vec3::new(0.5, 0.5, 0.5));
        cube.set_scale(Vec3::new(0.4, 0.4, 0.4));

        let mut rasterizer = TermRasterizer::new(40, 20);
        assert_eq!(rasterizer.extension(), "txt");

        let path = dir.join("rast0.txt");
        let mut ctx = rasterizer.open(&camera).unwrap();
        ctx.render(&[&cube], &path, false).unwrap();

        let frame = fs::read_to_string(&path).unwrap();
        assert_eq!(frame.lines().count(), 20);
        assert!(frame.chars().any(|c| c != ' ' && c != '\n'));

        fs::remove_dir_all(&dir).unwrap();
    }
}
