/// Terminal-based wireframe viewer for the mesh catalog
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use wire3d_core::{
    Camera, Catalog, Classifier, CullMode, Mesh, MeshId, ProjectionMode,
    RotationState, ScreenPoint, Selection, Transform, View,
};

pub mod renderer;

pub use renderer::LineRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: i32 = 512;

/// Startup configuration for the viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub mesh: MeshId,
    pub cull_mode: CullMode,
    pub projection: ProjectionMode,
    /// Rotation applied every frame, in 1/256 turns per axis
    pub spin: (i8, i8, i8),
    pub target_fps: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mesh: MeshId::Default,
            cull_mode: CullMode::Backface,
            projection: ProjectionMode::Orthographic,
            spin: (1, 2, 0),
            target_fps: 30,
        }
    }
}

/// Counts from the last rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub front_faces: usize,
    pub faces: usize,
    pub edges: usize,
}

/// Per-frame pipeline: rotate, classify, project, draw
pub struct Scene {
    pub rotation: RotationState,
    pub camera: Camera,
    pub cull_mode: CullMode,
    classifier: Classifier,
    positions: Vec<Point3<i32>>,
    screen: Vec<ScreenPoint>,
}

impl Scene {
    pub fn new(camera: Camera, cull_mode: CullMode) -> Self {
        Self {
            rotation: RotationState::zero(),
            camera,
            cull_mode,
            classifier: Classifier::new(),
            positions: Vec::new(),
            screen: Vec::new(),
        }
    }

    pub fn render(&mut self, mesh: &Mesh<'_>, renderer: &mut LineRenderer) -> FrameStats {
        Transform::rotate_mesh(mesh, &self.rotation, &mut self.positions);
        // perspective sees faces from the camera's eye, not along a fixed axis
        let view = match self.camera.mode {
            ProjectionMode::Orthographic => View::FRONT,
            ProjectionMode::Perspective => View::eye(0, 0, self.camera.distance),
        };
        let frame = self
            .classifier
            .classify_with(mesh, &self.positions, view, self.cull_mode);

        self.camera.project_all(&self.positions, &mut self.screen);

        renderer.clear();
        renderer.render_edges(frame.edges(), &self.screen);

        FrameStats {
            front_faces: frame.front_count(),
            faces: mesh.face_count(),
            edges: frame.edges().len(),
        }
    }
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp<'c> {
    selection: Selection<'c>,
    scene: Scene,
    renderer: LineRenderer,
    spin: (i8, i8, i8),
    paused: bool,
    target_fps: u64,
    running: bool,
    stats: FrameStats,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl<'c> TerminalApp<'c> {
    pub fn new(catalog: &'c Catalog, config: ViewerConfig) -> anyhow::Result<Self> {
        let (width, height) = terminal::size()?;
        // last row is the status line
        let height = height.saturating_sub(1);

        let camera = Camera::new(width as u32, height as u32)
            .with_aspect(CELL_ASPECT)
            .with_mode(config.projection);

        Ok(Self {
            selection: Selection::new(catalog, config.mesh)?,
            scene: Scene::new(camera, config.cull_mode),
            renderer: LineRenderer::new(width as usize, height as usize),
            spin: config.spin,
            paused: false,
            target_fps: config.target_fps.max(1),
            running: true,
            stats: FrameStats::default(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> anyhow::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.target_fps);
        info!(mesh = %self.selection.id(), "viewer started");

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

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

        info!("viewer stopped");
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind == KeyEventKind::Release {
                return Ok(());
            }
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.scene.rotation.rotate(4, 0, 0),
                KeyCode::Char('s') | KeyCode::Down => self.scene.rotation.rotate(-4, 0, 0),
                KeyCode::Char('a') | KeyCode::Left => self.scene.rotation.rotate(0, -4, 0),
                KeyCode::Char('d') | KeyCode::Right => self.scene.rotation.rotate(0, 4, 0),
                KeyCode::Char('e') => self.scene.rotation.rotate(0, 0, 4),
                KeyCode::Char('r') => self.scene.rotation.rotate(0, 0, -4),
                KeyCode::Char(' ') => self.paused = !self.paused,
                KeyCode::Tab => self.select(self.selection.id().next())?,
                KeyCode::Char(digit @ '1'..='5') => {
                    let index = digit as usize - '1' as usize;
                    self.select(MeshId::ALL[index])?;
                }
                KeyCode::Char('l') => {
                    self.scene.cull_mode = match self.scene.cull_mode {
                        CullMode::Backface => CullMode::LinesOnly,
                        CullMode::LinesOnly => CullMode::Backface,
                    };
                    debug!(mode = ?self.scene.cull_mode, "cull mode toggled");
                }
                KeyCode::Char('p') => {
                    self.scene.camera.mode = match self.scene.camera.mode {
                        ProjectionMode::Orthographic => ProjectionMode::Perspective,
                        ProjectionMode::Perspective => ProjectionMode::Orthographic,
                    };
                    debug!(mode = ?self.scene.camera.mode, "projection toggled");
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn select(&mut self, id: MeshId) -> anyhow::Result<()> {
        self.selection.select(id)?;
        info!(mesh = %id, "switched mesh");
        Ok(())
    }

    fn update(&mut self) {
        if !self.paused {
            let (dx, dy, dz) = self.spin;
            self.scene.rotation.rotate(dx, dy, dz);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.stats = self.scene.render(self.selection.active(), &mut self.renderer);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, self.renderer.height() as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | front {}/{} | edges {} | {:?} | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll Tab/1-5=Mesh L=Lines P=Projection Space=Pause Q=Quit",
                self.selection.id(),
                self.stats.front_faces,
                self.stats.faces,
                self.stats.edges,
                self.scene.cull_mode,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}
