//! A 3D ring carousel for product catalogs — spin, hover, and open items
//! from your terminal.
//!
//! Run the binary to browse the built-in demo catalog, or point it at a
//! TOML catalog file.  Run with `--init-bash` to print the shell function
//! for your `.bashrc` so clicked products open in the browser.

mod app;
mod config;
mod core;
mod shell;
mod ui;

use std::collections::HashMap;
use std::io::{self, stderr, Stderr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use image::RgbaImage;
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tracing::debug;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::core::catalog::{format_price, Catalog};
use crate::core::viewport::Camera;
use crate::shell::integration;
use crate::ui::{layout::AppLayout, scene::RingScene, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    about = "3D ring product carousel for the terminal"
)]
struct Cli {
    /// Catalog TOML file (defaults to the built-in demo set).
    catalog: Option<PathBuf>,

    /// Directory card images are resolved against.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 55.0)]
    fov: f32,

    /// Camera distance to the ring centre, in world units.
    #[arg(long, default_value_t = 6.0)]
    distance: f32,

    /// Use an orthographic camera with this zoom (pixels per world unit).
    #[arg(long)]
    ortho_zoom: Option<f32>,

    /// Override the configured URL prefix for clicked products.
    #[arg(long)]
    base_url: Option<String>,

    /// Disable idle auto-spin for this run.
    #[arg(long)]
    no_spin: bool,

    /// Print the bash shell function and exit.
    #[arg(long = "init-bash")]
    init_bash: bool,

    /// Print the zsh shell function and exit.
    #[arg(long = "init-zsh")]
    init_zsh: bool,
}

// ───────────────────────────────────────── terminal guard ────

/// Owns the raw-mode terminal.  Teardown happens in `Drop`, so the
/// terminal is restored on every exit path, including `?` bailouts.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode()?;
        let mut stderr_handle = stderr();
        execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stderr()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

// ───────────────────────────────────────── textures ──────────

/// Decode every catalog image up front.  Failures are logged and the
/// product keeps its ring slot without a texture.
fn load_textures(catalog: &Catalog, assets: &Path) -> HashMap<PathBuf, Arc<RgbaImage>> {
    let mut textures = HashMap::new();
    for product in catalog.iter() {
        let Some(image_path) = &product.image else {
            continue;
        };
        let resolved = if image_path.is_absolute() {
            image_path.clone()
        } else {
            assets.join(image_path)
        };
        match image::open(&resolved) {
            Ok(img) => {
                textures.insert(image_path.clone(), Arc::new(img.to_rgba8()));
            }
            Err(err) => debug!("texture {} failed to load: {err}", resolved.display()),
        }
    }
    debug!("loaded {} card textures", textures.len());
    textures
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── shell-integration mode ────────────────────────────────
    if cli.init_bash {
        print!("{}", integration::bash_function());
        return Ok(());
    }
    if cli.init_zsh {
        print!("{}", integration::zsh_function());
        return Ok(());
    }

    // ── build initial state ───────────────────────────────────
    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::demo(),
    };

    let mut user_config = config::AppConfig::load();
    if let Some(base_url) = cli.base_url {
        user_config.base_url = base_url;
    }
    if cli.no_spin {
        user_config.auto_spin = false;
    }
    let frame_interval = Duration::from_millis(user_config.frame_ms);

    let camera = match cli.ortho_zoom {
        Some(zoom) => Camera::Orthographic { zoom },
        None => Camera::Perspective {
            fov_deg: cli.fov,
            focal_distance: cli.distance,
        },
    };

    let mut state = AppState::new(catalog, user_config, camera);
    state.textures = load_textures(&state.catalog, &cli.assets);
    state.note_missing_textures();

    // ── terminal setup ────────────────────────────────────────
    let mut guard = TerminalGuard::acquire()?;
    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    loop {
        // Advance the animators, then draw.  Input below only mutates
        // state; everything visible comes from this one draw call.
        state.advance(Instant::now());

        guard.terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            let scene_block = Block::default()
                .title(" spinshelf ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            let scene_area = scene_block.inner(layout.scene_area);
            frame.render_widget(scene_block, layout.scene_area);

            state.sync_layout(scene_area);
            let zones = RingScene {
                catalog: &state.catalog,
                layout: &state.layout,
                placements: &state.placements,
                angle: state.ring.angle,
                hover: &state.hover,
                textures: &state.textures,
                camera: state.camera,
            }
            .render(scene_area, frame.buffer_mut());
            state.hit_zones = zones;

            let detail = state
                .hover
                .hovered()
                .and_then(|item| state.catalog.get(item))
                .map(|product| {
                    format!(
                        " {} — {}  {}",
                        product.title,
                        product.description.as_deref().unwrap_or(""),
                        format_price(product.price_minor)
                    )
                })
                .unwrap_or_default();
            frame.render_widget(
                Paragraph::new(detail).style(Theme::detail_style()),
                layout.detail_area,
            );

            frame.render_widget(
                Paragraph::new(state.status_line()).style(Theme::status_bar_style()),
                layout.status_area,
            );
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
            // Resize is picked up by the next draw's layout sync; Frame
            // just wakes the loop so the animators advance.
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Frame) => {}
            // The reader task ended (terminal event stream failed); exit
            // cleanly rather than spinning on a closed channel.
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    drop(guard); // restore the terminal before touching stdout

    integration::print_exit_payload(state.nav_url.as_deref());

    Ok(())
}
