// Tab Tree
// Terminal demo of retained tab bars and tabs driven by an immediate-mode renderer

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use tabtree::core::{App, RenderSettings, SharedTree, WidgetTree};
use tabtree::ui::{run_app, TerminalRenderer};
use tabtree::{build_layout, load_layout};

//--------------------------------------------------------<<

/// Log file named by this variable; logging is off when it is unset
const LOG_PATH_ENV: &str = "TABTREE_LOG";

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> Result<()> {
    init_logging()?;

    // Optional layout path as the only argument
    let layout_path = std::env::args().nth(1).map(PathBuf::from);
    let layout = load_layout(layout_path).context("failed to load layout")?;

    let mut tree = WidgetTree::new();
    build_layout(&mut tree, &layout).context("failed to build layout")?;
    info!("{} widgets in layout '{}'", tree.len(), layout.title);

    let settings = RenderSettings::default();
    let mouse_enabled = settings.mouse_enabled;
    let mut app = App::new(&layout.title, SharedTree::new(tree), TerminalRenderer::new(settings)).with_navigator();
    register_callbacks(&mut app);
    app.set_status("q: quit  Tab/←/→: switch tabs");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var(LOG_PATH_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("failed to create log file {}", path))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Handlers named by the `callback` keys of the bundled layout
fn register_callbacks(app: &mut App) {
    let status = Rc::clone(&app.status);
    app.callbacks.register("tab_changed", move |event| {
        *status.borrow_mut() = format!("selected tab: {}", event.payload);
    });

    let status = Rc::clone(&app.status);
    app.callbacks.register("button_pressed", move |event| {
        *status.borrow_mut() = format!("pressed: {}", event.payload);
    });
}
