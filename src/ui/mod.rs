// UI module
// Renderer protocol, renderer back ends and the terminal event loop

pub mod renderer;
pub mod scripted;
pub mod styles;
pub mod terminal;

use anyhow::Result;
use crossterm::event;
use log::trace;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration;

use crate::core::{App, AppEvent, EventHandler};

pub use renderer::{ItemStatus, Renderer, StyleColor, TabBarFlags};
pub use scripted::{DrawCall, ScriptedRenderer};
pub use styles::Styles;
pub use terminal::{TabBounds, TerminalRenderer};

/// Run the main application event loop
pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Render the UI
        terminal.draw(|f| render_app(f, app))?;

        // Callbacks queued while drawing
        app.dispatch_callbacks();

        // Handle events
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            let app_event = EventHandler::handle(event);

            handle_event(app, app_event);
        }

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draw one frame: title line, widget tree, status line
pub fn render_app(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let colors = app.renderer.settings().colors;
    f.render_widget(Paragraph::new(app.title.as_str()).style(Styles::title(&colors)), chunks[0]);

    app.renderer.set_area(chunks[1]);
    app.tree.lock().draw_frame(&mut app.renderer, &mut app.queue);
    f.render_widget(&app.renderer, chunks[1]);

    let status = app.status.borrow().clone();
    f.render_widget(Paragraph::new(status).style(Styles::status(&colors)), chunks[2]);
}

/// Handle an application event
fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Quit => app.quit(),
        AppEvent::NextTab => {
            app.navigate_next();
        }
        AppEvent::PreviousTab => {
            app.navigate_previous();
        }
        AppEvent::Pointer(event) => {
            if !app.renderer.handle_event(&event) {
                trace!("pointer event ignored");
            }
        }
        AppEvent::None => {}
    }
}
