use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::ChannelLogger;
use crate::state::State;
use crate::ui::Theme;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::mpsc;

type LogReceiver = mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub fn start(config: Config) -> AppResult<()> {
        let (log_tx, log_rx) = mpsc::channel::<String>();
        ChannelLogger::init(log_tx).map_err(|e| AppError::Logger(e.to_string()))?;

        info!("Starting application...");
        let theme = Theme::from_name(&config.theme_name);
        let mut app = App {
            state: State::new(
                theme,
                config.picker_directory.clone(),
                config.default_time_zone.clone(),
            ),
            config,
        };
        app.start_ui(log_rx)?;

        // Save config on exit
        if let Err(e) = app.config.save() {
            error!("Failed to save config on exit: {}", e);
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    fn start_ui(&mut self, log_rx: LogReceiver) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            // Drain captured log entries into state for the log view
            while let Ok(entry) = log_rx.try_recv() {
                self.state.push_debug_entry(entry);
            }
            terminal.draw(|frame| crate::ui::render(frame, &self.state))?;
            let proceed = terminal_event_handler
                .handle_next(&mut self.state)
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            if !proceed {
                debug!("Received application exit request.");
                break;
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}
