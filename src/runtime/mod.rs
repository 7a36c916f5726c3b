use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioSink;
use crate::catalog::load_catalog;
use crate::playback::Player;

mod args;
mod event_loop;
mod settings;
mod startup;

use args::Mode;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    startup::init_logging(&settings);

    let args = args::parse(env::args().skip(1)).map_err(|e| format!("{e}\n{}", args::USAGE))?;
    if args.mode == Mode::PrintConfig {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let library = startup::open_library(args.location)?;
    let folders = rt.block_on(load_catalog(&library, &settings.catalog));

    if args.mode == Mode::List {
        println!("{}", serde_json::to_string_pretty(&folders)?);
        return Ok(());
    }

    let sink = RodioSink::open(settings.playback.volume)?;
    let mut player = Player::new(sink, settings.playback.clone());
    let mut app = App::new(folders, library.location());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let ctx = event_loop::EventLoopContext {
            settings: &settings,
            rt: &rt,
            library: &library,
        };
        event_loop::run(&mut terminal, &ctx, &mut app, &mut player)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
