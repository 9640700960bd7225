// yardstep: Step-by-step shunting-yard evaluation with replay

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use yardstep::config::{init_logging, Cli};
use yardstep::plain;
use yardstep::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref(), cli.plain)?;

    let language = cli.language();
    info!(lang = language.code(), speed = ?cli.interval(), plain = cli.plain, "starting");

    if cli.plain {
        let Some(expression) = cli.expression.as_deref() else {
            eprintln!("Error: --plain needs an expression");
            eprintln!();
            eprintln!("Usage: yardstep --plain \"<expression>\"");
            std::process::exit(2);
        };

        let ok = plain::run(expression, &language, io::stdout().lock())?;
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(cli.expression.clone(), language, cli.interval());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
