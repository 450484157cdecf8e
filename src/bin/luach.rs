extern crate luach as lib;

use flexi_logger::{FileSpec, Logger};
use lib::calendar::CalendarDate;
use lib::events::Dispatcher;
use lib::hebrew::JewishDate;
use lib::ui::app::App;
use nix::sys::{signal, termios};
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::input::MouseTerminal;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "luach",
    about = "Luach - A month view of the Hebrew calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the month non-interactively"
    )]
    pub show: bool,

    #[structopt(
        long = "date",
        number_of_values = 3,
        value_names = &["YEAR", "MONTH", "DAY"],
        allow_hyphen_values = true,
        help = "Hebrew date to start at, months counted from Nissan"
    )]
    pub date: Option<Vec<i32>>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn start_date(&self) -> lib::error::Result<JewishDate> {
        match self.date.as_deref() {
            Some(&[year, month, day]) => {
                let field = |value: i32| {
                    u8::try_from(value).map_err(|_| {
                        lib::error::Error::new(
                            lib::error::ErrorKind::InvalidDateConstruction,
                            &format!("{} is not a month or day", value),
                        )
                    })
                };
                JewishDate::from_ymd(year, field(month)?, field(day)?)
            }
            _ => JewishDate::today(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let initial = args.start_date()?;

    if args.show {
        let mut app_context = lib::ui::Context::new(&config, initial)?;
        app_context.resize(0, 0);
        print!(
            "{}",
            lib::ui::text::render(&app_context.snapshot(), app_context.formatter())
        );
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDOUT)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("Luach ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    // Blocked here so the dispatcher's threads inherit the mask and only its
    // signal thread receives them.
    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);
    signals_to_wait.thread_block()?;

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    // Report mouse presses for as long as the guard lives
    let mut mouse = MouseTerminal::from(stdout());
    mouse.flush()?;

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config, initial)?;

    app.run(dispatcher, term)
}
