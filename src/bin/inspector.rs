//! inspector - /proc report viewer.
//!
//! Prints system, hardware and task information read from a proc mount,
//! or a live CPU/memory view that refreshes until interrupted.

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use procinspect::collector::RealFs;
use procinspect::report::Inspector;
use procinspect::session::{Session, enter_mount};
use procinspect::view::ViewSelection;

const DEFAULT_PROC_PATH: &str = "/proc";

/// Inspects kernel runtime state exposed through procfs.
#[derive(Parser)]
#[command(name = "inspector", about = "Inspects kernel runtime state exposed through procfs", version)]
struct Args {
    /// Display all sections (equivalent to -rst, default).
    #[arg(short, long)]
    all: bool,

    /// Hardware information.
    #[arg(short = 'r', long)]
    hardware: bool,

    /// System information.
    #[arg(short, long)]
    system: bool,

    /// Task information.
    #[arg(short, long)]
    tasks: bool,

    /// Live view. Other view options are ignored.
    #[arg(short, long)]
    live: bool,

    /// Expected procfs mount point.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_PROC_PATH)]
    proc_path: PathBuf,

    /// Stop the live view after N refreshes instead of waiting for Ctrl-C.
    #[arg(short = 'n', long, value_name = "N")]
    iterations: Option<u64>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr, keeping stdout for the report.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["inspector", "procinspect"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if args.proc_path.as_os_str() != DEFAULT_PROC_PATH {
        info!(path = %args.proc_path.display(), "using alternative proc directory");
    }

    let views = ViewSelection::from_flags(args.all, args.hardware, args.live, args.system, args.tasks);
    if views.live && (args.hardware || args.system || args.tasks || args.all) {
        info!("live view enabled, ignoring other view options");
    }
    info!(views = %views, "view options selected");

    if let Err(e) = enter_mount(&args.proc_path) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let session = Session::new(views).with_live_iterations(args.iterations);
    let stop = Arc::new(AtomicBool::new(false));
    if session.handles_interrupt() {
        let s = stop.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("received interrupt, stopping");
            s.store(true, Ordering::SeqCst);
        }) {
            warn!("failed to set Ctrl-C handler: {}", e);
        }
    }

    let mut inspector = Inspector::new(RealFs::new(), ".");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match session.run(&mut inspector, &mut out, stop) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
