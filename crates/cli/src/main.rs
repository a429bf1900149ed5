mod hardware;
mod repl;
mod report;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use carton_label_core::{AppConfig, Field, Flag, Session, format_number};
use carton_label_devices::PortEnumerator;
use carton_label_render::{LabelLayout, LabelOutput, render_zpl};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::repl::Repl;
use crate::report::{Format, render_fields};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "carton-label",
    version,
    about = "Carton labels from an order spreadsheet: look up an SO number, weigh, print ZPL or PDF"
)]
struct Cli {
    /// Config file (defaults to <config dir>/carton-label/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Look up an SO number and show the label fields it populates.
    Lookup {
        /// Order spreadsheet (.xlsx, .xls, .ods).
        file: PathBuf,
        /// SO number to look up.
        so: String,
        /// Print the fields as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Look up an SO number and print its carton label.
    Print(PrintArgs),

    /// List serial ports a scale may be attached to.
    Ports,

    /// Read the scale once and print the weight.
    Weigh {
        /// Scale port (defaults to the configured port).
        #[arg(long)]
        port: Option<String>,
    },

    /// Interactive session reading commands from stdin.
    Session {
        /// Order spreadsheet to load at startup.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show or initialise the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
struct PrintArgs {
    /// Order spreadsheet (.xlsx, .xls, .ods).
    file: PathBuf,
    /// SO number to look up.
    so: String,
    /// Write a PDF into this folder instead of sending to the printer.
    #[arg(long)]
    pdf_dir: Option<PathBuf>,
    /// Printer address, `IP[:PORT]` or hostname (port 9100 by default).
    #[arg(long, conflicts_with = "pdf_dir")]
    printer: Option<String>,
    /// Weight to print instead of the spreadsheet value.
    #[arg(long, conflicts_with = "auto_weight")]
    weight: Option<String>,
    /// Read the weight from the scale before printing.
    #[arg(long)]
    auto_weight: bool,
    /// Scale port for --auto-weight (defaults to the configured port).
    #[arg(long, requires = "auto_weight")]
    port: Option<String>,
    /// Add a total weight (weight x quantity) line.
    #[arg(long)]
    show_total_weight: bool,
    /// Print the ZPL to stdout instead of delivering it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.cmd {
        Cmd::Lookup { file, so, json } => {
            cmd_lookup(&load_config(config_path)?, &file, &so, Format::from_json_flag(json))?
        }
        Cmd::Print(args) => cmd_print(&load_config(config_path)?, args)?,
        Cmd::Ports => cmd_ports(),
        Cmd::Weigh { port } => cmd_weigh(&load_config(config_path)?, port.as_deref())?,
        Cmd::Session { file } => cmd_session(&load_config(config_path)?, file)?,
        Cmd::Config { action } => cmd_config(config_path, action)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = AppConfig::load(path)?;
    debug!(?config, "effective configuration");
    Ok(config)
}

// ── Commands ────────────────────────────────────────────────────────────

/// A session with `file` loaded and `so` looked up.
fn session_for(config: &AppConfig, file: &Path, so: &str) -> Result<Session> {
    let mut session = Session::new(config.session_settings());
    session
        .load_dataset(file)
        .context("An error occurred while loading the order data")?;
    session.set_so_number(so)?;
    Ok(session)
}

fn cmd_lookup(config: &AppConfig, file: &Path, so: &str, format: Format) -> Result<()> {
    let session = session_for(config, file, so)?;
    print!("{}", render_fields(session.fields(), format)?);
    Ok(())
}

fn cmd_print(config: &AppConfig, args: PrintArgs) -> Result<()> {
    let mut session = session_for(config, &args.file, &args.so)?;

    if let Some(addr) = &args.printer {
        session.set_printer_address(addr);
    }
    if let Some(dir) = args.pdf_dir {
        session.set_pdf_folder(Some(dir));
        session.set_flag(Flag::PrintToPdf, true);
    }
    if let Some(weight) = &args.weight {
        session.set_field(Field::Weight, weight)?;
    }
    session.set_flag(Flag::ShowTotalWeight, args.show_total_weight);

    let mut scale = hardware::scale(config.scale_settings());
    if args.auto_weight {
        if let Some(port) = &args.port {
            session.select_port(port, &hardware::ports())?;
        }
        session.set_flag(Flag::AutoWeight, true);
    }

    let layout = LabelLayout::from(&config.label);
    if args.dry_run {
        if args.auto_weight {
            session.read_weight(&mut scale)?;
        }
        print!("{}", render_zpl(session.fields(), &layout)?);
        return Ok(());
    }

    let mut output = LabelOutput::new(layout, config.printer_config());
    let delivery = session.print(&mut output, &mut scale)?;
    println!(
        "Label sent to {} ({} bytes).",
        delivery.destination, delivery.bytes
    );
    Ok(())
}

fn cmd_ports() {
    let ports = hardware::ports().list_ports();
    if ports.is_empty() {
        eprintln!("no serial ports found");
    }
    for port in ports {
        println!("{port}");
    }
}

fn cmd_weigh(config: &AppConfig, port: Option<&str>) -> Result<()> {
    let mut session = Session::new(config.session_settings());
    if let Some(port) = port {
        session.select_port(port, &hardware::ports())?;
    }
    let mut scale = hardware::scale(config.scale_settings());
    let weight = session.read_weight(&mut scale)?;
    println!("{}", format_number(weight));
    Ok(())
}

fn cmd_session(config: &AppConfig, file: Option<PathBuf>) -> Result<()> {
    let session = Session::new(config.session_settings());
    let output = LabelOutput::new(LabelLayout::from(&config.label), config.printer_config());
    let scale = hardware::scale(config.scale_settings());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let mut repl = Repl::new(session, scale, hardware::ports(), output)
        .with_prompt(stdin.is_terminal());
    if let Some(file) = file {
        repl.preload(file, &mut stdout)?;
    }
    repl.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn cmd_config(path: Option<&Path>, action: ConfigAction) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => AppConfig::default_path()?,
    };
    match action {
        ConfigAction::Show => {
            let config = AppConfig::load(Some(&path))?;
            println!("{config}");
            println!();
            println!("Config file:      {}", path.display());
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "config file {} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            AppConfig::default().save(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
