// ============================================================================
// src/main.rs – filewarden CLI
// ============================================================================

mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use filewarden::config::Config;
use filewarden::util::{fsops, permissions};
use filewarden::{table, AccessMode, AuditLogger, FileHandle, FileMetadata};
use ui::UX;

#[derive(Debug, Parser)]
#[command(name = "filewarden", version, about = "Audited single-file access")]
struct Cli {
    /// Config file (.toml, otherwise YAML). Missing file means defaults.
    #[arg(long, global = true, default_value = "filewarden.toml")]
    config: PathBuf,

    /// Audit log path; overrides the config file.
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Fail instead of creating an absent target.
    #[arg(long, global = true)]
    no_create: bool,

    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every line of the file.
    Read { path: PathBuf },
    /// Replace the file's content with the given lines.
    Write {
        path: PathBuf,
        lines: Vec<String>,
        /// Do not terminate lines with a newline.
        #[arg(long)]
        raw: bool,
    },
    /// Add lines to the end of the file.
    Append {
        path: PathBuf,
        lines: Vec<String>,
        #[arg(long)]
        raw: bool,
    },
    /// Show size and timestamps.
    Info {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the file as comma-separated rows.
    Table { path: PathBuf },
    /// Print the audit trail.
    Audit,
    Copy { src: PathBuf, dest: PathBuf },
    Move { src: PathBuf, dest: PathBuf },
    Delete { path: PathBuf },
    /// Report read/write/append permission for a path.
    Probe { path: PathBuf },
}

struct Settings {
    log_path: PathBuf,
    create_if_missing: bool,
    terminate_lines: bool,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let cfg = Config::load_or_default(Some(cli.config.as_path()))?;
        Ok(Self {
            log_path: cli
                .log
                .clone()
                .unwrap_or_else(|| PathBuf::from(&cfg.audit.log_path)),
            create_if_missing: cfg.handle.create_if_missing && !cli.no_create,
            terminate_lines: cfg.handle.terminate_lines,
        })
    }

    fn open(&self, path: &Path, mode: AccessMode) -> Result<FileHandle> {
        FileHandle::open_with_policy(path, mode, &self.log_path, self.create_if_missing)
            .with_context(|| format!("open {}", path.display()))
    }

    /// Open a handle over a file that must already exist, whatever the
    /// configured create policy says.
    fn open_existing(&self, path: &Path, mode: AccessMode) -> Result<FileHandle> {
        FileHandle::open_with_policy(path, mode, &self.log_path, false)
            .with_context(|| format!("open {}", path.display()))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let ui = UX::new(cli.quiet);
    if let Err(err) = run(&cli, &ui) {
        ui.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, ui: &UX) -> Result<()> {
    let settings = Settings::resolve(cli)?;

    match &cli.command {
        Command::Read { path } => {
            let mut handle = settings.open(path, AccessMode::Read)?;
            for line in handle.read()? {
                ui.line(&line);
            }
            handle.dispose()?;
        }
        Command::Write { path, lines, raw } => {
            let mut handle = settings.open(path, AccessMode::Write)?;
            handle.write(lines, settings.terminate_lines && !raw)?;
            ui.success(&format!(
                "{} written ({} bytes)",
                path.display(),
                handle.metadata().size
            ));
            handle.dispose()?;
        }
        Command::Append { path, lines, raw } => {
            let mut handle = settings.open(path, AccessMode::Append)?;
            handle.append(lines, settings.terminate_lines && !raw)?;
            ui.success(&format!(
                "{} appended ({} bytes)",
                path.display(),
                handle.metadata().size
            ));
            handle.dispose()?;
        }
        Command::Info { path, json } => {
            if !fsops::file_exists(path) {
                anyhow::bail!("{} does not exist", path.display());
            }
            let meta = FileMetadata::snapshot(path)?;
            if *json {
                let out = serde_json::to_string_pretty(&meta).context("serialize metadata")?;
                ui.line(&out);
            } else {
                let rows: Vec<(&str, String)> = meta.to_map().into_iter().collect();
                ui.data_panel(&path.display().to_string(), &rows);
            }
        }
        Command::Table { path } => {
            let mut handle = settings.open(path, AccessMode::Read)?;
            for row in table::read_table(&mut handle)? {
                ui.line(&row.join(" | "));
            }
        }
        Command::Audit => {
            let logger = AuditLogger::new(&settings.log_path)?;
            let entries = logger.entries()?;
            if entries.is_empty() {
                ui.info("audit trail is empty");
            }
            for entry in entries {
                ui.line(&format!(
                    "{}  {:<12} {}",
                    entry.timestamp, entry.event, entry.path
                ));
            }
        }
        Command::Copy { src, dest } => {
            let mut handle = settings.open_existing(src, AccessMode::Read)?;
            handle.copy_to(dest)?;
            ui.success(&format!("copied to {}", dest.display()));
        }
        Command::Move { src, dest } => {
            let mut handle = settings.open_existing(src, AccessMode::Read)?;
            handle.move_to(dest)?;
            ui.success(&format!("moved to {}", handle.path().display()));
        }
        Command::Delete { path } => {
            if !fsops::file_exists(path) {
                ui.warn(&format!("{} does not exist", path.display()));
                return Ok(());
            }
            fsops::delete_file(path).with_context(|| format!("delete {}", path.display()))?;
            ui.success(&format!("deleted {}", path.display()));
        }
        Command::Probe { path } => {
            let yes_no = |b: bool| (if b { "yes" } else { "no" }).to_string();
            ui.data_panel(
                &path.display().to_string(),
                &[
                    ("exists", yes_no(fsops::file_exists(path))),
                    ("read", yes_no(permissions::can_read(path))),
                    ("write", yes_no(permissions::can_write(path))),
                    ("append", yes_no(permissions::can_append(path))),
                ],
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{tempdir, TempDir};

    /// Parse `args` with the config and audit log pinned inside a temp dir.
    fn cli(dir: &TempDir, args: &[&str]) -> Cli {
        let config = dir.path().join("none.toml");
        let log = dir.path().join("audit.log");
        let mut argv = vec![
            "filewarden".to_string(),
            "--config".to_string(),
            config.display().to_string(),
            "--log".to_string(),
            log.display().to_string(),
            "--quiet".to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    fn arg(p: &Path) -> String {
        p.display().to_string()
    }

    #[test]
    fn copy_and_move_of_a_missing_source_create_nothing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("missing.txt");
        let dest = dir.path().join("dest.txt");
        let ui = UX::new(true);

        for verb in ["copy", "move"] {
            let cli = cli(&dir, &[verb, &arg(&src), &arg(&dest)]);
            assert!(run(&cli, &ui).is_err());
            assert!(!src.exists());
            assert!(!dest.exists());
        }
        assert!(!dir.path().join("audit.log").exists());
    }

    #[test]
    fn info_of_a_missing_file_fails_without_creating_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let cli = cli(&dir, &["info", "--json", &arg(&path)]);
        assert!(run(&cli, &UX::new(true)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn info_and_delete_work_on_an_unreadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.txt");
        fs::write(&path, "secret").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
        let ui = UX::new(true);

        run(&cli(&dir, &["info", &arg(&path)]), &ui).unwrap();
        run(&cli(&dir, &["delete", &arg(&path)]), &ui).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn copy_of_an_existing_source_leaves_it_in_place() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&src, "payload\n").unwrap();

        run(&cli(&dir, &["copy", &arg(&src), &arg(&dest)]), &UX::new(true)).unwrap();
        assert_eq!(fs::read_to_string(&src).unwrap(), "payload\n");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "payload\n");
    }
}
