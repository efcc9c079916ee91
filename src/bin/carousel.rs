use std::{
    io::Read as _,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "carousel", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export one PNG per slide that has an image.
    Export(ExportArgs),
    /// Split text across the project's slides.
    Distribute(DistributeArgs),
    /// Apply a named style preset to the project's text style.
    Preset(PresetArgs),
    /// List style preset names.
    Presets,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Input project JSON. Image references resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Extra directory of .ttf/.otf/.ttc files (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load installed system fonts.
    #[arg(long)]
    no_system_fonts: bool,

    /// Replace existing output files.
    #[arg(long)]
    overwrite: bool,

    /// Output file prefix.
    #[arg(long, default_value = carousel::encode::sink::DEFAULT_FILE_PREFIX)]
    prefix: String,
}

#[derive(Args, Debug)]
struct DistributeArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// File holding the text to distribute (`-` reads stdin).
    #[arg(long, conflicts_with = "text_inline", required_unless_present = "text_inline")]
    text: Option<PathBuf>,

    /// Text to distribute.
    #[arg(long)]
    text_inline: Option<String>,

    /// Output project JSON; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Preset name (see `carousel presets`).
    #[arg(long)]
    name: carousel::StylePreset,

    /// Output project JSON; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let res = match cli.cmd {
        Command::Export(args) => cmd_export(args),
        Command::Distribute(args) => cmd_distribute(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Presets => {
            for preset in carousel::StylePreset::ALL {
                println!("{preset}");
            }
            Ok(())
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_project(path: &Path) -> anyhow::Result<carousel::Project> {
    let project = carousel::Project::load_json(path)
        .with_context(|| format!("load project '{}'", path.display()))?;
    project
        .validate()
        .with_context(|| format!("invalid project '{}'", path.display()))?;
    Ok(project)
}

fn write_project(project: &carousel::Project, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            project.save_json(path)?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{}", project.to_json_pretty()?),
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;

    let mut settings = carousel::ExportSettings {
        font_dirs: args.font_dirs,
        system_fonts: !args.no_system_fonts,
        file_prefix: args.prefix,
        overwrite: args.overwrite,
        ..carousel::ExportSettings::default()
    }
    .with_env_overrides();
    if args.no_system_fonts {
        settings.system_fonts = false;
    }

    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let loader = carousel::FsImageLoader::new(assets_root);
    let mut exporter = carousel::Exporter::new(loader, settings)?;

    let mut sink = carousel::DirectorySink::new(&args.out, exporter.settings().overwrite);
    let stats = exporter.export(&project, &mut sink)?;

    eprintln!(
        "exported {} of {} slides to {} ({} without image)",
        stats.exported,
        stats.slides_total,
        args.out.display(),
        stats.skipped
    );
    Ok(())
}

fn cmd_distribute(args: DistributeArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;

    let text = match (args.text_inline, args.text) {
        (Some(inline), _) => inline,
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read text from stdin")?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("read text '{}'", path.display()))?,
        (None, None) => anyhow::bail!("one of --text or --text-inline is required"),
    };

    let changed = project.edit_slides(|deck| deck.distribute_text(&text))?;
    if !changed {
        tracing::info!("nothing to distribute (blank text or no slides)");
    }
    write_project(&project, args.out.as_deref())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let mut project = read_project(&args.in_path)?;
    args.name.apply(&mut project.text_style);
    write_project(&project, args.out.as_deref())
}
