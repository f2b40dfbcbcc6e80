use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vitae", version)]
struct Cli {
    /// JSON config file. `VITAE_*` environment variables and flags override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the local draft.
    #[arg(long, global = true)]
    draft_dir: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available templates.
    Templates,
    /// Print the layout tree of a resume as JSON.
    Render(RenderArgs),
    /// Export a resume as an A4 PDF.
    Export(ExportArgs),
    /// Inspect or modify the local draft.
    Draft {
        #[command(subcommand)]
        cmd: DraftCommand,
    },
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input resume JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Template tag. Unknown tags fall back to the default template.
    #[arg(long)]
    template: Option<String>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input resume JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the PDF is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Template tag. Unknown tags fall back to the default template.
    #[arg(long)]
    template: Option<String>,

    /// Font file used for all text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Keep only the first page instead of paginating.
    #[arg(long)]
    clip: bool,
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Print the stored draft as JSON.
    Show,
    /// Replace the stored draft with a resume JSON file.
    Import {
        /// Input resume JSON.
        #[arg(long = "in")]
        in_path: PathBuf,
    },
    /// Delete the stored draft.
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "vitae=debug" } else { "vitae=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    match cli.cmd {
        Command::Templates => cmd_templates(),
        Command::Render(args) => cmd_render(args),
        Command::Export(args) => cmd_export(args, config).await,
        Command::Draft { cmd } => cmd_draft(cmd, &config),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<vitae::Config> {
    let base = match &cli.config {
        Some(path) => vitae::Config::from_path(path)?,
        None => vitae::Config::default(),
    };
    let mut config = base.with_env()?;
    if let Some(dir) = &cli.draft_dir {
        config.draft_dir = dir.clone();
    }
    Ok(config)
}

fn read_resume(path: &Path, template: Option<&str>) -> anyhow::Result<vitae::Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read resume '{}'", path.display()))?;
    let mut doc = vitae::normalize_json(&text)
        .with_context(|| format!("parse resume '{}'", path.display()))?;
    if let Some(tag) = template {
        doc.template_id = vitae::TemplateId::resolve(Some(tag));
    }
    Ok(doc)
}

fn cmd_templates() -> anyhow::Result<()> {
    for id in vitae::TemplateId::ALL {
        let marker = if id == vitae::TemplateId::default() {
            " (default)"
        } else {
            ""
        };
        println!("{:<10}{}{marker}", id.as_str(), id.display_name());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = read_resume(&args.in_path, args.template.as_deref())?;
    let layout = vitae::render(&doc);
    let json = serde_json::to_string_pretty(&layout).context("encode layout JSON")?;
    println!("{json}");
    Ok(())
}

async fn cmd_export(args: ExportArgs, mut config: vitae::Config) -> anyhow::Result<()> {
    if let Some(font) = args.font {
        config.export.font_path = Some(font);
    }
    if args.clip {
        config.export.pagination = vitae::Pagination::ClipFirstPage;
    }

    let doc = read_resume(&args.in_path, args.template.as_deref())?;
    let layout = vitae::render(&doc);
    let pipeline = vitae::ExportPipeline::new(config.export)?;
    let artifact = match pipeline.export(Some(&layout), &doc.title).await {
        Ok(artifact) => artifact,
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };
    let path = artifact.write_to_dir(&args.out_dir)?;

    eprintln!("wrote {} ({} pages)", path.display(), artifact.page_count);
    Ok(())
}

fn cmd_draft(cmd: DraftCommand, config: &vitae::Config) -> anyhow::Result<()> {
    let store = vitae::DraftStore::open(config.draft_dir.clone());
    match cmd {
        DraftCommand::Show => match store.load()? {
            Some(doc) => println!("{}", doc.to_json()?),
            None => eprintln!("no draft in '{}'", config.draft_dir.display()),
        },
        DraftCommand::Import { in_path } => {
            let doc = read_resume(&in_path, None)?;
            store.save(&doc)?;
            eprintln!("draft saved: {}", doc.title);
        }
        DraftCommand::Clear => {
            store.clear()?;
            eprintln!("draft cleared");
        }
    }
    Ok(())
}
