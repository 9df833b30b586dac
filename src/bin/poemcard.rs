use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "poemcard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the poem as a PNG, or a ZIP of PNGs when it spans several cards.
    Render(RenderArgs),
    /// Print the page split as JSON without rasterizing.
    Paginate(PoemArgs),
}

#[derive(Args, Debug)]
struct PoemArgs {
    /// Input poem JSON (`date`, `title`, `author`, `body`).
    #[arg(long = "in", conflicts_with_all = ["date", "title", "author", "body_file"])]
    in_path: Option<PathBuf>,

    /// Poem date, `YYYY-MM-DD`. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    #[arg(long, default_value = "")]
    title: String,

    #[arg(long, default_value = "")]
    author: String,

    /// File holding the poem body.
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// TTF/OTF font used for both measurement and rendering.
    #[arg(long, env = "POEMCARD_FONT")]
    font: PathBuf,

    /// Card style JSON; omitted fields keep their defaults.
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    poem: PoemArgs,

    /// Directory the PNG or ZIP is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rasterize cards in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(serde::Serialize)]
struct PageReport<'a> {
    index: usize,
    total: usize,
    content: &'a str,
    footer: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct PaginateReport<'a> {
    header_height: f32,
    available_height: f32,
    pages: Vec<PageReport<'a>>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Paginate(args) => cmd_paginate(args),
    }
}

struct Prepared {
    font: poemcard::LoadedFont,
    style: poemcard::CardStyle,
    result: poemcard::GenerationResult,
}

fn prepare(args: &PoemArgs) -> anyhow::Result<Prepared> {
    let input = read_input(args)?;
    let style = match &args.style {
        Some(path) => poemcard::CardStyle::from_path(path)?,
        None => poemcard::CardStyle::default(),
    };
    let font = poemcard::LoadedFont::from_path(&args.font)?;
    let mut engine = poemcard::TextLayoutEngine::new(&font)?;
    let result = poemcard::generate(input, &style, &mut engine)?;
    Ok(Prepared {
        font,
        style,
        result,
    })
}

fn read_input(args: &PoemArgs) -> anyhow::Result<poemcard::PoemInput> {
    if let Some(path) = &args.in_path {
        return Ok(poemcard::PoemInput::from_path(path)?);
    }
    let body_path = args
        .body_file
        .as_ref()
        .context("either --in or --body-file is required")?;
    let body = std::fs::read_to_string(body_path)
        .with_context(|| format!("read body file '{}'", body_path.display()))?;
    let date = args
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
    Ok(poemcard::PoemInput::new(
        date,
        args.title.clone(),
        args.author.clone(),
        body,
    ))
}

fn cmd_paginate(args: PoemArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args)?;
    let result = &prepared.result;
    let report = PaginateReport {
        header_height: result.header_height,
        available_height: result.available_height,
        pages: result
            .pages
            .iter()
            .zip(&result.cards)
            .map(|(p, c)| PageReport {
                index: p.index,
                total: p.total_pages,
                content: &p.content,
                footer: c.footer_label.as_deref(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize page report")?
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.poem)?;
    let threading = poemcard::ExportThreading {
        parallel: args.parallel,
        threads: args.threads,
    };

    let font = &prepared.font;
    let style = &prepared.style;
    let out = poemcard::export_generation(
        &prepared.result,
        || poemcard::CpuCardRenderer::new(font, style),
        &threading,
    )?;
    let path = out.save(&args.out_dir)?;

    eprintln!("wrote {}", path.display());
    Ok(())
}
