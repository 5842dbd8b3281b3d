use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::render::selection::{SHOW_ALL, effective_min_n};

pub const DEFAULT_CONTEXT_MIN_N: u32 = 20;
pub const DEFAULT_ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// Same rule as the page input: zero or unreadable values mean the default.
fn parse_context_min_n(raw: &str) -> Result<u32, String> {
    Ok(effective_min_n(raw))
}

#[derive(Parser, Debug)]
#[command(
    name = "suncare-dashboard",
    version,
    about = "Static dashboard renderer for sunscreen review unmet-needs analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Render(RenderArgs),
    Inspect(InspectArgs),
    Bundle(BundleArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(long, default_value = "report/site/data/dashboard_data.js")]
    pub data: PathBuf,

    #[arg(long, default_value = "report/site")]
    pub out_dir: PathBuf,

    #[arg(long, default_value_t = DEFAULT_CONTEXT_MIN_N, value_parser = parse_context_min_n)]
    pub context_min_n: u32,

    #[arg(long, default_value = DEFAULT_ECHARTS_SRC)]
    pub echarts_src: String,

    /// Evidence id selected when the page opens.
    #[arg(long, default_value = SHOW_ALL)]
    pub evidence_filter: String,

    /// Also write a Markdown summary next to the page.
    #[arg(long, default_value_t = false)]
    pub markdown: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long, default_value = "report/site/data/dashboard_data.js")]
    pub data: PathBuf,

    #[arg(long, default_value_t = DEFAULT_CONTEXT_MIN_N, value_parser = parse_context_min_n)]
    pub context_min_n: u32,
}

#[derive(Args, Debug, Clone)]
pub struct BundleArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "report/site/data/dashboard_data.js")]
    pub output: PathBuf,
}
