use std::path::PathBuf;

use clap::Parser;

use crate::query::filter::{FilterCriteria, LinkKind};
use crate::query::sort::SortMode;

#[derive(Parser, Debug)]
#[command(
    name = "awesome-index",
    about = "Parse a curated awesome-list into a searchable catalog and query it",
    version
)]
pub struct Cli {
    /// Catalog source: a file, a directory or an http(s) URL
    #[arg(default_value = ".")]
    pub source: String,

    /// Search query; whitespace-separated tokens must all match
    #[arg(short, long, value_name = "QUERY", default_value = "")]
    pub search: String,

    /// Only items of this category (exact title)
    #[arg(long, value_name = "TITLE")]
    pub category: Option<String>,

    /// Only items carrying this license
    #[arg(long, value_name = "LICENSE")]
    pub license: Option<String>,

    /// Only items written in this language
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Only items with a source-code or demo link
    #[arg(long, value_name = "KIND")]
    pub has: Option<HasArg>,

    /// Sort order [default: from config, else az]
    #[arg(long, value_name = "MODE")]
    pub sort: Option<SortArg>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Print the available categories, licenses and languages instead of results
    #[arg(long)]
    pub facets: bool,

    /// Config file [default: <source dir>/.awesome-index/config.toml, fallback ~/.config/awesome-index/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show tags and links of every item; enables debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            category: self.category.clone(),
            license: self.license.clone(),
            language: self.language.clone(),
            has: self.has.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum HasArg {
    Source,
    Demo,
}

impl From<&HasArg> for LinkKind {
    fn from(arg: &HasArg) -> Self {
        match arg {
            HasArg::Source => LinkKind::Source,
            HasArg::Demo => LinkKind::Demo,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SortArg {
    Az,
    Tags,
    #[value(alias = "roulette")]
    Discovery,
}

impl From<&SortArg> for SortMode {
    fn from(arg: &SortArg) -> Self {
        match arg {
            SortArg::Az => SortMode::Alphabetical,
            SortArg::Tags => SortMode::TagDensity,
            SortArg::Discovery => SortMode::Discovery,
        }
    }
}
