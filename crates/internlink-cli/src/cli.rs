//! CLI argument definitions for InternLink.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "internlink",
    version,
    about = "InternLink - discover hospital internship postings",
    long_about = "Discover hospital medical-internship postings across Nigeria.\n\n\
                  Postings are cached on this device, so listings work offline;\n\
                  a network refresh runs before listing unless --offline is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (also: INTERNLINK_API_URL).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Directory for the on-device cache (default: the platform cache dir).
    #[arg(long = "cache-dir", value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,
}

#[derive(Subcommand)]
pub enum Command {
    /// List hospital postings, with optional filters.
    List(ListArgs),

    /// Show one posting in full, including how to apply.
    Show(ShowArgs),

    /// Mark a posting as applied.
    Apply(IdArgs),

    /// Remove the applied mark from a posting.
    Unapply(IdArgs),

    /// List the postings you have applied to.
    Applied,

    /// List professions seen across cached postings.
    Professions,

    /// List the supported states.
    States,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Free-text search over name, state, and professions.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep only postings offering this profession.
    #[arg(long = "profession", value_name = "NAME")]
    pub profession: Option<String>,

    /// Keep only postings in this state.
    #[arg(long = "state", value_name = "STATE")]
    pub state: Option<String>,

    /// Keep only postings whose salary range contains this text.
    #[arg(long = "salary", value_name = "TEXT")]
    pub salary: Option<String>,

    /// Skip the network refresh and list from the local cache only.
    #[arg(long = "offline")]
    pub offline: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Posting id.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the network refresh and read from the local cache only.
    #[arg(long = "offline")]
    pub offline: bool,
}

#[derive(Parser)]
pub struct IdArgs {
    /// Posting id.
    #[arg(value_name = "ID")]
    pub id: String,
}
