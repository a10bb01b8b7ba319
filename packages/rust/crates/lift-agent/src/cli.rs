use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "literal-lift")]
#[command(about = "Hoist string literals in Java sources into constants via an LLM endpoint.")]
pub(crate) struct Cli {
    /// Codebase root to scan.
    #[arg(long)]
    pub(crate) root: PathBuf,

    /// Chat completions endpoint (env: LITERAL_LIFT_ENDPOINT).
    #[arg(long)]
    pub(crate) endpoint: Option<String>,

    /// Model name (env: LITERAL_LIFT_MODEL; default: gpt-4).
    #[arg(long)]
    pub(crate) model: Option<String>,

    /// Bearer token for the endpoint (env: API_KEY).
    #[arg(long)]
    pub(crate) api_key: Option<String>,

    /// Directory names to skip (default: .git target build .idea).
    /// A bare `--exclude` with no names prunes nothing.
    #[arg(long = "exclude", num_args = 0..)]
    pub(crate) exclude: Option<Vec<String>>,

    /// File extensions to scan; repeat for several (default: java).
    #[arg(long = "extension", num_args = 1..)]
    pub(crate) extensions: Option<Vec<String>>,

    /// Write proposals to `<name>.new` and leave originals alone.
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Keep originals as `<name>.bak` before replacing them.
    #[arg(long)]
    pub(crate) backup: bool,

    /// Concurrent rewrites (env: LITERAL_LIFT_WORKERS; default: 4).
    #[arg(long)]
    pub(crate) workers: Option<usize>,

    /// Per-request timeout in seconds (env: LITERAL_LIFT_TIMEOUT_SECS; default: 300).
    #[arg(long)]
    pub(crate) timeout: Option<u64>,

    /// Retries on transient HTTP errors (env: LITERAL_LIFT_RETRIES; default: 3).
    #[arg(long)]
    pub(crate) retries: Option<u32>,

    /// Exponential backoff factor in seconds (default: 1.0).
    #[arg(long)]
    pub(crate) backoff: Option<f64>,

    /// Completion token budget per file (default: 4096).
    #[arg(long)]
    pub(crate) max_tokens: Option<u32>,

    /// Skip files larger than this many bytes (default: 1048576).
    #[arg(long)]
    pub(crate) max_file_bytes: Option<u64>,

    /// Settings file (default: ./literal-lift.yaml when present).
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}
