use crate::corpus::WalkOptions;
use clap::Parser;
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "findfiles")]
#[command(about = "Index a directory and answer boolean queries over its files", long_about = None)]
pub struct Cli {
    /// Directory to index
    pub root: String,

    /// Query expression: words joined by AND, OR, ANDNOT and parentheses
    #[arg(required = true, num_args = 1..)]
    pub expression: Vec<String>,

    /// Print at most this many results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the parsed query tree before the results
    #[arg(long)]
    pub explain: bool,

    /// Skip hidden files and directories
    #[arg(long = "no-hidden")]
    pub no_hidden: bool,

    /// Honour .gitignore and .ignore files
    #[arg(long)]
    pub respect_ignore: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_links: bool,

    /// Maximum directory depth to descend
    #[arg(long)]
    pub max_depth: Option<usize>,
}

impl Cli {
    /// The search root with a leading `~` expanded.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.root).as_ref())
    }

    /// The expression words joined into query text.
    pub fn query_text(&self) -> String {
        self.expression.join(" ")
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            hidden: !self.no_hidden,
            respect_ignore: self.respect_ignore,
            follow_links: self.follow_links,
            max_depth: self.max_depth,
        }
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
