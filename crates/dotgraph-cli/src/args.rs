//! Command-line argument definitions for the dotgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments control input/output paths, the
//! rendering backend, configuration file selection, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the dotgraph rendering tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input DOT file
    #[arg(help = "Path to the input .dot file")]
    pub input: String,

    /// Directory where the image is produced; falls back to the
    /// configuration file, then the current directory
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Graphviz output format (png, svg, ...); falls back to the
    /// configuration file. The remote renderer always produces png,
    /// so this flag cannot be combined with --remote
    #[arg(short, long)]
    pub format: Option<String>,

    /// Render through the remote chart service at this endpoint instead
    /// of the local dot binary
    #[arg(long)]
    pub remote: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["dotgraph", "diagram.dot"]);

        assert_eq!(args.input, "diagram.dot");
        // Absent flags defer to the configuration file.
        assert!(args.out_dir.is_none());
        assert!(args.format.is_none());
        assert!(args.remote.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_remote_and_format_flags() {
        let args = Args::parse_from([
            "dotgraph",
            "diagram.dot",
            "--format",
            "svg",
            "--remote",
            "https://charts.example.test/render",
        ]);

        assert_eq!(args.format.as_deref(), Some("svg"));
        assert_eq!(
            args.remote.as_deref(),
            Some("https://charts.example.test/render")
        );
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["dotgraph"]).is_err());
    }
}
