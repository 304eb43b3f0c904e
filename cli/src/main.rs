//! docx2md - convert a DOCX document to Markdown

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::debug;
use tempfile::NamedTempFile;

use docx_markdown::{ConvertOptions, Converter, EmphasisPolicy, ItalicMarker, Nesting, StyleMap};

#[derive(Parser)]
#[command(name = "docx2md")]
#[command(author = "laofahai")]
#[command(version)]
#[command(about = "Convert a DOCX document to Markdown", long_about = None)]
struct Cli {
    /// Input .docx file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output Markdown file (defaults to INPUT with a .md extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// How paragraph style names are matched
    ///
    /// The default `taxonomy` only accepts the exact names "heading 1" to
    /// "heading 3" and names starting with "list", so a style such as
    /// "Heading 1 Numbered" stays body text. Older converters matched these
    /// words anywhere in the name; `substring` restores that behaviour.
    #[arg(long, value_enum, default_value = "taxonomy")]
    style_matching: StyleMatching,

    /// Italic delimiter
    #[arg(long, value_enum, default_value = "asterisk")]
    italic: Italic,

    /// Delimiter order for bold italic runs
    #[arg(long, value_enum, default_value = "bold-inner")]
    nesting: NestingOrder,

    /// Number of characters shown in the preview
    #[arg(long, value_name = "CHARS", default_value = "500")]
    preview: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleMatching {
    /// Exact "heading 1".."heading 3"; names starting with "list"
    Taxonomy,
    /// "heading N" or "list" anywhere in the style name
    Substring,
}

impl From<StyleMatching> for StyleMap {
    fn from(matching: StyleMatching) -> Self {
        match matching {
            StyleMatching::Taxonomy => StyleMap::default(),
            StyleMatching::Substring => StyleMap::substring(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Italic {
    /// *text*
    Asterisk,
    /// _text_
    Underscore,
}

impl From<Italic> for ItalicMarker {
    fn from(italic: Italic) -> Self {
        match italic {
            Italic::Asterisk => ItalicMarker::Asterisk,
            Italic::Underscore => ItalicMarker::Underscore,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NestingOrder {
    /// ***text*** with bold inside italic
    BoldInner,
    /// Italic inside bold
    ItalicInner,
}

impl From<NestingOrder> for Nesting {
    fn from(order: NestingOrder) -> Self {
        match order {
            NestingOrder::BoldInner => Nesting::BoldInner,
            NestingOrder::ItalicInner => Nesting::ItalicInner,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    Input(String),

    #[error(transparent)]
    Conversion(#[from] docx_markdown::Error),

    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Input(_) | CliError::Conversion(_) | CliError::Write { .. } => 1,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = parse_args().and_then(|cli| run(&cli)) {
        println!("{}: {}", "Error".red().bold(), e);
        process::exit(e.exit_code());
    }
}

fn parse_args() -> Result<Cli, CliError> {
    Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
        _ => CliError::Usage(usage_message(&e.render().to_string())),
    })
}

/// First line of a clap error without its `error: ` prefix
fn usage_message(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

fn run(cli: &Cli) -> Result<(), CliError> {
    validate_input(&cli.input)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("md"));

    println!(
        "Converting: {} → {}",
        cli.input.display(),
        output.display()
    );

    let options = ConvertOptions::new()
        .with_style_map(cli.style_matching.into())
        .with_emphasis(EmphasisPolicy::new(cli.italic.into(), cli.nesting.into()));
    let markdown = Converter::new(options).convert_path(&cli.input)?;

    write_output(&output, &markdown)?;

    println!(
        "{} Output saved to: {}",
        "✓ Success!".green().bold(),
        output.display()
    );
    println!("\nPreview:\n  {}...", preview(&markdown, cli.preview));

    Ok(())
}

/// Write through a temporary file in the destination directory, then rename
/// it into place, so a failed write never leaves a truncated file behind
fn write_output(path: &Path, markdown: &str) -> Result<(), CliError> {
    let write_err = |source| CliError::Write {
        path: path.display().to_string(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    debug!("writing {} bytes to {}", markdown.len(), path.display());
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(markdown.as_bytes()).map_err(write_err)?;
    // temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Existence first, then the extension, before anything is parsed
fn validate_input(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::Input(format!(
            "File '{}' not found.",
            input.display()
        )));
    }

    let is_docx = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("docx"))
        .unwrap_or(false);
    if !is_docx {
        return Err(CliError::Input(
            "Input file must be a .docx file.".to_string(),
        ));
    }

    Ok(())
}

/// First `chars` characters with continuation lines indented by two spaces
fn preview(markdown: &str, chars: usize) -> String {
    markdown
        .chars()
        .take(chars)
        .collect::<String>()
        .replace('\n', "\n  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_and_indents() {
        assert_eq!(preview("# A\n\nb", 500), "# A\n  \n  b");
        assert_eq!(preview("héllo wörld", 5), "héllo");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(
            usage_message("error: the following required arguments were not provided:\n  <INPUT>\n"),
            "the following required arguments were not provided:"
        );
        assert_eq!(usage_message("plain"), "plain");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), 2);
        assert_eq!(CliError::Input("x".into()).exit_code(), 1);
        assert_eq!(
            CliError::Conversion(docx_markdown::Error::MissingPart("/word/document.xml".into()))
                .exit_code(),
            1
        );
    }

    #[test]
    fn test_write_output_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        std::fs::write(&path, "old contents that are longer").unwrap();

        write_output(&path, "# New").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# New");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();

        let err = write_output(&target, "# New").unwrap_err();
        assert!(matches!(err, CliError::Write { .. }));
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("taken")]);
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_help_explains_default_matching() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Heading 1 Numbered"));
        assert!(help.contains("substring"));
    }

    #[test]
    fn test_validate_input_rejects_missing_file() {
        let err = validate_input(Path::new("no/such/file.docx")).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["docx2md", "in.docx"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.docx"));
        assert!(cli.output.is_none());
        assert!(cli.style_matching == StyleMatching::Taxonomy);
        assert!(cli.italic == Italic::Asterisk);
        assert!(cli.nesting == NestingOrder::BoldInner);
        assert_eq!(cli.preview, 500);
    }

    #[test]
    fn test_cli_policy_flags() {
        let cli = Cli::try_parse_from([
            "docx2md",
            "in.docx",
            "out.md",
            "--style-matching",
            "substring",
            "--italic",
            "underscore",
            "--nesting",
            "italic-inner",
            "--preview",
            "20",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.md")));
        assert_eq!(StyleMap::from(cli.style_matching), StyleMap::substring());
        assert_eq!(ItalicMarker::from(cli.italic), ItalicMarker::Underscore);
        assert_eq!(Nesting::from(cli.nesting), Nesting::ItalicInner);
        assert_eq!(cli.preview, 20);
    }
}
