use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::io::Read;
use std::path::PathBuf;
use std::process;
use termynal_md_config::Config;
use termynal_md_engine::{Pipeline, TermynalPreprocessor};

#[derive(Parser)]
#[command(
    name = "termynal-md",
    version,
    about = "Rewrite annotated fenced code blocks into animated terminal markup"
)]
struct Cli {
    /// Markdown files to preprocess; reads stdin when none are given
    file: Vec<PathBuf>,

    /// Write the result to a file instead of stdout (single input only)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Rewrite each input file in place
    #[arg(short, long)]
    in_place: bool,

    /// Render the preprocessed document to HTML
    #[arg(long)]
    render: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terminal title override
    #[arg(long)]
    title: Option<String>,

    /// Prompt marker override; repeatable
    #[arg(long = "prompt")]
    prompt: Vec<String>,

    /// Write a default config file to the default location and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let config = Config::default();
        config.save().context("failed to write default config")?;
        println!("Wrote {}", Config::config_path().display());
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref());
    if let Some(title) = cli.title {
        config.title = title;
    }
    if !cli.prompt.is_empty() {
        config.prompt_literal_start = cli.prompt.clone();
    }

    let mut pipeline = Pipeline::new();
    pipeline.register(Box::new(TermynalPreprocessor::new(config.options())));

    if cli.file.is_empty() {
        if cli.in_place {
            eprintln!("Error: --in-place requires at least one input file");
            process::exit(1);
        }
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        let result = transform(&pipeline, &input, cli.render);
        write_result(&result, cli.output.as_deref())?;
        return Ok(());
    }

    if cli.output.is_some() && cli.file.len() > 1 {
        eprintln!("Error: --output accepts a single input file");
        process::exit(1);
    }

    for path in &cli.file {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let result = transform(&pipeline, &input, cli.render);
        if cli.in_place {
            std::fs::write(path, &result)
                .with_context(|| format!("failed to write {}", path.display()))?;
        } else {
            write_result(&result, cli.output.as_deref())?;
        }
    }

    Ok(())
}

/// Loads the effective configuration: an explicit --config path must exist,
/// the default location may be absent.
fn load_config(explicit: Option<&std::path::Path>) -> Config {
    match explicit {
        Some(path) => match Config::load_from_path(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                eprintln!("Error: config file '{}' not found", path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => match Config::load() {
            Ok(Some(config)) => {
                debug!("loaded config from {}", Config::config_path().display());
                config
            }
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
    }
}

fn transform(pipeline: &Pipeline, input: &str, render: bool) -> String {
    // The host pipeline normalizes line endings before preprocessors run;
    // here the CLI is that host.
    let input = input.replace("\r\n", "\n");
    let preprocessed = pipeline.run(&input);
    debug!(
        "preprocessed {} lines into {} lines",
        input.split('\n').count(),
        preprocessed.split('\n').count()
    );
    if render {
        render_html(&preprocessed)
    } else {
        preprocessed
    }
}

/// Renders the preprocessed markdown to HTML; the emitted widget fragments
/// pass through pulldown-cmark as raw HTML blocks.
fn render_html(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new(markdown);
    let mut html = String::with_capacity(markdown.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn write_result(result: &str, output: Option<&std::path::Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, result)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{result}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termynal_md_engine::TermynalOptions;

    fn pipeline() -> Pipeline {
        let mut pipeline = Pipeline::new();
        pipeline.register(Box::new(TermynalPreprocessor::new(TermynalOptions {
            title: Some("bash".to_string()),
            ..TermynalOptions::default()
        })));
        pipeline
    }

    #[test]
    fn crlf_input_is_normalized() {
        let input = "<!-- termynal -->\r\n```\r\n$ ls\r\n```\r\n";
        let out = transform(&pipeline(), input, false);
        assert!(out.contains("data-ty=\"input\""));
    }

    #[test]
    fn rendered_html_keeps_the_widget_fragment() {
        let input = "# Title\n\n<!-- termynal -->\n```\n$ ls\n```\n";
        let html = transform(&pipeline(), input, true);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<div class=\"termy\" data-termynal data-ty-title=\"bash\">"));
    }

    #[test]
    fn passthrough_without_render_touches_nothing_else() {
        let input = "plain paragraph\n";
        assert_eq!(transform(&pipeline(), input, false), "plain paragraph\n");
    }

    #[test]
    fn write_result_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out_path = temp_dir.path().join("out.md");

        write_result("converted document\n", Some(out_path.as_path())).unwrap();

        assert_eq!(
            std::fs::read_to_string(&out_path).unwrap(),
            "converted document\n"
        );
    }

    #[test]
    fn write_result_to_missing_directory_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let out_path = temp_dir.path().join("no-such-dir").join("out.md");

        let err = write_result("x", Some(out_path.as_path())).unwrap_err();

        assert!(err.to_string().contains("failed to write"));
    }

    #[test]
    fn in_place_rewrite_round_trips_through_the_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.md");
        std::fs::write(&path, "intro\n<!-- termynal -->\n```\n$ ls\n```\n").unwrap();

        // The same read-transform-write sequence the --in-place loop runs.
        let input = std::fs::read_to_string(&path).unwrap();
        let result = transform(&pipeline(), &input, false);
        std::fs::write(&path, &result).unwrap();

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.starts_with("intro\n"));
        assert!(rewritten.contains("data-ty=\"input\""));
        assert!(!rewritten.contains("<!-- termynal -->"));
    }
}
