use anyhow::{Context, Result, bail};
use std::{
    env,
    io::Read,
    path::{Path, PathBuf},
    process,
};
use tiermark_config::Config;
use tiermark_syntax::{ParseMode, Parser};

const USAGE: &str =
    "Usage: tiermark [--strict|--lenient] [--tree] [--no-body] [--margin N] [--config PATH] [FILE]";

/// Command line options. Anything left unset falls back to the config file.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    mode: Option<ParseMode>,
    tree: bool,
    no_body: bool,
    margin: Option<u32>,
    config: Option<PathBuf>,
    /// `None` or `-` reads stdin.
    input: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--strict" => parsed.mode = Some(ParseMode::Strict),
            "--lenient" => parsed.mode = Some(ParseMode::Lenient),
            "--tree" => parsed.tree = true,
            "--no-body" => parsed.no_body = true,
            "--margin" => {
                let value = args.next().context("--margin needs a value")?;
                let margin = value
                    .parse::<u32>()
                    .with_context(|| format!("invalid margin {value:?}"))?;
                parsed.margin = Some(margin);
            }
            "--config" => {
                let value = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option {flag}"),
            _ if parsed.input.is_some() => bail!("only one input file may be given"),
            path => parsed.input = Some(PathBuf::from(path)),
        }
    }

    Ok(parsed)
}

fn load_config(args: &Args) -> Result<Config> {
    let loaded = match &args.config {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                bail!("config file {} not found", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

/// Parse `source` and produce what the command prints.
fn render_source(source: &str, args: &Args, config: &Config) -> Result<String> {
    let mut parser_config = config.parser_config();
    if let Some(mode) = args.mode {
        parser_config.mode = mode;
    }
    let mut options = config.html_options();
    if let Some(margin) = args.margin {
        options.margin = margin;
    }
    if args.no_body {
        options.wrap_body = false;
    }

    log::debug!("parsing {} bytes in {:?} mode", source.len(), parser_config.mode);
    let tree = Parser::new(parser_config)
        .parse(source)
        .context("failed to parse input")?;

    if args.tree {
        Ok(format!("{tree:#?}"))
    } else {
        Ok(tiermark_html::render(&tree, &options))
    }
}

fn run(args: &Args) -> Result<String> {
    let config = load_config(args)?;
    let source = read_input(args.input.as_deref())?;
    render_source(&source, args, &config)
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    if args.help {
        println!("{USAGE}");
        println!("Config file: {}", Config::config_path().display());
        return;
    }

    match run(&args) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            log::error!("tiermark failed: {e:#}");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_reads_stdin_with_config_defaults() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn all_flags() {
        let parsed = args(&[
            "--lenient",
            "--tree",
            "--no-body",
            "--margin",
            "4",
            "--config",
            "~/tm.toml",
            "notes.tm",
        ])
        .unwrap();
        assert_eq!(
            parsed,
            Args {
                mode: Some(ParseMode::Lenient),
                tree: true,
                no_body: true,
                margin: Some(4),
                config: Some(PathBuf::from("~/tm.toml")),
                input: Some(PathBuf::from("notes.tm")),
                help: false,
            }
        );
    }

    #[test]
    fn last_mode_flag_wins() {
        assert_eq!(
            args(&["--lenient", "--strict"]).unwrap().mode,
            Some(ParseMode::Strict)
        );
    }

    #[test]
    fn dash_is_stdin() {
        assert_eq!(args(&["-"]).unwrap().input, Some(PathBuf::from("-")));
    }

    #[rstest]
    #[case(&["--margin"])]
    #[case(&["--margin", "wide"])]
    #[case(&["--config"])]
    #[case(&["--verbose"])]
    #[case(&["a.tm", "b.tm"])]
    fn bad_arguments(#[case] list: &[&str]) {
        assert!(args(list).is_err());
    }

    #[test]
    fn flags_override_config() {
        let parsed = args(&["--margin", "2", "--no-body"]).unwrap();
        let html = render_source("text\n", &parsed, &Config::default()).unwrap();
        assert_eq!(html, "<p style=\"margin:2px 0\">text</p>");
    }

    #[test]
    fn config_mode_applies_without_flag() {
        let mut config = Config::default();
        config.parser.mode = tiermark_config::Mode::Lenient;
        let source = "-- a\n---- b\n";

        assert!(render_source(source, &Args::default(), &config).is_ok());

        let strict = Args {
            mode: Some(ParseMode::Strict),
            ..Args::default()
        };
        let err = render_source(source, &strict, &config).unwrap_err();
        assert!(format!("{err:#}").contains("list level"));
    }

    #[test]
    fn tree_dump_shows_kinds() {
        let parsed = args(&["--tree"]).unwrap();
        let dump = render_source("## hi\n", &parsed, &Config::default()).unwrap();
        assert!(dump.starts_with("ROOT@0..6"));
        assert!(dump.contains("HEADING_1@0..5"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let parsed = Args {
            config: Some(PathBuf::from("/nonexistent/tiermark/config.toml")),
            ..Args::default()
        };
        assert!(load_config(&parsed).is_err());
    }
}
