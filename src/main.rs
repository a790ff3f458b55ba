use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use physcalc::{
    console::{banner, session::Session},
    interpreter::evaluator::core::Features,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::EnvFilter;

const HISTORY_FILE: &str = ".physcalc_history";
const HISTORY_LENGTH: usize = 1000;

/// ρhysCalc is a calculator for physical quantities. It keeps track of units,
/// names the results and converts between units on request.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A script to run before the prompt opens.
    script: Option<PathBuf>,

    /// Show exact results as fractions.
    #[arg(long)]
    frac: bool,

    /// Do not continue the previous result when a line starts with an
    /// operator.
    #[arg(long)]
    no_cont: bool,

    /// Do not print the banner.
    #[arg(short, long)]
    quiet: bool,
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HISTORY_FILE))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn repl(session: &mut Session) -> rustyline::Result<()> {
    let config = rustyline::Config::builder().max_history_size(HISTORY_LENGTH)?
                                             .auto_add_history(true)
                                             .build();
    let mut editor = DefaultEditor::with_config(config)?;
    let history = history_path();
    if let Some(path) = &history
       && let Err(e) = editor.load_history(path)
    {
        tracing::debug!(error = %e, "no history loaded");
    }

    loop {
        match editor.readline(&session.prompt()) {
            Ok(line) => {
                let reply = session.run(&line);
                print_lines(&reply.lines);
                if reply.exit {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("Type !exit or press Ctrl-D to quit.");
            },
            Err(ReadlineError::Eof) => {
                println!();
                break;
            },
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &history
       && let Err(e) = editor.save_history(path)
    {
        tracing::warn!(error = %e, "failed to save history");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_env("PHYSCALC_LOG")
                                                  .unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();
    let features = Features { cont: !args.no_cont,
                              frac: args.frac,
                              ..Features::default() };
    let mut session = Session::new(features);

    if !args.quiet {
        println!("{}", banner());
        println!("Type !help for help");
    }

    if let Some(script) = &args.script {
        match session.run_script(script) {
            Ok(reply) => {
                print_lines(&reply.lines);
                if reply.exit {
                    return ExitCode::SUCCESS;
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "cannot read script");
                println!("File does not exist.");
                return ExitCode::FAILURE;
            },
        }
    }

    match repl(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
