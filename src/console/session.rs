use std::{collections::HashMap, fs, io, path::Path};

use crate::{
    ast::Expression,
    console::{constants, help},
    error::Error,
    interpreter::{
        evaluator::core::{Context, EvalResult, Features},
        parser::core::parse_input,
        value::core::Value,
    },
    units::UnitCast,
};

/// What the console should print after a line, and whether to stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Text blocks to print, in order.
    pub lines: Vec<String>,
    /// Set by `!exit`.
    pub exit:  bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self { lines: vec![text.into()],
               exit:  false, }
    }
}

/// A calculator session: the context plus the line and command handling
/// around it.
///
/// ## Example
/// ```
/// use physcalc::{console::session::Session, interpreter::evaluator::core::Features};
///
/// let mut session = Session::new(Features::default());
/// let reply = session.run_line("3 m + 2 m").unwrap();
/// assert_eq!(reply.lines, vec!["[1] 5 m (distance)".to_string()]);
///
/// let reply = session.run_line("[1] * 2").unwrap();
/// assert_eq!(reply.lines, vec!["[2] 10 m (distance)".to_string()]);
/// ```
#[derive(Debug)]
pub struct Session {
    context: Context,
}

impl Session {
    /// Starts a session with the mathematical constants loaded.
    #[must_use]
    pub fn new(features: Features) -> Self {
        let mut context = Context::new();
        context.features = features;
        context.variables = bind(constants::math());
        Self { context }
    }

    /// The session context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// The REPL prompt, indented to line up with the `[n]` of results.
    #[must_use]
    pub fn prompt(&self) -> String {
        let width = self.context.outputs.len().to_string().len();
        format!("{} > ", " ".repeat(width))
    }

    /// Runs one line of input.
    ///
    /// Blank lines and lines starting with `#` are ignored, lines starting
    /// with `!` are commands. Anything else is evaluated; the result is
    /// stored as the next output and bound to any assignment targets.
    ///
    /// # Errors
    /// A parse or evaluation error. The session is left unchanged.
    pub fn run_line(&mut self, line: &str) -> Result<Reply, Error> {
        let mut reply = Reply::default();
        self.run_into(line, &mut reply)?;
        Ok(reply)
    }

    /// Runs one line of input like [`Session::run_line`], printing an error
    /// into the reply after anything the line already printed.
    ///
    /// ## Example
    /// ```
    /// use physcalc::{console::session::Session, interpreter::evaluator::core::Features};
    ///
    /// let mut session = Session::new(Features { debug: true,
    ///                                           ..Features::default() });
    /// let reply = session.run("2 m + 1 s");
    /// assert_eq!(reply.lines,
    ///            vec!["(1) 2 m + 1 s".to_string(),
    ///                 "Error: unit mismatch: cannot add m and s".to_string()]);
    /// ```
    pub fn run(&mut self, line: &str) -> Reply {
        let mut reply = Reply::default();
        if let Err(e) = self.run_into(line, &mut reply) {
            reply.lines.push(e.to_string());
        }
        reply
    }

    fn run_into(&mut self, line: &str, reply: &mut Reply) -> Result<(), Error> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        if line.starts_with('!') {
            *reply = self.run_command(line)?;
            return Ok(());
        }

        let parsed = parse_input(line, &self.context)?;
        let index = self.context.outputs.len() + 1;
        if self.context.features.debug {
            reply.lines
                 .push(format!("({index}) {}", parsed.expression.render(self.context.features.frac)));
        }

        let result = parsed.expression.evaluate(&self.context)?;
        let shown = self.display(&result, parsed.cast.as_ref())?;
        reply.lines.push(match result.as_value().and_then(Value::quantity) {
                             Some(quantity) => format!("[{index}] {shown} ({quantity})"),
                             None => format!("[{index}] {shown}"),
                         });

        for name in parsed.assignments {
            self.context.variables.insert(name, result.clone());
        }
        self.context.outputs.push(result);
        Ok(())
    }

    /// Runs each line of `source`, stopping at the first error or `!exit`.
    ///
    /// Errors are reported in the reply as `Syntax error on line n: ...` or
    /// `Error on line n: ...`.
    pub fn run_source(&mut self, source: &str) -> Reply {
        let mut reply = Reply::default();
        for (number, line) in source.lines().enumerate() {
            let number = number + 1;
            let mut line_reply = Reply::default();
            let outcome = self.run_into(line, &mut line_reply);
            reply.lines.extend(line_reply.lines);
            match outcome {
                Ok(()) if line_reply.exit => {
                    reply.exit = true;
                    break;
                },
                Ok(()) => {},
                Err(Error::Parse(e)) => {
                    reply.lines.push(format!("Syntax error on line {number}: {e}"));
                    break;
                },
                Err(Error::Eval(e)) => {
                    reply.lines.push(format!("Error on line {number}: {e}"));
                    break;
                },
            }
        }
        reply
    }

    /// Runs a script file, see [`Session::run_source`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn run_script(&mut self, path: &Path) -> io::Result<Reply> {
        let source = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "running script");
        Ok(self.run_source(&source))
    }

    fn display(&self, result: &Expression, cast: Option<&UnitCast>) -> EvalResult<String> {
        match result.as_value() {
            Some(value) => value.stringify(&self.context, cast),
            None => Ok(result.render(self.context.features.frac)),
        }
    }

    fn run_command(&mut self, line: &str) -> Result<Reply, Error> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        tracing::debug!(command, ?args, "running command");

        match command {
            "!help" => Ok(Reply::text(help::help(args.first().copied()))),
            "!load" => self.load(&args),
            "!vars" => self.vars(),
            "!reset" => {
                self.context.variables = bind(constants::math());
                self.context.outputs.clear();
                Ok(Reply::text("Variables and history cleared."))
            },
            "!clear" => {
                self.context.outputs.clear();
                Ok(Reply::text("History cleared."))
            },
            "!toggle" => Ok(self.toggle(&args)),
            "!source" if args.is_empty() => Ok(Reply::text(help::SOURCE)),
            "!source" => Ok(self.source(&args.join(" "))),
            "!exit" => Ok(Reply { lines: Vec::new(),
                                  exit:  true, }),
            other => Ok(Reply::text(format!("Unknown command {other}. Type !help for help."))),
        }
    }

    fn load(&mut self, args: &[&str]) -> Result<Reply, Error> {
        let set = match args {
            [name] => constants::load(name),
            _ => None,
        };
        let Some(set) = set else {
            return Ok(Reply::text(help::load()));
        };
        self.context.variables.extend(bind(set?));
        Ok(Reply::default())
    }

    fn vars(&self) -> Result<Reply, Error> {
        let mut names: Vec<&String> = self.context.variables.keys().collect();
        names.sort();
        let lines = names.into_iter()
                         .map(|name| -> Result<String, Error> {
                             let result = self.context.variables[name].evaluate(&self.context)?;
                             Ok(format!("{name} = {}", self.display(&result, None)?))
                         })
                         .collect::<Result<Vec<_>, Error>>()?;
        Ok(Reply { lines,
                   exit: false })
    }

    fn toggle(&mut self, args: &[&str]) -> Reply {
        let features = &mut self.context.features;
        let (name, flag) = match args.first() {
            Some(&"debug") => ("debug", &mut features.debug),
            Some(&"frac") => ("frac", &mut features.frac),
            Some(&"cont") => ("cont", &mut features.cont),
            _ => return Reply::text(help::help(Some("toggle"))),
        };
        *flag = !*flag;
        Reply::text(format!("Toggled {name} {}.", if *flag { "on" } else { "off" }))
    }

    fn source(&mut self, path: &str) -> Reply {
        match self.run_script(Path::new(path)) {
            Ok(reply) => reply,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Reply::text("File does not exist."),
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to read script");
                Reply::text("Failed to read file.")
            },
        }
    }
}

fn bind(constants: Vec<(String, Value)>) -> HashMap<String, Expression> {
    constants.into_iter()
             .map(|(name, value)| (name, Expression::Value(value)))
             .collect()
}
