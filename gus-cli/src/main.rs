use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use gus::{
    engine::{Backtest, GuessEvent, Gus},
    sequence::parse_sequence,
    utils::{
        conf::GusConfig,
        error::{GusError, GusResult},
    },
};
use log::LevelFilter;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

mod logger;

use logger::GusLogger;

/// Sequence guessing program: give it a few terms and it looks for the
/// rule behind them.
#[derive(ClapParser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Configuration file (defaults to `$GUS_CONFIG_PATH`, then the user
    /// configuration directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Give up after this many candidate rules
    #[arg(short, long)]
    pub max_hypotheses: Option<u64>,

    /// Number of threads testing candidate rules
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Raise the log level to at least `debug`. Test mode always shows its interpreter trace
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,

    /// First sequence to work on, e.g. "1, 1, 2, 3, 5"
    #[arg(short, long)]
    pub sequence: Option<String>,
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    let level = if args.verbose {
        args.log_level.max(LevelFilter::Debug)
    } else {
        args.log_level
    };
    if let Err(error) = GusLogger::new(level).install() {
        eprintln!("Failed to install the logger: {error}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Arguments) -> GusResult<()> {
    let mut config = GusConfig::load_or_default(args.config.as_deref())?;
    if let Some(max_hypotheses) = args.max_hypotheses {
        config.max_hypotheses = Some(max_hypotheses);
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let mut gus = Gus::new(config)?;
    let mut console = Console::new();
    let mut preset = args.sequence;

    loop {
        let sequence = match preset.take() {
            Some(text) => match parse_sequence(&text) {
                Ok(sequence) => sequence,
                Err(error) => {
                    report_sequence_error(&text, &error)?;
                    return Err(error);
                }
            },
            None => match read_sequence(&mut console)? {
                Some(sequence) => sequence,
                None => return Ok(()),
            },
        };

        match console.choose("Do you want me to Guess or Test a GusL string?", &['G', 'T'])? {
            Some('G') => guess(&mut gus, &sequence, &mut console)?,
            Some(_) => test(&gus, &sequence, &mut console)?,
            None => return Ok(()),
        }
    }
}

/// Line-oriented prompts on stdin/stdout.
struct Console {
    input: io::StdinLock<'static>,
    output: StandardStream,
}

impl Console {
    fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: StandardStream::stdout(ColorChoice::Auto),
        }
    }

    /// Next input line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.output
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(self.output, "{text}")?;
        self.output.reset()?;
        write!(self.output, " ")?;
        self.output.flush()
    }

    /// Ask until the answer starts with one of `choices` (case-insensitive).
    fn choose(&mut self, question: &str, choices: &[char]) -> io::Result<Option<char>> {
        let listed = choices
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join("/");

        loop {
            self.prompt(&format!("{question} ({listed})."))?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };

            let answer = answer.trim().to_uppercase();
            if let Some(&choice) = choices.iter().find(|&&c| answer.starts_with(c)) {
                return Ok(Some(choice));
            }
            writeln!(self.output, "Please enter one of ({listed}).")?;
        }
    }

    fn highlight(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.output
            .set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true))?;
        write!(self.output, "{text}")?;
        self.output.reset()
    }
}

fn read_sequence(console: &mut Console) -> GusResult<Option<Vec<i32>>> {
    loop {
        console.prompt("Enter a sequence of integers (separated by whitespace or commas):")?;
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };

        let sequence = match parse_sequence(&line) {
            Ok(sequence) => sequence,
            Err(error) => {
                report_sequence_error(&line, &error)?;
                continue;
            }
        };

        writeln!(
            console.output,
            "{}",
            sequence
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )?;
        match console.choose("OK?", &['Y', 'N'])? {
            Some('Y') => return Ok(Some(sequence)),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}

fn guess(gus: &mut Gus, sequence: &[i32], console: &mut Console) -> GusResult<()> {
    let mut failure = None;

    let found = gus.guess_sequence(sequence, |event| match offer(console, event) {
        Ok(Some(true)) => event.accepted = true,
        Ok(Some(false)) => {}
        Ok(None) => event.abandoned = true,
        Err(error) => {
            failure = Some(error);
            event.abandoned = true;
        }
    })?;

    if let Some(error) = failure {
        return Err(error.into());
    }

    match found {
        Some(program) => writeln!(console.output, "Great, I will remember `{program}`.")?,
        None => writeln!(console.output, "I give up.")?,
    }
    Ok(())
}

/// Show a guess and ask whether it is right. `None` at end of input.
fn offer(console: &mut Console, event: &GuessEvent) -> io::Result<Option<bool>> {
    writeln!(console.output, "Elapsed: {:.3?}.", event.elapsed)?;
    write!(console.output, "I predict ")?;
    console.highlight(&event.prediction.to_string(), Color::Green)?;
    writeln!(console.output, " ({}).", event.hypothesis)?;
    if let Ok(description) = gusl::describe(&event.hypothesis) {
        writeln!(console.output, "That is, {description}")?;
    }

    let answer = console.choose("Am I correct?", &['Y', 'N'])?;
    if answer == Some('N') {
        writeln!(console.output, "Ok, let me try again.")?;
    }
    Ok(answer.map(|answer| answer == 'Y'))
}

fn test(gus: &Gus, sequence: &[i32], console: &mut Console) -> GusResult<()> {
    console.prompt("GusL:")?;
    let Some(program) = console.read_line()? else {
        return Ok(());
    };
    let program = program.trim();

    let backtest = {
        let _trace = logger::raise_level(LevelFilter::Debug);
        gus.test_hypothesis(sequence, program, true)
    };
    match backtest {
        Backtest::Accepted { prediction } => {
            write!(console.output, "`{program}` predicts ")?;
            console.highlight(&prediction.to_string(), Color::Green)?;
            writeln!(console.output, ".")?;
            if let Ok(description) = gusl::describe(program) {
                writeln!(console.output, "That is, {description}")?;
            }
        }
        Backtest::Rejected(failure) => {
            write!(console.output, "`{program}` ")?;
            console.highlight("does not fit", Color::Red)?;
            writeln!(console.output, ": {failure}.")?;
        }
    }
    Ok(())
}

/// Render parse diagnostics against the offending input.
fn report_sequence_error(text: &str, error: &GusError) -> io::Result<()> {
    let GusError::InvalidSequence { errors } = error else {
        eprintln!("{error}");
        return Ok(());
    };

    let mut colors = ColorGenerator::new();
    let color = colors.next();
    let name = "<sequence>".to_string();

    for diagnostic in errors {
        let span = (name.clone(), diagnostic.span.clone());
        Report::build(ReportKind::Error, span.clone())
            .with_message(&diagnostic.message)
            .with_label(
                Label::new(span)
                    .with_message("Only integers are allowed here")
                    .with_color(color),
            )
            .finish()
            .eprint((name.clone(), Source::from(text.to_string())))?;
    }
    Ok(())
}
