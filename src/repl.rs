use anyhow::Result;
use bikeshare_analytics::{ReportGenerator, TripAnalytics};
use bikeshare_core::error::BikeshareError;
use bikeshare_core::pager::page_interactively;
use bikeshare_core::prompt::{ask_yes, prompt_filters, LineReader};
use bikeshare_core::{AppConfig, Dataset};
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};

const BANNER: &str = r#"
  Hello! Let's explore some US bikeshare data!
  Pick a city, then a month and a day (or "all" for no filter).
  Press Ctrl-D at any prompt to quit.
"#;

const RESTART_QUESTION: &str = "Would you like to restart? Please write Yes or No.\n";

/// Terminal input through rustyline, with in-memory history only.
pub struct RustylineReader {
    editor: DefaultEditor,
}

impl RustylineReader {
    pub fn new() -> Result<Self> {
        let rl_config = RlConfig::builder().auto_add_history(true).build();
        let editor = DefaultEditor::with_config(rl_config)?;
        Ok(Self { editor })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> bikeshare_core::error::Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(BikeshareError::InputClosed)
            }
            Err(ReadlineError::Io(e)) => Err(BikeshareError::Io(e)),
            Err(e) => Err(BikeshareError::Io(std::io::Error::other(e.to_string()))),
        }
    }
}

/// Run the interactive session loop on the terminal.
pub fn run(config: &AppConfig) -> Result<()> {
    println!("{}", BANNER);
    let mut reader = RustylineReader::new()?;
    let sessions = run_sessions(config, &mut reader)?;
    tracing::debug!("Finished after {} session(s)", sessions);
    println!("Goodbye!");
    Ok(())
}

/// Repeat filter → report → raw data → restart until the user stops or
/// input closes. Returns the number of sessions that produced a report.
pub fn run_sessions(config: &AppConfig, reader: &mut impl LineReader) -> Result<usize> {
    let mut sessions = 0;
    loop {
        match run_session(config, reader, &mut sessions) {
            Ok(true) => continue,
            Ok(false) | Err(BikeshareError::InputClosed) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(sessions)
}

/// One session. Returns whether the user asked to restart.
fn run_session(
    config: &AppConfig,
    reader: &mut impl LineReader,
    sessions: &mut usize,
) -> bikeshare_core::error::Result<bool> {
    let selection = prompt_filters(reader)?;
    tracing::info!("Loading trips: {}", selection);

    let dataset = Dataset::load(config, &selection)?;
    tracing::info!("{} trips match", dataset.len());

    let analytics = TripAnalytics::new(&dataset);
    let reports = ReportGenerator::new(config.display.show_timings);
    print!("{}", reports.full_report(&analytics));
    *sessions += 1;

    page_interactively(reader, &dataset, config.display.page_size)?;

    ask_yes(reader, RESTART_QUESTION)
}
