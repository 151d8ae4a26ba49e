//! COPSOQ CLI - Command-line interface for the COPSOQ scoring engine
//!
//! Commands:
//! - score: Score answer sets into reports or persistable rows (batch mode)
//! - questions: Print the questionnaire catalog
//! - scales: Print the scale definition table
//! - header: Print the record header row
//! - doctor: Diagnose engine health and configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use copsoq_score::pipeline::{parse_answers, CopsoqProcessor};
use copsoq_score::questionnaire::{section_questions, Section};
use copsoq_score::types::{AnswerOption, Locale, ScoreReport};
use copsoq_score::{ScaleTable, ENGINE_VERSION, PRODUCER_NAME, QUESTION_COUNT};

/// COPSOQ - Scoring engine for the COPSOQ III psychosocial questionnaire
#[derive(Parser)]
#[command(name = "copsoq")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score COPSOQ III answers into scale results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score answer sets (one JSON array of 84 labels per submission)
    Score {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Language of tier labels
        #[arg(long, default_value = "pt")]
        locale: LocaleArg,
    },

    /// Print the questionnaire catalog
    Questions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the scale definition table
    Scales {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the record header row as a JSON array
    Header,

    /// Diagnose engine health and configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one answer array per line)
    Ndjson,
    /// JSON array of answer arrays
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one report per line)
    Ndjson,
    /// JSON array of reports
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Header row then one record row per submission, each a JSON array
    Rows,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    Pt,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Pt => Locale::Pt,
            LocaleArg::En => Locale::En,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CopsoqCliError> {
    match cli.command {
        Commands::Score {
            input,
            output,
            input_format,
            output_format,
            locale,
        } => cmd_score(&input, &output, input_format, output_format, locale.into()),

        Commands::Questions { json } => cmd_questions(json),

        Commands::Scales { json } => cmd_scales(json),

        Commands::Header => {
            let header = CopsoqProcessor::new().record_header();
            println!("{}", serde_json::to_string(&header)?);
            Ok(())
        }

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn read_input(input: &Path) -> Result<String, CopsoqCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_submissions(
    data: &str,
    format: &InputFormat,
) -> Result<Vec<Vec<String>>, CopsoqCliError> {
    match format {
        InputFormat::Ndjson => data
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                parse_answers(line.trim()).map_err(|e| {
                    CopsoqCliError::ParseError(format!("line {}: {}", index + 1, e))
                })
            })
            .collect(),
        InputFormat::Json => {
            let raw: Vec<Vec<Option<String>>> = serde_json::from_str(data)?;
            Ok(raw
                .into_iter()
                .map(|answers| answers.into_iter().map(Option::unwrap_or_default).collect())
                .collect())
        }
    }
}

fn cmd_score(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    locale: Locale,
) -> Result<(), CopsoqCliError> {
    let input_data = read_input(input)?;
    let submissions = parse_submissions(&input_data, &input_format)?;

    if submissions.is_empty() {
        return Err(CopsoqCliError::NoSubmissions);
    }

    let processor = CopsoqProcessor::new().with_locale(locale);
    log::info!("scoring {} submissions", submissions.len());

    let output_data = format_output(&processor, &submissions, &output_format)?;

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_questions(json: bool) -> Result<(), CopsoqCliError> {
    if json {
        let sections: Vec<serde_json::Value> = Section::ALL
            .iter()
            .map(|section| {
                serde_json::json!({
                    "section": section,
                    "title": section.title(),
                    "questions": section_questions(*section).collect::<Vec<_>>(),
                })
            })
            .collect();
        let options: Vec<&str> = AnswerOption::FREQUENCY.iter().map(|o| o.label()).collect();
        let catalog = serde_json::json!({ "options": options, "sections": sections });
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let options: Vec<&str> = AnswerOption::FREQUENCY.iter().map(|o| o.label()).collect();
    println!("Options: {}\n", options.join(" / "));

    for section in Section::ALL {
        println!("{}", section.title());
        println!("{}", "=".repeat(section.title().chars().count()));
        for question in section_questions(section) {
            println!("  {:>2}. {}", question.number, question.text);
        }
        println!();
    }
    Ok(())
}

fn cmd_scales(json: bool) -> Result<(), CopsoqCliError> {
    let table = ScaleTable::canonical();

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    println!("Scale Definition Table ({} scales)", table.len());
    println!("=================================");
    for (position, scale) in table.iter().enumerate() {
        let questions: Vec<String> = scale
            .question_numbers()
            .iter()
            .map(|q| q.to_string())
            .collect();
        println!(
            "  {:>2}. [{:<8}] {} (Q{})",
            position + 1,
            scale.polarity.as_str(),
            scale.name,
            questions.join(", Q")
        );
    }
    Ok(())
}

fn cmd_doctor(json: bool) -> Result<(), CopsoqCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Engine version {}", ENGINE_VERSION),
    });

    let table = ScaleTable::canonical();
    match ScaleTable::new(table.scales().to_vec()) {
        Ok(validated) => {
            let covered: usize = validated.iter().map(|s| s.questions.len()).sum();
            let status = if covered == QUESTION_COUNT {
                CheckStatus::Ok
            } else {
                CheckStatus::Warning
            };
            checks.push(DoctorCheck {
                name: "scale_table".to_string(),
                status,
                message: format!(
                    "{} scales covering {} of {} questions",
                    validated.len(),
                    covered,
                    QUESTION_COUNT
                ),
            });
        }
        Err(e) => checks.push(DoctorCheck {
            name: "scale_table".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        }),
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (batch mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("COPSOQ Doctor Report");
        println!("====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CopsoqCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn format_output(
    processor: &CopsoqProcessor,
    submissions: &[Vec<String>],
    format: &OutputFormat,
) -> Result<String, CopsoqCliError> {
    let reports = || -> Vec<ScoreReport> { submissions.iter().map(|a| processor.score(a)).collect() };

    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&reports())?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(&reports())?),
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for report in reports() {
                lines.push(serde_json::to_string(&report)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Rows => {
            let mut lines = vec![serde_json::to_string(&processor.record_header())?];
            for answers in submissions {
                lines.push(serde_json::to_string(&processor.record(answers).to_row())?);
            }
            Ok(lines.join("\n") + "\n")
        }
    }
}

// Error types

#[derive(Debug)]
enum CopsoqCliError {
    Io(io::Error),
    Json(serde_json::Error),
    NoSubmissions,
    DoctorFailed,
    ParseError(String),
}

impl From<io::Error> for CopsoqCliError {
    fn from(e: io::Error) -> Self {
        CopsoqCliError::Io(e)
    }
}

impl From<serde_json::Error> for CopsoqCliError {
    fn from(e: serde_json::Error) -> Self {
        CopsoqCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CopsoqCliError> for CliError {
    fn from(e: CopsoqCliError) -> Self {
        match e {
            CopsoqCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CopsoqCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CopsoqCliError::NoSubmissions => CliError {
                code: "NO_SUBMISSIONS".to_string(),
                message: "No submissions found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CopsoqCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
            CopsoqCliError::ParseError(msg) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: msg,
                hint: Some("Each submission must be a JSON array of answer labels".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submissions() -> Vec<Vec<String>> {
        vec![
            vec!["Sempre".to_string(), "Nunca".to_string(), "Às vezes".to_string()],
            vec![],
        ]
    }

    #[test]
    fn test_rows_output_starts_with_header() {
        let processor = CopsoqProcessor::new();
        let output = format_output(&processor, &submissions(), &OutputFormat::Rows).unwrap();
        let lines: Vec<Vec<String>> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], processor.record_header());
        assert_eq!(lines[1].len(), lines[0].len());
        assert_eq!(lines[1][85], "50");
    }

    #[test]
    fn test_ndjson_output_has_one_report_per_submission() {
        let processor = CopsoqProcessor::new();
        let output = format_output(&processor, &submissions(), &OutputFormat::Ndjson).unwrap();
        let reports: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["results"][0]["score"], 50.0);
        assert_eq!(reports[1]["answered"], 0);
    }

    #[test]
    fn test_bad_ndjson_line_reports_its_number() {
        let data = "[\"Sempre\"]\n\nnot json\n";
        match parse_submissions(data, &InputFormat::Ndjson) {
            Err(CopsoqCliError::ParseError(msg)) => assert!(msg.starts_with("line 3:")),
            other => panic!("expected parse error, got {:?}", other.map(|s| s.len())),
        }
    }
}
