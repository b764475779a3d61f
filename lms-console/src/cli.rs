//! Command-line parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lms_client::api::QuizResultsScope;
use lms_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use lms_client::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "lms-console")]
#[command(about = "Manage LMS courses, modules and lessons from the terminal")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Admin API base URL
    #[arg(long, env = "LMS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "LMS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Session kept between runs
    #[arg(long, env = "LMS_SESSION_FILE", default_value = ".lms/session.json", global = true)]
    pub session_file: PathBuf,

    /// Log filter when `RUST_LOG` is unset
    #[arg(long, env = "LMS_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Emit JSON log lines
    #[arg(long, env = "LMS_LOG_JSON", global = true)]
    pub log_json: bool,

    /// Also log to a daily rotating file in this directory
    #[arg(long, env = "LMS_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_timeout(self.timeout)
            .with_session_file(&self.session_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Log in and keep the session
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List categories
    Categories,
    /// List your courses
    Courses,
    /// List a course's modules in order
    Modules { course_id: String },
    /// List a module's lessons in order
    Lessons { course_id: String, module_id: String },
    /// Move a module to a zero-based position
    ReorderModule {
        course_id: String,
        module_id: String,
        position: usize,
    },
    /// Move a lesson to a zero-based position
    ReorderLesson {
        course_id: String,
        module_id: String,
        lesson_id: String,
        position: usize,
    },
    /// Attach a material file to a lesson
    UploadMaterial {
        course_id: String,
        module_id: String,
        lesson_id: String,
        file: PathBuf,
        /// Content type sent with the file
        #[arg(long)]
        mime: Option<String>,
    },
    /// Dashboard overview
    Stats,
    /// Quiz results for a module or a course
    Results { kind: ResultsKind, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultsKind {
    Module,
    Course,
}

impl ResultsKind {
    pub fn scope(self, id: String) -> QuizResultsScope {
        match self {
            Self::Module => QuizResultsScope::Module(id),
            Self::Course => QuizResultsScope::Course(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("lms-console").chain(line.split_whitespace()))
    }

    fn kind_of(line: &str) -> ErrorKind {
        parse(line).unwrap_err().kind()
    }

    #[test]
    fn parses_reorder_commands() {
        assert_eq!(
            parse("reorder-module c1 m2 0").unwrap().command,
            Command::ReorderModule {
                course_id: "c1".into(),
                module_id: "m2".into(),
                position: 0,
            }
        );
        assert_eq!(
            parse("reorder-lesson c1 m1 l3 2").unwrap().command,
            Command::ReorderLesson {
                course_id: "c1".into(),
                module_id: "m1".into(),
                lesson_id: "l3".into(),
                position: 2,
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(kind_of("modules"), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind_of("reorder-module c1 m2 first"), ErrorKind::ValueValidation);
        assert_eq!(kind_of("results lesson l1"), ErrorKind::InvalidValue);
        assert_eq!(kind_of("drop"), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn help_flag_is_never_an_id() {
        assert_eq!(kind_of("modules --help"), ErrorKind::DisplayHelp);
        assert_eq!(kind_of("help"), ErrorKind::DisplayHelp);
        assert_eq!(
            kind_of(""),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn results_and_uploads() {
        let cli = parse("results course c9").unwrap();
        let Command::Results { kind, id } = cli.command else {
            panic!("expected results");
        };
        assert_eq!(kind.scope(id), QuizResultsScope::Course("c9".into()));

        assert_eq!(
            parse("upload-material c1 m1 l1 notes.pdf --mime application/pdf")
                .unwrap()
                .command,
            Command::UploadMaterial {
                course_id: "c1".into(),
                module_id: "m1".into(),
                lesson_id: "l1".into(),
                file: PathBuf::from("notes.pdf"),
                mime: Some("application/pdf".into()),
            }
        );
    }

    #[test]
    fn global_flags_build_the_client_config() {
        let cli = parse("--api-url http://api.local --timeout 5 courses --session-file s.json")
            .unwrap();
        assert_eq!(cli.command, Command::Courses);
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://api.local");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.session_file, Some(PathBuf::from("s.json")));
    }
}
