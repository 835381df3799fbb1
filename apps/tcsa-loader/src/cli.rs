//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tcsa-loader",
    version,
    about = "TwinCAT static analysis loader",
    long_about = "tcsa-loader builds a TwinCAT solution, collects the TE1200 static analysis findings and writes them as a JSON or GitLab code quality report.\n\nConfiguration precedence: CLI > tcsa.toml > defaults.",
    after_help = "Examples:\n  tcsa-loader analyze -v Machine.sln -t Plc/Machine.tsproj\n  tcsa-loader analyze -v Machine.sln -t Plc/Machine.tsproj -r gl-code-quality.json -f gitlab\n  tcsa-loader analyze --driver error-list --error-list errors.json -v Machine.sln -t Plc/Machine.tsproj",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, global = true, action = clap::ArgAction::SetTrue, help = "Debug logging (overridden by RUST_LOG)")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tcsa-loader version.")]
    Version,
    /// Build the solution and report static analysis findings
    #[command(
        about = "Build and report",
        long_about = "Clean and build the solution, classify the error list and optionally write a report. Exit codes: 0 success, 2 unstable (medium findings), 1 error (high findings or failure).",
        after_help = "Examples:\n  tcsa-loader analyze -v Machine.sln -t Plc/Machine.tsproj -r report.json\n  tcsa-loader analyze -v Machine.sln -t Plc/Machine.tsproj --output json"
    )]
    Analyze {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(short = 'v', long = "solution", visible_alias = "VisualStudioSolutionFilePath", help = "Path to the solution (.sln file)")]
        solution: Option<String>,
        #[arg(short = 't', long = "project", visible_alias = "TwincatProjectFilePath", help = "Path to the TwinCAT project file (.tsproj file)")]
        project: Option<String>,
        #[arg(short = 'r', long = "report-path", visible_alias = "ReportPath", help = "Path where the error report is written")]
        report_path: Option<String>,
        #[arg(short = 'f', long = "report-format", visible_alias = "ReportFormat", help = "Report format: Default|Gitlab (default: Default)")]
        report_format: Option<String>,
        #[arg(long, help = "Console output: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Build driver: devenv|error-list (default: devenv)")]
        driver: Option<String>,
        #[arg(long, help = "devenv executable (default: devenv.com)")]
        devenv: Option<String>,
        #[arg(long, help = "Solution configuration for devenv, e.g. \"Release|TwinCAT RT (x64)\"")]
        configuration: Option<String>,
        #[arg(long, help = "Exported error list (JSON) for the error-list driver")]
        error_list: Option<String>,
    },
    /// Print the code quality fingerprint of one issue
    #[command(
        about = "Compute a fingerprint",
        long_about = "Print the GitLab code quality fingerprint for an issue, e.g. to maintain a suppression list.",
        after_help = "Examples:\n  tcsa-loader fingerprint \"SA0033: Unused variable 'x'\" POUs/MAIN.TcPOU 12 major"
    )]
    Fingerprint {
        #[arg(help = "Issue description (\"CODE: message\")")]
        description: String,
        #[arg(help = "File path as written in the report")]
        path: String,
        #[arg(help = "Begin line")]
        line: u32,
        #[arg(help = "Severity: info|minor|major|critical|blocker")]
        severity: String,
    },
}
