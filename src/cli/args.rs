// src/cli/args.rs
use crate::constants::API_URL_ENV;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API root, overrides the config file
    #[arg(long, value_name = "URL", env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Print raw JSON instead of summaries
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with a WeChat authorisation code
    Login {
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Navigate to an application path and print the view it lands on
    Open {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Read or change the user profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage mistaken questions
    #[command(subcommand)]
    Questions(QuestionCommand),

    /// Browse subjects, grades, curricula and knowledge points
    #[command(subcommand)]
    Curriculum(CurriculumCommand),

    /// Weakness analysis, learning plans and reports
    #[command(subcommand)]
    Analysis(AnalysisCommand),
}

impl Command {
    /// Subcommand name without its arguments; the login code must stay out of logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::Open { .. } => "open",
            Command::Profile(_) => "profile",
            Command::Questions(_) => "questions",
            Command::Curriculum(_) => "curriculum",
            Command::Analysis(_) => "analysis",
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    Show,
    /// Replace profile fields with a JSON object
    Update {
        #[arg(value_name = "JSON", value_parser = parse_json)]
        data: serde_json::Value,
    },
}

/// Repeatable `key=value` filter passed as a query parameter
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct QueryArgs {
    #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub query: Vec<(String, String)>,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct QuestionFields {
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub answer: Option<String>,
    #[arg(long)]
    pub explanation: Option<String>,
    /// Knowledge point id, repeatable
    #[arg(short = 'k', long = "knowledge-point", value_name = "ID")]
    pub knowledge_points: Vec<String>,
    /// Photo of the question
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QuestionCommand {
    List(QueryArgs),
    Show {
        id: i64,
    },
    Add(QuestionFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: QuestionFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CurriculumCommand {
    Subjects,
    Grades,
    Curriculums(QueryArgs),
    Curriculum { id: i64 },
    Chapters(QueryArgs),
    Chapter { id: i64 },
    KnowledgePoints(QueryArgs),
    KnowledgePoint { id: i64 },
    /// Knowledge points of one curriculum, in teaching order
    CurriculumPoints { curriculum_id: i64 },
    Resources(QueryArgs),
    Resource { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AnalysisCommand {
    Weakness,
    Recommendations(QueryArgs),
    GenerateTest(QueryArgs),
    Progress(QueryArgs),
    UpdateProgress {
        #[arg(value_name = "JSON", value_parser = parse_json)]
        data: serde_json::Value,
    },
    Plans(QueryArgs),
    Plan { id: i64 },
    CreatePlan {
        #[arg(value_name = "JSON", value_parser = parse_json)]
        data: serde_json::Value,
    },
    UpdatePlan {
        id: i64,
        #[arg(value_name = "JSON", value_parser = parse_json)]
        data: serde_json::Value,
    },
    PlanItems { plan_id: i64 },
    UpdatePlanItem {
        item_id: i64,
        #[arg(value_name = "JSON", value_parser = parse_json)]
        data: serde_json::Value,
    },
    Reports(QueryArgs),
    Report { id: i64 },
}

fn parse_json(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
