// src/cli/commands.rs
use crate::app::App;
use crate::cli::args::{
    AnalysisCommand, Command, CurriculumCommand, ProfileCommand, QuestionCommand, QuestionFields,
};
use crate::cli::output::{pretty, render, Summary};
use crate::domain::{ApiError, DomainError, QuestionForm};
use anyhow::{bail, Result};
use serde_json::{json, Value};
use tracing::{debug, instrument};

/// Run one command and return what should be printed.
#[instrument(level = "debug", skip(app, command), fields(command = command.name()))]
pub fn execute(app: &App, command: Command, json_output: bool) -> Result<String> {
    match command {
        Command::Login { code } => {
            let response = app.auth().login(&code).map_err(expired)?;
            let name = response
                .pointer("/user/nickname")
                .and_then(Value::as_str)
                .unwrap_or("user");
            Ok(format!("Logged in as {name}"))
        }
        Command::Logout => {
            app.auth().logout();
            Ok("Logged out".to_string())
        }
        Command::Whoami => {
            let state = app.session.snapshot();
            pretty(&json!({
                "authenticated": state.is_authenticated(),
                "user": state.user,
            }))
        }
        Command::Open { path } => {
            let nav = app.navigate(&path)?;
            Ok(match nav.redirected_from {
                Some(from) => format!(
                    "{} ({}) [redirected from {}]",
                    nav.location.view, nav.location.path, from
                ),
                None => format!("{} ({})", nav.location.view, nav.location.path),
            })
        }
        Command::Profile(cmd) => profile(app, cmd),
        Command::Questions(cmd) => questions(app, cmd),
        Command::Curriculum(cmd) => curriculum(app, cmd, json_output),
        Command::Analysis(cmd) => analysis(app, cmd),
    }
}

/// Open `path` the way the UI would before issuing its API calls.
fn enter(app: &App, path: &str) -> Result<()> {
    let nav = app.navigate(path)?;
    if nav.was_redirected() {
        bail!("Login required to open {path}: run `mistakebook login <CODE>` first");
    }
    debug!(view = %nav.location.view, "Entered view");
    Ok(())
}

fn expired(err: DomainError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow::Error::new(err).context("Session expired, log in again")
    } else {
        err.into()
    }
}

fn call(result: Result<Value, ApiError>) -> Result<Value> {
    result.map_err(|e| expired(e.into()))
}

fn profile(app: &App, cmd: ProfileCommand) -> Result<String> {
    enter(app, "/profile")?;
    let auth = app.auth();
    let user = match cmd {
        ProfileCommand::Show => auth.fetch_user_profile(),
        ProfileCommand::Update { data } => auth.update_user_profile(&data),
    }
    .map_err(expired)?;
    pretty(&user)
}

fn question_form(fields: QuestionFields) -> QuestionForm {
    QuestionForm {
        content: fields.content,
        answer: fields.answer,
        explanation: fields.explanation,
        knowledge_points: fields.knowledge_points,
        image: fields.image,
    }
}

fn questions(app: &App, cmd: QuestionCommand) -> Result<String> {
    let api = app.api.questions();
    let value = match cmd {
        QuestionCommand::List(q) => {
            enter(app, "/questions")?;
            call(api.list(&q.query))?
        }
        QuestionCommand::Show { id } => {
            enter(app, &format!("/questions/{id}"))?;
            call(api.get(id))?
        }
        QuestionCommand::Add(fields) => {
            enter(app, "/questions")?;
            call(api.create(&question_form(fields)))?
        }
        QuestionCommand::Edit { id, fields } => {
            enter(app, &format!("/questions/{id}"))?;
            call(api.update(id, &question_form(fields)))?
        }
        QuestionCommand::Delete { id } => {
            enter(app, &format!("/questions/{id}"))?;
            call(api.delete(id))?;
            return Ok(format!("Deleted question {id}"));
        }
    };
    pretty(&value)
}

fn curriculum(app: &App, cmd: CurriculumCommand, json_output: bool) -> Result<String> {
    enter(app, "/curriculum")?;
    let api = app.api.curriculum();
    let (value, summary) = match cmd {
        CurriculumCommand::Subjects => (call(api.subjects())?, Summary::Subjects),
        CurriculumCommand::Grades => (call(api.grades())?, Summary::Grades),
        CurriculumCommand::Curriculums(q) => (call(api.curriculums(&q.query))?, Summary::Raw),
        CurriculumCommand::Curriculum { id } => (call(api.curriculum(id))?, Summary::Raw),
        CurriculumCommand::Chapters(q) => (call(api.chapters(&q.query))?, Summary::Raw),
        CurriculumCommand::Chapter { id } => (call(api.chapter(id))?, Summary::Raw),
        CurriculumCommand::KnowledgePoints(q) => {
            (call(api.knowledge_points(&q.query))?, Summary::KnowledgePoints)
        }
        CurriculumCommand::KnowledgePoint { id } => (call(api.knowledge_point(id))?, Summary::Raw),
        CurriculumCommand::CurriculumPoints { curriculum_id } => (
            call(api.knowledge_points_by_curriculum(curriculum_id))?,
            Summary::KnowledgePoints,
        ),
        CurriculumCommand::Resources(q) => {
            (call(api.learning_resources(&q.query))?, Summary::Resources)
        }
        CurriculumCommand::Resource { id } => (call(api.learning_resource(id))?, Summary::Raw),
    };
    render(&value, summary, json_output)
}

fn analysis(app: &App, cmd: AnalysisCommand) -> Result<String> {
    let api = app.api.analysis();
    let value = match cmd {
        AnalysisCommand::Weakness => {
            enter(app, "/analysis")?;
            call(api.weakness())?
        }
        AnalysisCommand::Recommendations(q) => {
            enter(app, "/analysis")?;
            call(api.recommendations(&q.query))?
        }
        AnalysisCommand::GenerateTest(q) => {
            enter(app, "/analysis")?;
            call(api.generate_test(&q.query))?
        }
        AnalysisCommand::Reports(q) => {
            enter(app, "/analysis")?;
            call(api.reports(&q.query))?
        }
        AnalysisCommand::Report { id } => {
            enter(app, "/analysis")?;
            call(api.report(id))?
        }
        AnalysisCommand::Progress(q) => {
            enter(app, "/progress")?;
            call(api.progress_tracker(&q.query))?
        }
        AnalysisCommand::UpdateProgress { data } => {
            enter(app, "/progress")?;
            call(api.update_progress(&data))?
        }
        AnalysisCommand::Plans(q) => {
            enter(app, "/learning-plans")?;
            call(api.learning_plans(&q.query))?
        }
        AnalysisCommand::Plan { id } => {
            enter(app, "/learning-plans")?;
            call(api.learning_plan(id))?
        }
        AnalysisCommand::CreatePlan { data } => {
            enter(app, "/learning-plans")?;
            call(api.create_learning_plan(&data))?
        }
        AnalysisCommand::UpdatePlan { id, data } => {
            enter(app, "/learning-plans")?;
            call(api.update_learning_plan(id, &data))?
        }
        AnalysisCommand::PlanItems { plan_id } => {
            enter(app, "/learning-plans")?;
            call(api.learning_plan_items(plan_id))?
        }
        AnalysisCommand::UpdatePlanItem { item_id, data } => {
            enter(app, "/learning-plans")?;
            call(api.update_learning_plan_item(item_id, &data))?
        }
    };
    pretty(&value)
}
