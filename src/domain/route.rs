// src/domain/route.rs
use serde::Serialize;
use std::fmt;

/// Screen a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Login,
    Profile,
    QuestionList,
    QuestionDetail,
    Analysis,
    Curriculum,
    LearningPlan,
    ProgressTracker,
}

impl View {
    pub fn component_name(&self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::Login => "LoginView",
            View::Profile => "ProfileView",
            View::QuestionList => "QuestionListView",
            View::QuestionDetail => "QuestionDetailView",
            View::Analysis => "AnalysisView",
            View::Curriculum => "CurriculumView",
            View::LearningPlan => "LearningPlanView",
            View::ProgressTracker => "ProgressTrackerView",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_name())
    }
}

/// Static route definition. Child paths are relative to their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
    pub children: Vec<Route>,
}

impl Route {
    pub fn public(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name,
            view,
            requires_auth: false,
            children: vec![],
        }
    }

    pub fn protected(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(path, name, view)
        }
    }

    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

pub fn default_routes() -> Vec<Route> {
    vec![
        Route::public("/", "home", View::Home),
        Route::public("/login", "login", View::Login),
        Route::protected("/profile", "profile", View::Profile),
        Route::protected("/questions", "questions", View::QuestionList),
        Route::protected("/questions/:id", "question-detail", View::QuestionDetail),
        Route::protected("/analysis", "analysis", View::Analysis),
        Route::protected("/curriculum", "curriculum", View::Curriculum),
        Route::protected("/learning-plans", "learning-plans", View::LearningPlan),
        Route::protected("/progress", "progress", View::ProgressTracker),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_table_when_counting_then_has_nine_routes() {
        let routes = default_routes();

        assert_eq!(routes.len(), 9);
    }

    #[test]
    fn given_default_table_when_checking_auth_then_only_home_and_login_are_public() {
        let public: Vec<_> = default_routes()
            .into_iter()
            .filter(|r| !r.requires_auth)
            .map(|r| r.name)
            .collect();

        assert_eq!(public, vec!["home", "login"]);
    }

    #[test]
    fn given_view_when_displaying_then_prints_component_name() {
        assert_eq!(View::QuestionDetail.to_string(), "QuestionDetailView");
    }
}
