//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{FailingOptimizerBuilder, sample_request, write_request, write_utf8};
use super::*;
use crate::solve::{DefaultOptimizerBuilder, OptimizerBuilder, OutputKind, run_solve_with};
use camino::Utf8PathBuf;
use routewise_core::{InputError, OptimizeRequest, Vehicle};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct SolveWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    failing_optimizer: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _tmp: tmp,
            request_path: root.join("request.json"),
            include_request: RefCell::new(true),
            failing_optimizer: RefCell::new(false),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, subcommand: &str) -> Vec<String> {
        let mut argv = vec!["routewise".to_owned(), subcommand.to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend([format!("--{ARG_TIME_LIMIT}"), "1".to_owned()]);
        argv
    }

    fn run(&self, subcommand: &str) {
        let invocation = self.build_command_line(subcommand);
        let builder: &dyn OptimizerBuilder = if *self.failing_optimizer.borrow() {
            &FailingOptimizerBuilder
        } else {
            &DefaultOptimizerBuilder
        };
        let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| {
            let mut buffer = self.stdout.borrow_mut();
            match cli.command {
                Command::Solve(args) => run_solve_with(args, OutputKind::Route, builder, &mut *buffer),
                Command::Preview(args) => {
                    run_solve_with(args, OutputKind::Preview, builder, &mut *buffer)
                }
            }
        });
        self.result.replace(Some(outcome));
    }

    fn stdout_json(&self) -> Value {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON response")
    }

    fn expect_success(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
    }

    fn take_error(&self) -> CliError {
        match self.result.take().expect("result recorded") {
            Ok(()) => panic!("expected the command to fail"),
            Err(err) => err,
        }
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

#[given("a valid optimize request exists on disk")]
fn valid_request_exists(#[from(world)] world: &SolveWorld) {
    write_request(&world.request_path, &sample_request());
}

#[given("the optimize request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &SolveWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("the optimize request has no stops")]
fn request_has_no_stops(#[from(world)] world: &SolveWorld) {
    write_request(
        &world.request_path,
        &OptimizeRequest::new(Vec::new(), Vehicle::new(500.0)),
    );
}

#[given("I omit the optimize request path")]
fn omit_request_path(#[from(world)] world: &SolveWorld) {
    world.include_request.replace(false);
}

#[given("the optimizer cannot find a route")]
fn optimizer_cannot_find_route(#[from(world)] world: &SolveWorld) {
    world.failing_optimizer.replace(true);
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    world.run("solve");
}

#[when("I run the preview command")]
fn run_preview_command(#[from(world)] world: &SolveWorld) {
    world.run("preview");
}

#[then("the command succeeds and prints a route for 3 stops")]
fn command_prints_route(#[from(world)] world: &SolveWorld) {
    world.expect_success();
    let response = world.stdout_json();
    assert_eq!(response["success"], Value::Bool(true));
    let visited = response["route"]["visited"]
        .as_array()
        .expect("visited stops array");
    assert_eq!(visited.len(), 3);
    assert!(response["route"]["quality_score"].is_number());
}

#[then("the command succeeds and prints a preview with start and end points")]
fn command_prints_preview(#[from(world)] world: &SolveWorld) {
    world.expect_success();
    let response = world.stdout_json();
    assert_eq!(response["success"], Value::Bool(true));
    let preview = &response["route"];
    assert!(preview["start"].is_object());
    assert!(preview["end"].is_object());
    assert!(preview.get("visited").is_none());
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SolveWorld) {
    match world.take_error() {
        CliError::ParseRequest { .. } => {}
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the request has no stops")]
fn command_fails_no_stops(#[from(world)] world: &SolveWorld) {
    match world.take_error() {
        CliError::InvalidRequest { source, .. } => assert_eq!(source, InputError::NoStops),
        other => panic!("expected InvalidRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SolveWorld) {
    match world.take_error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails and prints an unsuccessful response")]
fn command_prints_failure(#[from(world)] world: &SolveWorld) {
    match world.take_error() {
        CliError::Optimize { .. } => {}
        other => panic!("expected Optimize, found {other:?}"),
    }
    let response = world.stdout_json();
    assert_eq!(response["success"], Value::Bool(false));
    let error = response["error"].as_str().expect("error message");
    assert!(error.starts_with("No solution found"), "{error}");
}

macro_rules! register_solve_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/solve_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SolveWorld) {
            let _ = world;
        }
    };
}

register_solve_scenario!(solve_happy_path, "solving a request from JSON");
register_solve_scenario!(preview_happy_path, "previewing a request from JSON");
register_solve_scenario!(solve_invalid_json, "rejecting invalid JSON input");
register_solve_scenario!(solve_without_stops, "rejecting requests without stops");
register_solve_scenario!(solve_missing_request, "rejecting missing request paths");
register_solve_scenario!(solve_optimizer_failure, "reporting optimizer failures");
