//! `solve` and `preview` command implementation.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use routewise_core::{
    DEFAULT_AVERAGE_SPEED_KMH, DistanceMetric, OptimizeError, OptimizeRequest, OptimizeResponse,
    RouteOptimizer,
};
use routewise_solver::{CvrpOptimizer, OptimizerConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{is_regular_file, open_utf8_file};
use crate::{
    ARG_AVERAGE_SPEED, ARG_DEPOT, ARG_MAX_ROUTE_MINUTES, ARG_METRIC, ARG_PRETTY, ARG_REQUEST,
    ARG_TIME_LIMIT, CliError, ENV_REQUEST,
};

/// CLI arguments shared by the `solve` and `preview` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Optimize a single-vehicle collection route. The request is \
                 a JSON-encoded OptimizeRequest; flags override its depot, \
                 route length and search budget.",
    about = "Optimize a collection route"
)]
#[ortho_config(prefix = "ROUTEWISE")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing an `OptimizeRequest`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Average travel speed in km/h used to derive travel times.
    #[arg(long = ARG_AVERAGE_SPEED, value_name = "kmh")]
    #[serde(default)]
    pub(crate) average_speed: Option<f64>,
    /// Search budget in seconds, replacing the request's own.
    #[arg(long = ARG_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit: Option<u64>,
    /// Earth model for distances: `haversine` or `geodesic`.
    #[arg(long = ARG_METRIC, value_name = "name")]
    #[serde(default)]
    pub(crate) metric: Option<String>,
    /// Identifier of the stop to start from, replacing the request's own.
    #[arg(long = ARG_DEPOT, value_name = "id")]
    #[serde(default)]
    pub(crate) depot: Option<u64>,
    /// Maximum elapsed route time in minutes, replacing the request's own.
    #[arg(long = ARG_MAX_ROUTE_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) max_route_minutes: Option<u64>,
    /// Pretty-print the JSON response.
    #[arg(long = ARG_PRETTY)]
    #[serde(default)]
    pub(crate) pretty: bool,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) average_speed_kmh: f64,
    pub(crate) time_limit: Option<u64>,
    pub(crate) metric: DistanceMetric,
    pub(crate) depot: Option<u64>,
    pub(crate) max_route_minutes: Option<u64>,
    pub(crate) pretty: bool,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match is_regular_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }

    /// Apply command-line overrides to a loaded request.
    pub(crate) fn apply(&self, mut request: OptimizeRequest) -> OptimizeRequest {
        if let Some(depot) = self.depot {
            request.depot_id = Some(depot);
        }
        if let Some(minutes) = self.max_route_minutes {
            request.max_route_minutes = minutes;
        }
        if let Some(seconds) = self.time_limit {
            request.solve_seconds = seconds;
        }
        request
    }

    pub(crate) fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            average_speed_kmh: self.average_speed_kmh,
            distance_metric: self.metric,
            ..OptimizerConfig::default()
        }
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;
        let metric = args
            .metric
            .as_deref()
            .map(str::parse::<DistanceMetric>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            request_path,
            average_speed_kmh: args.average_speed.unwrap_or(DEFAULT_AVERAGE_SPEED_KMH),
            time_limit: args.time_limit,
            metric,
            depot: args.depot,
            max_route_minutes: args.max_route_minutes,
            pretty: args.pretty,
        })
    }
}

/// Which report a command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputKind {
    /// Full route with per-stop detail.
    Route,
    /// Path, segments and totals only.
    Preview,
}

/// Builds the optimizer for one invocation.
pub(crate) trait OptimizerBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn RouteOptimizer>;
}

pub(crate) struct DefaultOptimizerBuilder;

impl OptimizerBuilder for DefaultOptimizerBuilder {
    fn build(&self, config: &SolveConfig) -> Box<dyn RouteOptimizer> {
        Box::new(CvrpOptimizer::with_config(config.optimizer_config()))
    }
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    kind: OutputKind,
    builder: &dyn OptimizerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_solve_config(args)?;
    let request = config.apply(load_optimize_request(&config.request_path)?);
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let optimizer = builder.build(&config);
    match kind {
        OutputKind::Route => emit(writer, optimizer.optimize(&request), config.pretty),
        OutputKind::Preview => emit(writer, optimizer.preview(&request), config.pretty),
    }
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`OptimizeRequest`] from disk.
pub(crate) fn load_optimize_request(path: &Utf8Path) -> Result<OptimizeRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the response envelope, then surface any optimizer failure.
fn emit<T: Serialize>(
    writer: &mut dyn Write,
    outcome: Result<T, OptimizeError>,
    pretty: bool,
) -> Result<(), CliError> {
    let failure = outcome.as_ref().err().cloned();
    write_response(writer, &OptimizeResponse::from(outcome), pretty)?;
    failure.map_or(Ok(()), |source| Err(CliError::Optimize { source }))
}

fn write_response<T: Serialize>(
    writer: &mut dyn Write,
    response: &OptimizeResponse<T>,
    pretty: bool,
) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
    .map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
