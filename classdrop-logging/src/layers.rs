// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{
    appender::{self, Rotation},
    error::{Error, Result},
    LogFormat, LogOutputDest,
};
use std::collections::BTreeMap;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        self as tracing_fmt,
        format::Writer,
        time::{FormatTime, SystemTime},
        FmtContext, FormatEvent, FormatFields,
    },
    layer::Filter,
    registry::LookupSpan,
    reload::{self, Handle},
    Layer, Registry,
};

pub(crate) const LOG_ENV_VAR: &str = "CLASSDROP_LOG";

const MAX_LOG_SIZE: usize = 20 * 1024 * 1024;
const MAX_UNCOMPRESSED_LOG_FILES: usize = 10;
const MAX_LOG_FILES: usize = 1000;
// Trace everything, including the RPC transport
const ALL_CLASSDROP_LOGS: &str = "all";
// Trace our crates, debug the RPC transport
const VERBOSE_CLASSDROP_LOGS: &str = "v";

const CLASSDROP_TARGETS: [&str; 4] = [
    "classdrop",
    "classdrop_batch",
    "classdrop_evm",
    "classdrop_logging",
];
const TRANSPORT_TARGETS: [&str; 2] = ["alloy_rpc_client", "alloy_transport_http"];

type BoxedFilter = Box<dyn Filter<Registry> + Send + Sync>;

/// Handle that implements functions to change the log level on the fly.
pub struct ReloadHandle(pub(crate) Handle<BoxedFilter, Registry>);

impl ReloadHandle {
    /// Modify the log level to the provided CSV value
    /// Example input: `alloy_transport_http=DEBUG,all,classdrop_evm=ERROR`
    ///
    /// Keywords take less precedence than targets given explicitly in the CSV.
    pub fn modify_log_level(&self, logging_value: &str) -> Result<()> {
        let targets = get_logging_targets(logging_value)?;
        self.0.modify(|old_filter| {
            *old_filter = Box::new(Targets::new().with_targets(targets));
        })?;

        Ok(())
    }
}

/// One line per event: `[time LEVEL module/span] message fields`
#[derive(Default)]
pub(crate) struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let module = event.metadata().module_path().unwrap_or("<unknown module>");

        write!(writer, "[")?;
        SystemTime.format_time(&mut writer)?;
        write!(writer, " {level} {module}")?;
        ctx.visit_spans(|span| write!(writer, "/{}", span.name()))?;
        write!(writer, "] ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// The different Subscribers composed into a list of layers
#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<Box<dyn Layer<Registry> + Send + Sync>>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

impl TracingLayers {
    pub(crate) fn fmt_layer(
        &mut self,
        default_logging_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
        max_uncompressed_log_files: Option<usize>,
        max_compressed_log_files: Option<usize>,
    ) -> Result<ReloadHandle> {
        let layer = match output_dest {
            LogOutputDest::Stdout => match format {
                LogFormat::Json => tracing_fmt::layer().json().flatten_event(true).boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .boxed(),
            },
            LogOutputDest::Stderr => match format {
                LogFormat::Json => tracing_fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr)
                    .boxed(),
                LogFormat::Default => tracing_fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .event_format(LogFormatter)
                    .with_writer(std::io::stderr)
                    .boxed(),
            },
            LogOutputDest::Path(path) => {
                std::fs::create_dir_all(path)?;
                eprintln!("Logging to directory: {path:?}");

                let rotation = Rotation::new(
                    MAX_LOG_SIZE,
                    max_uncompressed_log_files.unwrap_or(MAX_UNCOMPRESSED_LOG_FILES),
                    max_compressed_log_files,
                    MAX_LOG_FILES,
                );
                let (file_rotation, worker_guard) = appender::file_rotater(path, rotation);
                self.log_appender_guard = Some(worker_guard);

                match format {
                    LogFormat::Json => tracing_fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_writer(file_rotation)
                        .boxed(),
                    LogFormat::Default => tracing_fmt::layer()
                        .with_ansi(false)
                        .with_writer(file_rotation)
                        .event_format(LogFormatter)
                        .boxed(),
                }
            }
        };

        let targets = match std::env::var(LOG_ENV_VAR) {
            Ok(log_value) => {
                eprintln!("Using {LOG_ENV_VAR}={log_value}");
                get_logging_targets(&log_value)?
            }
            Err(_) => default_logging_targets,
        };

        let target_filters: BoxedFilter = Box::new(Targets::new().with_targets(targets));
        let (filter, reload_handle) = reload::Layer::new(target_filters);

        self.layers.push(Box::new(layer.with_filter(filter)));

        Ok(ReloadHandle(reload_handle))
    }
}

/// Parses the logging targets from a CSV such as the `CLASSDROP_LOG` value, e.g.
/// `CLASSDROP_LOG=alloy_transport_http=DEBUG,all,classdrop_evm=ERROR`.
///
/// A target without a level is traced. `classdrop_evm=ERROR` in the example above wins over the
/// TRACE level the `all` keyword would give it.
pub(crate) fn get_logging_targets(logging_value: &str) -> Result<Vec<(String, Level)>> {
    let mut targets = BTreeMap::new();
    let mut transport_level = None;

    for crate_log_level in logging_value.split(',').map(str::trim) {
        if crate_log_level.is_empty() {
            continue;
        }
        if crate_log_level == ALL_CLASSDROP_LOGS {
            transport_level = Some(Level::TRACE);
            continue;
        }
        if crate_log_level == VERBOSE_CLASSDROP_LOGS {
            // `all` wins when both are given
            transport_level.get_or_insert(Level::DEBUG);
            continue;
        }

        let (crate_name, log_level) = match crate_log_level.split_once('=') {
            Some((crate_name, log_level)) => (crate_name, log_level),
            None => (crate_log_level, "trace"),
        };
        if crate_name.is_empty() {
            return Err(Error::LoggingConfiguration(
                "Could not obtain crate name in logging string".to_string(),
            ));
        }
        targets.insert(crate_name.to_string(), get_log_level_from_str(log_level)?);
    }

    let mut keyword_targets = BTreeMap::new();
    if let Some(transport_level) = transport_level {
        for target in CLASSDROP_TARGETS {
            keyword_targets.insert(target.to_string(), Level::TRACE);
        }
        for target in TRANSPORT_TARGETS {
            keyword_targets.insert(target.to_string(), transport_level);
        }
    }
    keyword_targets.extend(targets);

    Ok(keyword_targets.into_iter().collect())
}

fn get_log_level_from_str(log_level: &str) -> Result<Level> {
    match log_level.to_lowercase().as_str() {
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::LoggingConfiguration(format!(
            "Log level {log_level} is not supported"
        ))),
    }
}
