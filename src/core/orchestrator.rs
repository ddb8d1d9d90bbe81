//! Drives a whole analysis run.
//!
//! One task per input goes into a FIFO queue, followed by one `Stop` per
//! worker. An input named twice is queued once; its later slot holds a
//! `NoOp`. Workers parse and extract their file independently and only take
//! the registry lock to merge the result. Once every worker has stopped,
//! references are resolved on the calling thread.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rayon::ThreadPoolBuilder;
use thiserror::Error;

use crate::config::CompilerConfig;
use crate::core::extract::{ExtractionSession, FileAnalysis};
use crate::core::frontend::{CompilerEnvironment, EnvironmentProbe, FrontEnd, SourceInput};
use crate::core::model::TypeRecord;
use crate::core::registry::TypeRegistry;
use crate::core::resolve::{ResolveError, resolve_references};
use crate::issues::{Issue, is_success};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("an analysis is already running on this orchestrator")]
    AlreadyRunning,
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug)]
enum Task {
    /// Holds the slot of an input already queued under the same name.
    NoOp,
    Stop,
    AnalyzeFile {
        input: usize,
        source: SourceInput,
        config: Arc<CompilerConfig>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    pub workers: usize,
    /// Log per-file failures, merge collisions and resolve failures to stderr.
    pub verbose: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            verbose: false,
        }
    }
}

/// Result of one run. Records are in input order.
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    pub registry: TypeRegistry,
    pub resolve_error: Option<ResolveError>,
}

impl AnalysisOutcome {
    pub fn types(&self) -> &[TypeRecord] {
        self.registry.records()
    }

    pub fn issues(&self) -> &[Issue] {
        self.registry.issues()
    }

    /// No error issues and a complete resolve pass.
    pub fn is_success(&self) -> bool {
        self.resolve_error.is_none() && is_success(self.issues())
    }
}

/// Clears the in-progress flag when a run ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AnalysisOrchestrator<F: FrontEnd> {
    front_end: F,
    probe: Option<Box<dyn EnvironmentProbe>>,
    options: AnalysisOptions,
    in_progress: AtomicBool,
    registry: Mutex<TypeRegistry>,
}

impl<F: FrontEnd> AnalysisOrchestrator<F> {
    pub fn new(front_end: F, options: AnalysisOptions) -> Self {
        Self {
            front_end,
            probe: None,
            options,
            in_progress: AtomicBool::new(false),
            registry: Mutex::new(TypeRegistry::new()),
        }
    }

    /// Determine the compiler environment with `probe` before each run.
    pub fn with_probe(mut self, probe: impl EnvironmentProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Analyze `sources`, all with the same compiler configuration.
    pub fn analyze(
        &self,
        sources: Vec<SourceInput>,
        config: &CompilerConfig,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AnalysisError::AlreadyRunning);
        }
        let _guard = RunGuard(&self.in_progress);

        self.registry.lock().clear();

        let environment = match self.probe_environment() {
            Ok(environment) => environment,
            Err(issue) => {
                let mut registry = TypeRegistry::new();
                registry.push_issue(issue);
                return Ok(AnalysisOutcome {
                    registry,
                    resolve_error: None,
                });
            }
        };

        let workers = self.options.workers.max(1);
        let names: Vec<String> = sources.iter().map(SourceInput::display_name).collect();
        let config = Arc::new(config.clone());

        let mut seen = HashSet::new();
        let mut tasks: VecDeque<Task> = sources
            .into_iter()
            .enumerate()
            .map(|(input, source)| {
                if !seen.insert(names[input].as_str()) {
                    return Task::NoOp;
                }
                Task::AnalyzeFile {
                    input,
                    source,
                    config: Arc::clone(&config),
                }
            })
            .collect();
        tasks.extend((0..workers).map(|_| Task::Stop));
        let queue = Mutex::new(tasks);

        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        pool.scope(|scope| {
            for _ in 0..workers {
                let queue = &queue;
                let names = &names;
                let environment = environment.as_ref();
                scope.spawn(move |_| self.work(queue, names, environment));
            }
        });

        let mut registry = std::mem::take(&mut *self.registry.lock());
        registry.sort_by_input();

        let resolve_error = resolve_references(&mut registry).err();
        if let Some(err) = &resolve_error
            && self.options.verbose
        {
            eprintln!("Warning: reference resolution stopped: {}", err);
        }

        Ok(AnalysisOutcome {
            registry,
            resolve_error,
        })
    }

    fn probe_environment(&self) -> Result<Option<CompilerEnvironment>, Issue> {
        let Some(probe) = &self.probe else {
            return Ok(None);
        };

        match probe.probe() {
            Ok(environment) => Ok(Some(environment)),
            Err(err) => {
                if self.options.verbose {
                    eprintln!("Warning: compiler environment probe failed: {}", err);
                }
                Err(Issue::global_error(format!(
                    "Detect compiler environment failed: {}",
                    err
                )))
            }
        }
    }

    fn work(
        &self,
        queue: &Mutex<VecDeque<Task>>,
        names: &[String],
        environment: Option<&CompilerEnvironment>,
    ) {
        loop {
            let task = queue.lock().pop_front();
            match task {
                None | Some(Task::Stop) => break,
                Some(Task::NoOp) => {}
                Some(Task::AnalyzeFile {
                    input,
                    source,
                    config,
                }) => {
                    let analysis = self.analyze_file(&source, &config, environment);
                    let collisions = self.registry.lock().merge(input, analysis);

                    if self.options.verbose {
                        for collision in collisions {
                            eprintln!(
                                "Note: '{}' is defined by both {} and {}; keeping {}",
                                collision.name,
                                names[collision.kept],
                                names[collision.dropped],
                                names[collision.kept]
                            );
                        }
                    }
                }
            }
        }
    }

    fn analyze_file(
        &self,
        source: &SourceInput,
        config: &CompilerConfig,
        environment: Option<&CompilerEnvironment>,
    ) -> FileAnalysis {
        match self.front_end.parse(source, config, environment) {
            Ok(unit) => ExtractionSession::new(&unit, config).run(),
            Err(err) => {
                if self.options.verbose {
                    eprintln!("Warning: {}", err);
                }
                FileAnalysis {
                    records: Vec::new(),
                    issues: vec![Issue::file_error(source.display_name(), err.to_string())],
                }
            }
        }
    }
}
