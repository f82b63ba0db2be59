//! Panic hook that turns an unhandled panic into a fault report.

use crate::environment::AppIdentity;
use crate::generator::ReportGenerator;

use er_common::ReportContext;
use er_report::{ReportConfig, TextReportFormatter};
use std::backtrace::Backtrace;
use std::panic::{self, PanicHookInfo};
use tracing::error;

/// What the panic hook puts in each report.
#[derive(Debug, Clone)]
pub struct PanicHookOptions {
    pub app: AppIdentity,
    pub title: String,
    pub main_message: String,
    pub further_instructions: String,
    pub include_backtrace: bool,
    pub config: ReportConfig,
}

impl PanicHookOptions {
    pub fn new(app: AppIdentity) -> Self {
        Self {
            app,
            title: "Unexpected error".to_string(),
            main_message: "The application stopped because of an internal error.".to_string(),
            further_instructions: String::new(),
            include_backtrace: true,
            config: ReportConfig::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_main_message(mut self, message: impl Into<String>) -> Self {
        self.main_message = message.into();
        self
    }

    pub fn with_further_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.further_instructions = instructions.into();
        self
    }

    pub fn with_backtrace(mut self, include: bool) -> Self {
        self.include_backtrace = include;
        self
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }
}

/// Install a hook that renders a text report for every panic.
///
/// The rendered report (or the error that prevented it) is handed to `sink`,
/// then the previously installed hook runs as before.
pub fn install_panic_hook<S>(options: PanicHookOptions, sink: S)
where
    S: Fn(er_common::Result<String>) + Send + Sync + 'static,
{
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let backtrace = options.include_backtrace.then(Backtrace::force_capture);
        let mut context = panic_context(&options, info, backtrace);
        let report = ReportGenerator::builder(options.app.clone())
            .formatter(TextReportFormatter::new(options.config.clone()))
            .build(&mut context)
            .and_then(|generator| generator.create_report());
        if let Err(err) = &report {
            error!(error = %err, "failed to build panic report");
        }
        sink(report);
        previous(info);
    }));
}

fn panic_context(
    options: &PanicHookOptions,
    info: &PanicHookInfo<'_>,
    backtrace: Option<Backtrace>,
) -> ReportContext {
    let mut context = ReportContext::from_panic(info)
        .with_title(options.title.as_str())
        .with_main_message(options.main_message.as_str())
        .with_further_instructions(options.further_instructions.as_str());
    if let Some(exception) = context.main_exception_mut() {
        exception.backtrace = backtrace.map(|bt| bt.to_string());
    }
    context
}
