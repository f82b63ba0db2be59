//! Report generator: enriches a context, caches system info, renders.
//!
//! One generator serves one fault-reporting episode:
//!
//! ```text
//! ReportContext ──build──▶ ReportGenerator ──create_report──▶ String
//!   (stamped once)            │  sys_info (fetched once)
//!                             └─ drop/dispose ──▶ context.release()
//! ```

use crate::environment::{AppIdentity, EnvironmentFacts, SystemEnvironment};
use crate::logging::truncate_for_log;
use crate::sysinfo::{HostProbe, ProbeError, SysInfoProbe};

use er_common::{Error, ReportContext, ReportId, Result, SysInfoQuery, SysInfoResult};
use er_report::{ReportFormatter, TextReportFormatter};
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use tracing::{debug, error, info, warn};

/// Results of the single system-info fetch.
#[derive(Debug, Default)]
struct SysInfoCache {
    results: Vec<SysInfoResult>,
    failures: Vec<Error>,
}

/// Configures the collaborators of a [`ReportGenerator`].
pub struct ReportGeneratorBuilder {
    environment: Box<dyn EnvironmentFacts>,
    probe: Box<dyn SysInfoProbe>,
    formatter: Box<dyn ReportFormatter>,
}

impl ReportGeneratorBuilder {
    /// Defaults: live environment, host probe, text formatter.
    pub fn new(app: AppIdentity) -> Self {
        Self {
            environment: Box::new(SystemEnvironment::new(app)),
            probe: Box::new(HostProbe::new()),
            formatter: Box::new(TextReportFormatter::default()),
        }
    }

    /// Replace the runtime facts provider.
    pub fn environment(mut self, environment: impl EnvironmentFacts + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Replace the system-info probe.
    pub fn probe(mut self, probe: impl SysInfoProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the formatter.
    pub fn formatter(mut self, formatter: impl ReportFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Create the generator, stamping runtime facts onto the context.
    pub fn build(self, context: &mut ReportContext) -> Result<ReportGenerator<'_>> {
        self.build_from(Some(context))
    }

    /// Like [`build`](Self::build) for callers whose context may be absent.
    ///
    /// An absent or already released context fails before anything is read
    /// or written.
    pub fn build_from(self, context: Option<&mut ReportContext>) -> Result<ReportGenerator<'_>> {
        let context = context
            .ok_or_else(|| Error::InvalidArgument("report context cannot be absent".to_string()))?;
        if context.is_released() {
            return Err(Error::ContextReleased);
        }

        let report_id = ReportId::new();
        let facts = self.environment.capture();
        if !context.stamp_runtime(facts) {
            debug!(report_id = %report_id, "context already stamped; keeping original runtime facts");
        }
        debug!(
            report_id = %report_id,
            exceptions = context.exceptions().len(),
            formatter = self.formatter.name(),
            "report generator created"
        );

        Ok(ReportGenerator {
            context,
            report_id,
            probe: self.probe,
            formatter: self.formatter,
            sys_info: OnceLock::new(),
            disposed: false,
        })
    }
}

/// Orchestrates one fault report.
///
/// The generator borrows the caller's context for its whole lifetime and
/// releases the context's resources when disposed or dropped, whichever
/// comes first.
pub struct ReportGenerator<'a> {
    context: &'a mut ReportContext,
    report_id: ReportId,
    probe: Box<dyn SysInfoProbe>,
    formatter: Box<dyn ReportFormatter>,
    sys_info: OnceLock<SysInfoCache>,
    disposed: bool,
}

impl<'a> ReportGenerator<'a> {
    /// Start configuring a generator for an application.
    pub fn builder(app: AppIdentity) -> ReportGeneratorBuilder {
        ReportGeneratorBuilder::new(app)
    }

    /// Create a generator with default collaborators.
    pub fn new(context: &'a mut ReportContext, app: AppIdentity) -> Result<Self> {
        ReportGeneratorBuilder::new(app).build(context)
    }

    /// Identifier used in this episode's log events.
    pub fn report_id(&self) -> &ReportId {
        &self.report_id
    }

    /// The enriched context.
    pub fn context(&self) -> &ReportContext {
        &*self.context
    }

    /// System-info results in canonical order, fetched on first call.
    ///
    /// Categories whose query failed are omitted; see
    /// [`probe_failures`](Self::probe_failures).
    pub fn get_or_fetch_system_info(&self) -> &[SysInfoResult] {
        &self.cache().results
    }

    /// Per-query failures recorded during the fetch.
    pub fn probe_failures(&self) -> &[Error] {
        &self.cache().failures
    }

    /// Render the report.
    ///
    /// System info is fetched at most once per generator; the text is
    /// rendered fresh on every call.
    pub fn create_report(&self) -> Result<String> {
        let sys_info = self.get_or_fetch_system_info();
        match self.formatter.format(&*self.context, sys_info) {
            Ok(text) => {
                info!(
                    report_id = %self.report_id,
                    formatter = self.formatter.name(),
                    bytes = text.len(),
                    categories = sys_info.len(),
                    title = %truncate_for_log(&self.context.title, 80),
                    "Report generated"
                );
                Ok(text)
            }
            Err(err) => {
                error!(
                    report_id = %self.report_id,
                    formatter = self.formatter.name(),
                    error = %err,
                    "Report formatting failed"
                );
                Err(Error::Formatting {
                    formatter: self.formatter.name().to_string(),
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Release the context's owned resources.
    ///
    /// Only the first call has an effect. The system-info cache is kept.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.context.release() {
            debug!(report_id = %self.report_id, "released report context");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn cache(&self) -> &SysInfoCache {
        self.sys_info
            .get_or_init(|| fetch_sys_info(self.probe.as_ref(), &self.report_id))
    }
}

impl Drop for ReportGenerator<'_> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Run every canonical query, keeping what succeeds.
fn fetch_sys_info(probe: &dyn SysInfoProbe, report_id: &ReportId) -> SysInfoCache {
    let mut cache = SysInfoCache::default();

    for query in SysInfoQuery::CANONICAL {
        match retrieve_guarded(probe, query) {
            Ok(result) => {
                debug!(report_id = %report_id, query = %query, facts = result.facts().len(), "system info retrieved");
                cache.results.push(result);
            }
            Err(err) => {
                warn!(report_id = %report_id, query = %query, error = %err, "system info query failed");
                cache.failures.push(Error::ProbeFailure {
                    query,
                    reason: err.to_string(),
                });
            }
        }
    }

    cache
}

/// Retrieve one query, turning a panicking probe into a probe error.
fn retrieve_guarded(probe: &dyn SysInfoProbe, query: SysInfoQuery) -> std::result::Result<SysInfoResult, ProbeError> {
    panic::catch_unwind(AssertUnwindSafe(|| probe.retrieve(query))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ProbeError::Panicked(message))
    })
}
