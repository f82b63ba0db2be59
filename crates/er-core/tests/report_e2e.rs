//! End-to-end report generation with stubbed host collaborators.

use chrono::{TimeZone, Utc};
use er_core::{
    AppIdentity, BinaryIdentity, Error, FixedEnvironment, JsonReportFormatter, ProbeError,
    ReportConfig, ReportContext, ReportFormatter, ReportGenerator, SysInfoProbe, SysInfoQuery,
    SysInfoResult,
};

struct StubProbe {
    fail_machine: bool,
}

impl SysInfoProbe for StubProbe {
    fn retrieve(&self, query: SysInfoQuery) -> Result<SysInfoResult, ProbeError> {
        match query {
            SysInfoQuery::OperatingSystem => {
                Ok(SysInfoResult::new(query).with_fact("Name", "TestOS"))
            }
            SysInfoQuery::Machine if self.fail_machine => Err(ProbeError::Unsupported(query)),
            _ => Ok(SysInfoResult::new(query).with_fact("CPU", "TestCPU")),
        }
    }
}

/// Formatter that always fails.
struct BrokenFormatter;

impl ReportFormatter for BrokenFormatter {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn format(
        &self,
        _context: &ReportContext,
        _sys_info: &[SysInfoResult],
    ) -> er_report::Result<String> {
        Err(er_report::ReportError::EmptyRender)
    }
}

fn environment() -> FixedEnvironment {
    FixedEnvironment::new()
        .with_now(Utc.with_ymd_and_hms(2026, 3, 9, 8, 15, 0).unwrap())
        .with_user_name("jdoe")
        .with_machine_name("build-07")
        .with_app(AppIdentity::new("Editor", "3.2.1"))
        .with_region("en-GB")
}

#[test]
fn text_report_contains_context_and_sys_info() {
    let mut ctx = ReportContext::new()
        .with_title("Null reference")
        .with_main_message("Object reference not set");
    let generator = ReportGenerator::builder(AppIdentity::new("ignored", "0"))
        .environment(environment())
        .probe(StubProbe { fail_machine: false })
        .build(&mut ctx)
        .unwrap();

    let text = generator.create_report().unwrap();
    for needle in [
        "Null reference",
        "Object reference not set",
        "TestOS",
        "TestCPU",
        "Editor",
        "3.2.1",
        "build-07",
        "jdoe",
        "en-GB",
        "2026-03-09 08:15:00 UTC",
    ] {
        assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
    }
}

#[test]
fn error_context_renders_exception_section() {
    let mut ctx = ReportContext::from_error(std::io::Error::other("disk full"))
        .with_title("Save failed");
    let generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment())
        .probe(StubProbe { fail_machine: false })
        .build(&mut ctx)
        .unwrap();

    let text = generator.create_report().unwrap();
    assert!(text.contains("[Exception Info 1]"));
    assert!(text.contains("disk full"));
}

#[test]
fn probe_failure_degrades_to_partial_report() {
    let mut ctx = ReportContext::new().with_title("Crash");
    let generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment())
        .probe(StubProbe { fail_machine: true })
        .build(&mut ctx)
        .unwrap();

    let text = generator.create_report().unwrap();
    assert!(text.contains("TestOS"));
    assert!(!text.contains("TestCPU"));

    let failures = generator.probe_failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0],
        Error::ProbeFailure {
            query: SysInfoQuery::Machine,
            ..
        }
    ));
}

#[test]
fn repeated_reports_keep_runtime_facts() {
    let mut ctx = ReportContext::new().with_title("Crash");
    let generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment())
        .probe(StubProbe { fail_machine: false })
        .build(&mut ctx)
        .unwrap();

    let before = generator.context().runtime().cloned().unwrap();
    let first = generator.create_report().unwrap();
    let second = generator.create_report().unwrap();
    assert_eq!(first, second);
    assert_eq!(generator.context().runtime(), Some(&before));
}

#[test]
fn released_context_cannot_be_reused() {
    let mut ctx = ReportContext::new();
    {
        let _first = ReportGenerator::builder(AppIdentity::new("x", "1"))
            .environment(environment())
            .probe(StubProbe { fail_machine: false })
            .build(&mut ctx)
            .unwrap();
    }
    // The first generator's drop released the context.
    let err = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment().with_user_name("someone-else"))
        .probe(StubProbe { fail_machine: false })
        .build(&mut ctx)
        .err()
        .unwrap();
    assert!(matches!(err, Error::ContextReleased));
    assert_eq!(ctx.runtime().unwrap().user_name, "jdoe");
}

#[test]
fn create_report_after_dispose_uses_snapshots() {
    let mut ctx = ReportContext::from_error(std::io::Error::other("boom")).with_title("Crash");
    let mut generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment())
        .probe(StubProbe { fail_machine: false })
        .build(&mut ctx)
        .unwrap();

    let before = generator.create_report().unwrap();
    generator.dispose();
    let after = generator.create_report().unwrap();
    assert_eq!(before, after);
    assert!(generator.context().held_error().is_none());
}

#[test]
fn json_formatter_is_pluggable() {
    let binary = BinaryIdentity {
        name: "editor".to_string(),
        path: "/opt/editor/bin/editor".to_string(),
        size_bytes: Some(4096),
        modified: None,
    };
    let mut ctx = ReportContext::new().with_title("Crash");
    let generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment().with_entry_binary(binary))
        .probe(StubProbe { fail_machine: false })
        .formatter(JsonReportFormatter::new(ReportConfig::default()))
        .build(&mut ctx)
        .unwrap();

    let json = generator.create_report().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["general"]["title"], "Crash");
    assert_eq!(value["binary"]["name"], "editor");
    assert!(json.contains("TestCPU"));
}

#[test]
fn formatter_failure_is_reported() {
    let mut ctx = ReportContext::new();
    let generator = ReportGenerator::builder(AppIdentity::new("x", "1"))
        .environment(environment())
        .probe(StubProbe { fail_machine: false })
        .formatter(BrokenFormatter)
        .build(&mut ctx)
        .unwrap();

    let err = generator.create_report().unwrap_err();
    match err {
        Error::Formatting { formatter, .. } => assert_eq!(formatter, "broken"),
        other => panic!("unexpected error: {other}"),
    }
}
