//! Report context: the fault being reported plus the runtime facts stamped
//! onto it when a generator is created.
//!
//! The context is created by the embedding application and handed to the
//! generator by mutable borrow. Runtime facts are write-once; the held error
//! object is the resource released when the generator is disposed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::panic::PanicHookInfo;

/// Boxed error object held by a context until release.
pub type HeldError = Box<dyn StdError + Send + Sync + 'static>;

/// Snapshot of one exception (error value or panic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    /// Rust type name of the error, when known.
    pub type_name: Option<String>,
    /// Display text of the error.
    pub message: String,
    /// Source location (`file:line:column`), known for panics.
    pub location: Option<String>,
    /// Display text of each `source()` in the chain, outermost first.
    pub causes: Vec<String>,
    /// Rendered backtrace if one was captured.
    pub backtrace: Option<String>,
}

impl ExceptionInfo {
    /// Create an exception snapshot from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            type_name: None,
            message: message.into(),
            location: None,
            causes: Vec::new(),
            backtrace: None,
        }
    }

    /// Snapshot an error and its source chain.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            type_name: None,
            message: err.to_string(),
            location: None,
            causes,
            backtrace: capture_backtrace(),
        }
    }

    /// Snapshot a panic payload.
    ///
    /// Payloads that are neither `&str` nor `String` are reported as
    /// `Box<dyn Any>`, matching the standard panic message.
    pub fn from_panic_payload(payload: &(dyn Any + Send), location: Option<String>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self {
            type_name: Some("panic".to_string()),
            message,
            location,
            causes: Vec::new(),
            backtrace: capture_backtrace(),
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }
}

fn capture_backtrace() -> Option<String> {
    let bt = Backtrace::capture();
    match bt.status() {
        BacktraceStatus::Captured => Some(bt.to_string()),
        _ => None,
    }
}

/// Identity of the binary the fault happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryIdentity {
    /// File name of the executable.
    pub name: String,
    /// Full path of the executable.
    pub path: String,
    /// File size in bytes.
    pub size_bytes: Option<u64>,
    /// Last modification time of the executable.
    pub modified: Option<DateTime<Utc>>,
}

/// Runtime environment facts stamped at generator construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeFacts {
    /// When the fault was reported.
    pub exception_date: DateTime<Utc>,
    /// OS account running the application.
    pub user_name: String,
    /// Host name.
    pub machine_name: String,
    /// Declared product name of the embedding application.
    pub app_name: String,
    /// Declared product version of the embedding application.
    pub app_version: String,
    /// Active culture/region display name.
    pub region: String,
    /// Entry binary identity, when resolvable.
    pub app_binary: Option<BinaryIdentity>,
}

/// Caller-owned description of a fault.
#[derive(Debug, Default)]
pub struct ReportContext {
    /// Short title, e.g. the dialog caption.
    pub title: String,
    /// Main message shown to the user.
    pub main_message: String,
    /// What the user should do next.
    pub further_instructions: String,
    /// What the user says they were doing.
    pub user_explanation: Option<String>,
    /// Where the user can be reached about this report.
    pub contact_email: Option<String>,
    exceptions: Vec<ExceptionInfo>,
    error: Option<HeldError>,
    runtime: Option<RuntimeFacts>,
    released: bool,
}

impl ReportContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for an error, holding the error until release.
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let info = ExceptionInfo::from_error(&err).with_type_name(std::any::type_name::<E>());
        Self {
            exceptions: vec![info],
            error: Some(Box::new(err)),
            ..Self::default()
        }
    }

    /// Create a context for a boxed error.
    pub fn from_boxed_error(err: HeldError) -> Self {
        let info = ExceptionInfo::from_error(err.as_ref());
        Self {
            exceptions: vec![info],
            error: Some(err),
            ..Self::default()
        }
    }

    /// Create a context for a panic in progress.
    pub fn from_panic(info: &PanicHookInfo<'_>) -> Self {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
        let exception = ExceptionInfo::from_panic_payload(info.payload(), location);
        Self {
            exceptions: vec![exception],
            ..Self::default()
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

    pub fn with_user_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.user_explanation = Some(explanation.into());
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    /// Append another exception to report.
    pub fn add_exception(&mut self, exception: ExceptionInfo) {
        self.exceptions.push(exception);
    }

    /// Exceptions in the order they were added.
    pub fn exceptions(&self) -> &[ExceptionInfo] {
        &self.exceptions
    }

    /// The first exception, if any.
    pub fn main_exception(&self) -> Option<&ExceptionInfo> {
        self.exceptions.first()
    }

    /// Mutable access to the first exception, e.g. to attach a backtrace.
    pub fn main_exception_mut(&mut self) -> Option<&mut ExceptionInfo> {
        self.exceptions.first_mut()
    }

    /// The error object held for the report, until released.
    pub fn held_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.error.as_deref()
    }

    /// Runtime facts, once stamped.
    pub fn runtime(&self) -> Option<&RuntimeFacts> {
        self.runtime.as_ref()
    }

    /// Stamp runtime facts.
    ///
    /// Returns `false` and leaves the existing facts untouched if the
    /// context was already stamped.
    pub fn stamp_runtime(&mut self, facts: RuntimeFacts) -> bool {
        if self.runtime.is_some() {
            return false;
        }
        self.runtime = Some(facts);
        true
    }

    /// Release owned resources (the held error object).
    ///
    /// Returns `true` only for the call that performed the release.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.error = None;
        self.released = true;
        true
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
