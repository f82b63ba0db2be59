//! Property tests for report context invariants.

use chrono::{TimeZone, Utc};
use er_common::{ExceptionInfo, ReportContext, RuntimeFacts};
use proptest::prelude::*;

fn facts(user: &str, host: &str) -> RuntimeFacts {
    RuntimeFacts {
        exception_date: Utc.with_ymd_and_hms(2026, 1, 15, 14, 30, 22).unwrap(),
        user_name: user.to_string(),
        machine_name: host.to_string(),
        app_name: "prop-app".to_string(),
        app_version: "0.0.1".to_string(),
        region: "en-US".to_string(),
        app_binary: None,
    }
}

proptest! {
    #[test]
    fn first_stamp_always_wins(users in proptest::collection::vec("[a-z]{1,12}", 1..8)) {
        let mut ctx = ReportContext::new();
        for (i, user) in users.iter().enumerate() {
            let stamped = ctx.stamp_runtime(facts(user, "host"));
            prop_assert_eq!(stamped, i == 0);
        }
        prop_assert_eq!(&ctx.runtime().unwrap().user_name, &users[0]);
    }

    #[test]
    fn release_has_effect_once(calls in 1usize..6) {
        let mut ctx = ReportContext::from_error(std::io::Error::other("boom"));
        let effective = (0..calls).filter(|_| ctx.release()).count();
        prop_assert_eq!(effective, 1);
        prop_assert!(ctx.held_error().is_none());
    }

    #[test]
    fn exceptions_keep_insertion_order(messages in proptest::collection::vec(".{0,20}", 0..6)) {
        let mut ctx = ReportContext::new();
        for m in &messages {
            ctx.add_exception(ExceptionInfo::new(m.clone()));
        }
        let got: Vec<_> = ctx.exceptions().iter().map(|e| e.message.clone()).collect();
        prop_assert_eq!(got, messages);
    }
}

#[test]
fn io_error_context_records_type_name() {
    let ctx = ReportContext::from_error(std::io::Error::other("boom"));
    let exc = ctx.main_exception().unwrap();
    assert!(exc.type_name.as_deref().unwrap().contains("io"));
    assert_eq!(exc.message, "boom");
}
