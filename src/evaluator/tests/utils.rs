use crate::duty::{DutyInterval, DutyStatus};
use crate::evaluator::{HosStatus, HosViolation, LimitKind, Severity};
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use std::sync::Arc;

pub fn iv(id: &str, status: DutyStatus, start: &str, end: &str) -> DutyInterval {
    DutyInterval {
        id: Arc::from(id),
        status,
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
        remarks: None,
    }
}

pub fn driving(id: &str, start: &str, end: &str) -> DutyInterval {
    iv(id, DutyStatus::Driving, start, end)
}

pub fn on_duty(id: &str, start: &str, end: &str) -> DutyInterval {
    iv(id, DutyStatus::OnDuty, start, end)
}

pub fn off_duty(id: &str, start: &str, end: &str) -> DutyInterval {
    iv(id, DutyStatus::OffDuty, start, end)
}

pub fn sleeper(id: &str, start: &str, end: &str) -> DutyInterval {
    iv(id, DutyStatus::SleeperBerth, start, end)
}

pub fn find(status: &HosStatus, kind: LimitKind) -> Option<&HosViolation> {
    status.violations.iter().find(|v| v.kind == kind)
}

pub fn has_violation(status: &HosStatus, kind: LimitKind) -> bool {
    status
        .violations
        .iter()
        .any(|v| v.kind == kind && v.severity == Severity::Violation)
}

pub fn arb_status() -> impl Strategy<Value = DutyStatus> {
    prop_oneof![
        proptest::strategy::Just(DutyStatus::OffDuty),
        proptest::strategy::Just(DutyStatus::SleeperBerth),
        proptest::strategy::Just(DutyStatus::Driving),
        proptest::strategy::Just(DutyStatus::OnDuty),
    ]
}

pub fn arb_interval() -> impl Strategy<Value = DutyInterval> {
    (arb_status(), 0..1000u64, 1..400u64).prop_map(|(status, start, dur)| DutyInterval {
        id: Arc::from("prop"),
        status,
        start: Time(start),
        end: Time((start + dur).min(1439)),
        remarks: None,
    })
}
