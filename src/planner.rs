use crate::duty::{DutyInterval, DutyStatus};
use crate::time::Time;
use std::sync::Arc;

/// Longest driving stint before a break is forced into the plan.
const MAX_STINT_HOURS: f64 = 8.0;
const BREAK_MINUTES: u64 = 30;
const INSPECTION_MINUTES: u64 = 30;

fn block(seq: u32, status: DutyStatus, start: Time, minutes: u64, remarks: &str) -> DutyInterval {
    DutyInterval {
        id: Arc::from(format!("block-{}", seq)),
        status,
        start,
        end: start + minutes,
        remarks: Some(remarks.to_string()),
    }
}

/// Lays out a duty day that spends `total_driving_hours` behind the wheel:
/// a 30-minute pre-trip inspection, driving stints of up to 8 hours with a
/// 30-minute break between them (never after the last one), and a
/// 30-minute post-trip inspection. Times wrap at midnight.
///
/// The break rule is the only one encoded structurally. The plan is not
/// checked against the driving, on-duty, or cycle ceilings, which is why
/// `_current_cycle_hours` goes unused; run the result through
/// `evaluator::evaluate` before treating it as legal.
pub fn plan_day(
    start: Time,
    total_driving_hours: f64,
    _current_cycle_hours: f64,
) -> Vec<DutyInterval> {
    let mut blocks = Vec::new();
    let mut clock = start;
    let mut seq = 1;
    let mut remaining = total_driving_hours;

    blocks.push(block(
        seq,
        DutyStatus::OnDuty,
        clock,
        INSPECTION_MINUTES,
        "Pre-trip inspection and paperwork",
    ));
    clock = clock + INSPECTION_MINUTES;
    seq += 1;

    while remaining > 0.0 {
        // remaining strictly decreases by the stint length, so the loop
        // terminates for fractional inputs too.
        let stint = remaining.min(MAX_STINT_HOURS);
        let stint_minutes = (stint * 60.0).round() as u64;
        if stint_minutes == 0 {
            // residue below the one-minute scheduling resolution
            break;
        }
        blocks.push(block(
            seq,
            DutyStatus::Driving,
            clock,
            stint_minutes,
            &format!("Driving segment: {:.1} hours", stint),
        ));
        clock = clock + stint_minutes;
        seq += 1;
        remaining -= stint;

        if (remaining * 60.0).round() as u64 > 0 {
            blocks.push(block(
                seq,
                DutyStatus::OffDuty,
                clock,
                BREAK_MINUTES,
                "Required 30-minute break",
            ));
            clock = clock + BREAK_MINUTES;
            seq += 1;
        }
    }

    blocks.push(block(
        seq,
        DutyStatus::OnDuty,
        clock,
        INSPECTION_MINUTES,
        "Post-trip inspection and paperwork",
    ));
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Time {
        s.parse().unwrap()
    }

    fn assert_block(
        interval: &DutyInterval,
        id: &str,
        status: DutyStatus,
        start: &str,
        end: &str,
    ) {
        assert_eq!(interval.id.as_ref(), id);
        assert_eq!(interval.status, status);
        assert_eq!(interval.start, t(start));
        assert_eq!(interval.end, t(end));
    }

    #[test]
    fn test_sixteen_hour_plan_layout() {
        let blocks = plan_day(t("06:00"), 16.0, 0.0);

        assert_eq!(blocks.len(), 5);
        assert_block(&blocks[0], "block-1", DutyStatus::OnDuty, "06:00", "06:30");
        assert_block(&blocks[1], "block-2", DutyStatus::Driving, "06:30", "14:30");
        assert_block(&blocks[2], "block-3", DutyStatus::OffDuty, "14:30", "15:00");
        assert_block(&blocks[3], "block-4", DutyStatus::Driving, "15:00", "23:00");
        assert_block(&blocks[4], "block-5", DutyStatus::OnDuty, "23:00", "23:30");
    }

    #[test]
    fn test_no_break_after_final_stint() {
        let blocks = plan_day(t("06:00"), 8.0, 0.0);

        assert_eq!(blocks.len(), 3);
        assert_block(&blocks[1], "block-2", DutyStatus::Driving, "06:30", "14:30");
        assert_block(&blocks[2], "block-3", DutyStatus::OnDuty, "14:30", "15:00");
    }

    #[test]
    fn test_fractional_hours_terminate() {
        let blocks = plan_day(t("06:00"), 8.75, 0.0);

        assert_eq!(blocks.len(), 5);
        assert_block(&blocks[3], "block-4", DutyStatus::Driving, "15:00", "15:45");
        assert_block(&blocks[4], "block-5", DutyStatus::OnDuty, "15:45", "16:15");
    }

    #[test]
    fn test_zero_driving_hours() {
        let blocks = plan_day(t("06:00"), 0.0, 0.0);

        assert_eq!(blocks.len(), 2);
        assert_block(&blocks[0], "block-1", DutyStatus::OnDuty, "06:00", "06:30");
        assert_block(&blocks[1], "block-2", DutyStatus::OnDuty, "06:30", "07:00");
    }

    #[test]
    fn test_sub_minute_request_emits_no_driving_block() {
        let blocks = plan_day(t("06:00"), 0.004, 0.0);

        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            assert!(block.validate().is_ok());
        }
    }

    #[test]
    fn test_sub_minute_residue_gets_no_trailing_break() {
        let blocks = plan_day(t("06:00"), 8.004, 0.0);

        assert_eq!(blocks.len(), 3);
        assert_block(&blocks[1], "block-2", DutyStatus::Driving, "06:30", "14:30");
        assert_block(&blocks[2], "block-3", DutyStatus::OnDuty, "14:30", "15:00");
    }

    #[test]
    fn test_plan_wraps_past_midnight() {
        let blocks = plan_day(t("20:00"), 8.0, 0.0);

        assert_block(&blocks[1], "block-2", DutyStatus::Driving, "20:30", "04:30");
        assert_block(&blocks[2], "block-3", DutyStatus::OnDuty, "04:30", "05:00");
    }

    #[test]
    fn test_blocks_are_contiguous() {
        let blocks = plan_day(t("03:15"), 13.5, 0.0);
        for pair in blocks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}
