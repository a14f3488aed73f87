use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AccreditationPeriod, DateWindow};

/// Why a period was chosen as the governing record for a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTag {
    ActiveCurrent,
    FutureProcess,
    ExactMatch,
}

impl ActiveTag {
    pub const fn label(self) -> &'static str {
        match self {
            ActiveTag::ActiveCurrent => "approved and current",
            ActiveTag::FutureProcess => "scheduled process",
            ActiveTag::ExactMatch => "matching process window",
        }
    }
}

/// The governing period together with the reason it was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSelection {
    pub period: AccreditationPeriod,
    pub tag: ActiveTag,
}

/// Select at most one governing period for `reference`.
///
/// An approved-and-current period always wins; otherwise a period whose
/// process is scheduled to start after `reference`; otherwise, when the
/// caller supplies a desired window (only the find-or-create workflow
/// does), a period whose process window matches it exactly. Each period
/// takes the first tag it qualifies for.
///
/// Several approved-and-current candidates resolve to the latest
/// `approval_start`; candidates missing `approval_start` (certificate
/// rows predating the process backfill) fall back to the latest
/// `process_start`. Remaining ties keep the first candidate encountered,
/// as do the other two tags.
pub fn select_active(
    periods: &[AccreditationPeriod],
    reference: NaiveDate,
    desired: Option<DateWindow>,
) -> Option<ActiveSelection> {
    let mut current: Option<&AccreditationPeriod> = None;
    let mut future: Option<&AccreditationPeriod> = None;
    let mut exact: Option<&AccreditationPeriod> = None;

    for period in periods {
        if is_currently_approved(period, reference) {
            if current.map_or(true, |best| ranks_above(period, best)) {
                current = Some(period);
            }
            continue;
        }

        if period.process_start.map_or(false, |start| start > reference) {
            if future.is_none() {
                future = Some(period);
            }
            continue;
        }

        if let Some(window) = desired {
            if exact.is_none()
                && period.process_start == Some(window.start())
                && period.process_end == Some(window.end())
            {
                exact = Some(period);
            }
        }
    }

    let (period, tag) = match (current, future, exact) {
        (Some(period), _, _) => (period, ActiveTag::ActiveCurrent),
        (None, Some(period), _) => (period, ActiveTag::FutureProcess),
        (None, None, Some(period)) => (period, ActiveTag::ExactMatch),
        (None, None, None) => return None,
    };

    Some(ActiveSelection {
        period: period.clone(),
        tag,
    })
}

/// A missing `approval_start` reads as unbounded-below; a missing
/// `approval_end` never qualifies.
fn is_currently_approved(period: &AccreditationPeriod, reference: NaiveDate) -> bool {
    match (period.approval_start, period.approval_end) {
        (Some(start), Some(end)) => start <= end && start <= reference && reference <= end,
        (None, Some(end)) => reference <= end,
        _ => false,
    }
}

fn ranks_above(candidate: &AccreditationPeriod, best: &AccreditationPeriod) -> bool {
    match (candidate.approval_start, best.approval_start) {
        (Some(candidate_start), Some(best_start)) => candidate_start > best_start,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => match (candidate.process_start, best.process_start) {
            (Some(candidate_start), Some(best_start)) => candidate_start > best_start,
            (Some(_), None) => true,
            _ => false,
        },
    }
}
