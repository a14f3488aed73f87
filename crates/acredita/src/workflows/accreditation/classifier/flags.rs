use chrono::{Months, NaiveDate};

use super::super::domain::AccreditationPeriod;
use super::config::ClassifierConfig;

/// Temporal state of a single period relative to a reference date.
///
/// A range whose end precedes its start contributes no flags, and a
/// half-filled pair of bounds contributes none either, except that a
/// process with a start and no end reads as open-ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFlags {
    pub has_current_approval: bool,
    pub has_expired_approval: bool,
    pub in_grace_period: bool,
    pub has_active_process: bool,
}

impl PeriodFlags {
    pub fn evaluate(
        period: &AccreditationPeriod,
        reference: NaiveDate,
        config: &ClassifierConfig,
    ) -> Self {
        let mut flags = Self::default();

        if let Some((start, end)) = period.approval_bounds() {
            if start <= end {
                flags.has_current_approval = start <= reference && reference <= end;
                flags.has_expired_approval = reference > end;
                if flags.has_expired_approval {
                    flags.in_grace_period = reference <= grace_limit(end, config);
                }
            }
        }

        if let Some(start) = period.process_start {
            match period.process_end {
                Some(end) if start <= end => {
                    flags.has_active_process = start <= reference && reference <= end;
                }
                Some(_) => {}
                None => flags.has_active_process = reference >= start,
            }
        }

        flags
    }
}

/// Latest date on which an approval expired at `end` still grants grace.
fn grace_limit(end: NaiveDate, config: &ClassifierConfig) -> NaiveDate {
    end.checked_add_months(Months::new(config.grace_months))
        .unwrap_or(NaiveDate::MAX)
}

/// OR-accumulation of per-period flags across a career's full history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateFlags {
    pub any_current_approval: bool,
    pub any_expired_approval: bool,
    pub any_grace_period: bool,
    pub any_active_process: bool,
}

impl AggregateFlags {
    pub fn collect<'a, I>(periods: I, reference: NaiveDate, config: &ClassifierConfig) -> Self
    where
        I: IntoIterator<Item = &'a AccreditationPeriod>,
    {
        let mut aggregate = Self::default();
        for period in periods {
            aggregate.merge(PeriodFlags::evaluate(period, reference, config));
        }
        aggregate
    }

    fn merge(&mut self, flags: PeriodFlags) {
        self.any_current_approval |= flags.has_current_approval;
        self.any_expired_approval |= flags.has_expired_approval;
        self.any_grace_period |= flags.in_grace_period;
        self.any_active_process |= flags.has_active_process;
    }
}
