use super::super::domain::StatusLabel;
use super::flags::{AggregateFlags, PeriodFlags};

/// Career-level label: the first matching rule wins.
///
/// An expired approval alone never reads `Expired` here; within grace
/// it reads `InReaccreditation`, beyond grace it falls through to
/// `NotAccredited`.
pub(crate) fn career_label(flags: AggregateFlags) -> StatusLabel {
    if flags.any_current_approval && flags.any_active_process {
        return StatusLabel::InReaccreditation;
    }

    if flags.any_current_approval {
        return StatusLabel::Accredited;
    }

    if flags.any_active_process && flags.any_expired_approval {
        return StatusLabel::InReaccreditation;
    }

    if flags.any_grace_period {
        return StatusLabel::InReaccreditation;
    }

    if flags.any_active_process {
        return StatusLabel::InProcess;
    }

    StatusLabel::NotAccredited
}

/// Per-period label for breakdown rows. Shares the career rules but can
/// surface `Expired` for a lapsed certificate with nothing underway.
pub(crate) fn period_label(flags: PeriodFlags) -> StatusLabel {
    if flags.has_current_approval && flags.has_active_process {
        return StatusLabel::InReaccreditation;
    }

    if flags.has_current_approval {
        return StatusLabel::Accredited;
    }

    if flags.has_active_process && flags.has_expired_approval {
        return StatusLabel::InReaccreditation;
    }

    if flags.in_grace_period {
        return StatusLabel::InReaccreditation;
    }

    if flags.has_active_process {
        return StatusLabel::InProcess;
    }

    if flags.has_expired_approval {
        return StatusLabel::Expired;
    }

    StatusLabel::NotAccredited
}
