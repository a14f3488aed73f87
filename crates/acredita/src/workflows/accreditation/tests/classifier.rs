use super::common::*;
use crate::workflows::accreditation::classifier::{AggregateFlags, PeriodFlags};
use crate::workflows::accreditation::domain::StatusLabel;

#[test]
fn flags_mark_current_approval_inclusive_of_both_bounds() {
    let period = approved_period(1, date(2019, 8, 1), date(2024, 8, 1));
    let config = classifier_config();

    for reference in [date(2019, 8, 1), date(2022, 1, 15), date(2024, 8, 1)] {
        let flags = PeriodFlags::evaluate(&period, reference, &config);
        assert!(flags.has_current_approval, "current at {reference}");
        assert!(!flags.has_expired_approval);
    }

    let before = PeriodFlags::evaluate(&period, date(2019, 7, 31), &config);
    assert!(!before.has_current_approval);

    let after = PeriodFlags::evaluate(&period, date(2024, 8, 2), &config);
    assert!(!after.has_current_approval);
    assert!(after.has_expired_approval);
}

#[test]
fn flags_grant_grace_for_two_years_after_expiry() {
    let period = approved_period(1, date(2015, 1, 1), date(2020, 1, 1));
    let config = classifier_config();

    let inside = PeriodFlags::evaluate(&period, date(2021, 6, 1), &config);
    assert!(inside.has_expired_approval);
    assert!(inside.in_grace_period);

    let boundary = PeriodFlags::evaluate(&period, date(2022, 1, 1), &config);
    assert!(boundary.in_grace_period, "grace bound is inclusive");

    let beyond = PeriodFlags::evaluate(&period, date(2022, 1, 2), &config);
    assert!(beyond.has_expired_approval);
    assert!(!beyond.in_grace_period);
}

#[test]
fn flags_clamp_grace_bound_at_month_end() {
    let period = approved_period(1, date(2015, 2, 28), date(2020, 2, 29));
    let config = classifier_config();

    let clamped = PeriodFlags::evaluate(&period, date(2022, 2, 28), &config);
    assert!(clamped.in_grace_period);

    let past = PeriodFlags::evaluate(&period, date(2022, 3, 1), &config);
    assert!(!past.in_grace_period);
}

#[test]
fn flags_treat_process_window_as_inclusive() {
    let period = process_period(1, date(2024, 1, 10), Some(date(2024, 7, 10)));
    let config = classifier_config();

    assert!(
        PeriodFlags::evaluate(&period, date(2024, 1, 10), &config).has_active_process
    );
    assert!(
        PeriodFlags::evaluate(&period, date(2024, 7, 10), &config).has_active_process
    );
    assert!(
        !PeriodFlags::evaluate(&period, date(2024, 7, 11), &config).has_active_process
    );
    assert!(
        !PeriodFlags::evaluate(&period, date(2024, 1, 9), &config).has_active_process
    );
}

#[test]
fn flags_treat_missing_process_end_as_open_ended() {
    let period = process_period(1, date(2024, 1, 10), None);
    let config = classifier_config();

    assert!(
        PeriodFlags::evaluate(&period, date(2026, 5, 1), &config).has_active_process
    );
    assert!(
        !PeriodFlags::evaluate(&period, date(2024, 1, 9), &config).has_active_process
    );
}

#[test]
fn flags_ignore_malformed_ranges() {
    let mut period = bare_period(1);
    period.approval_start = Some(date(2024, 8, 1));
    period.approval_end = Some(date(2019, 8, 1));
    period.process_start = Some(date(2024, 7, 10));
    period.process_end = Some(date(2024, 1, 10));

    let flags = PeriodFlags::evaluate(&period, date(2024, 6, 1), &classifier_config());
    assert_eq!(flags, PeriodFlags::default());
}

#[test]
fn flags_require_both_approval_bounds() {
    let mut period = bare_period(1);
    period.approval_end = Some(date(2020, 1, 1));

    let flags = PeriodFlags::evaluate(&period, date(2021, 6, 1), &classifier_config());
    assert!(!flags.has_expired_approval);
    assert!(!flags.in_grace_period);
}

#[test]
fn aggregate_flags_or_across_periods() {
    let periods = vec![
        approved_period(1, date(2019, 8, 1), date(2024, 8, 1)),
        process_period(2, date(2024, 1, 10), Some(date(2024, 7, 10))),
    ];

    let aggregate =
        AggregateFlags::collect(&periods, date(2024, 6, 1), &classifier_config());
    assert!(aggregate.any_current_approval);
    assert!(aggregate.any_active_process);
    assert!(!aggregate.any_expired_approval);
    assert!(!aggregate.any_grace_period);
}

#[test]
fn career_with_current_approval_and_running_process_reads_in_reaccreditation() {
    let periods = vec![
        approved_period(1, date(2019, 8, 1), date(2024, 8, 1)),
        process_period(2, date(2024, 1, 10), Some(date(2024, 7, 10))),
    ];

    let label = classifier().classify(&periods, date(2024, 6, 1));
    assert_eq!(label, StatusLabel::InReaccreditation);
}

#[test]
fn career_with_only_current_approval_reads_accredited() {
    let periods = vec![approved_period(1, date(2019, 8, 1), date(2024, 8, 1))];

    let label = classifier().classify(&periods, date(2022, 3, 15));
    assert_eq!(label, StatusLabel::Accredited);
}

#[test]
fn expired_certificate_within_grace_reads_in_reaccreditation() {
    let periods = vec![approved_period(1, date(2015, 1, 1), date(2020, 1, 1))];

    let label = classifier().classify(&periods, date(2021, 6, 1));
    assert_eq!(label, StatusLabel::InReaccreditation);
}

#[test]
fn expired_certificate_with_new_process_reads_in_reaccreditation_beyond_grace() {
    let periods = vec![
        approved_period(1, date(2010, 1, 1), date(2015, 1, 1)),
        process_period(2, date(2024, 1, 10), Some(date(2024, 7, 10))),
    ];

    let label = classifier().classify(&periods, date(2024, 6, 1));
    assert_eq!(label, StatusLabel::InReaccreditation);
}

#[test]
fn process_only_career_reads_in_process() {
    let periods = vec![process_period(1, date(2024, 1, 10), Some(date(2024, 7, 10)))];

    let label = classifier().classify(&periods, date(2024, 6, 1));
    assert_eq!(label, StatusLabel::InProcess);
}

#[test]
fn future_process_does_not_count_until_it_starts() {
    let periods = vec![
        approved_period(1, date(2020, 8, 1), date(2026, 8, 1)),
        process_period(2, date(2025, 1, 1), Some(date(2025, 7, 1))),
    ];

    let label = classifier().classify(&periods, date(2024, 6, 1));
    assert_eq!(label, StatusLabel::Accredited);
}

#[test]
fn empty_history_reads_not_accredited() {
    let label = classifier().classify(&[], date(2024, 6, 1));
    assert_eq!(label, StatusLabel::NotAccredited);
}

#[test]
fn expired_beyond_grace_shows_per_period_but_not_career_level() {
    let period = approved_period(1, date(2013, 1, 1), date(2018, 1, 1));
    let reference = date(2021, 1, 1);
    let classifier = classifier();

    assert_eq!(
        classifier.classify_period(&period, reference),
        StatusLabel::Expired
    );
    assert_eq!(
        classifier.classify(&[period], reference),
        StatusLabel::NotAccredited
    );
}

#[test]
fn period_in_grace_reads_in_reaccreditation_not_expired() {
    let period = approved_period(1, date(2015, 1, 1), date(2020, 1, 1));

    let label = classifier().classify_period(&period, date(2021, 6, 1));
    assert_eq!(label, StatusLabel::InReaccreditation);
}

#[test]
fn status_pairs_label_with_selected_period() {
    let current = approved_period(1, date(2019, 8, 1), date(2024, 8, 1));
    let running = process_period(2, date(2024, 1, 10), Some(date(2024, 7, 10)));
    let periods = vec![running, current.clone()];

    let result = classifier().status(&periods, date(2024, 6, 1));
    assert_eq!(result.label, StatusLabel::InReaccreditation);
    assert_eq!(result.active_period, Some(current));
}

#[test]
fn status_without_candidates_has_no_active_period() {
    let periods = vec![approved_period(1, date(2013, 1, 1), date(2018, 1, 1))];

    let result = classifier().status(&periods, date(2021, 1, 1));
    assert_eq!(result.label, StatusLabel::NotAccredited);
    assert_eq!(result.active_period, None);
}

#[test]
fn spanish_labels_match_registrar_vocabulary() {
    assert_eq!(StatusLabel::Accredited.label(), "Acreditada");
    assert_eq!(StatusLabel::InProcess.label(), "En Proceso");
    assert_eq!(StatusLabel::InReaccreditation.label(), "En Reacreditación");
    assert_eq!(StatusLabel::Expired.label(), "Vencida");
    assert_eq!(StatusLabel::NotAccredited.label(), "No Acreditada");
}
