use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use acredita::workflows::accreditation::domain::{
    AccreditationPeriod, CareerId, CareerSnapshot, FacultyId, FacultySnapshot, ModalityId,
    ModalitySnapshot, NewPeriod, PeriodId,
};
use acredita::workflows::accreditation::{PeriodStore, RosterRow, StoreError};
use chrono::{Months, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory-backed period store for serving and demos.
///
/// Faculties, careers, and modalities are registered by name; roster
/// uploads replace the whole directory in one swap.
#[derive(Default)]
pub(crate) struct InMemoryPeriodStore {
    inner: Mutex<Directory>,
}

#[derive(Default)]
struct Directory {
    faculties: Vec<FacultySnapshot>,
    modalities: Vec<ModalitySnapshot>,
    periods: Vec<AccreditationPeriod>,
}

impl Directory {
    fn career_id(&mut self, faculty_name: &str, career_name: &str) -> CareerId {
        let next_career = CareerId(
            self.faculties
                .iter()
                .map(|faculty| faculty.careers.len() as u64)
                .sum::<u64>()
                + 1,
        );

        let index = match self
            .faculties
            .iter()
            .position(|faculty| faculty.name == faculty_name)
        {
            Some(index) => index,
            None => {
                let id = FacultyId(self.faculties.len() as u64 + 1);
                self.faculties.push(FacultySnapshot {
                    id,
                    name: faculty_name.to_string(),
                    careers: Vec::new(),
                });
                self.faculties.len() - 1
            }
        };
        let faculty = &mut self.faculties[index];

        match faculty
            .careers
            .iter()
            .find(|career| career.name == career_name)
        {
            Some(career) => career.id,
            None => {
                faculty.careers.push(CareerSnapshot {
                    id: next_career,
                    name: career_name.to_string(),
                });
                next_career
            }
        }
    }

    fn modality_id(&mut self, name: &str) -> ModalityId {
        match self
            .modalities
            .iter()
            .find(|modality| modality.name == name)
        {
            Some(modality) => modality.id,
            None => {
                let id = ModalityId(self.modalities.len() as u64 + 1);
                self.modalities.push(ModalitySnapshot {
                    id,
                    name: name.to_string(),
                });
                id
            }
        }
    }

    fn career_known(&self, career: CareerId) -> bool {
        self.faculties
            .iter()
            .any(|faculty| faculty.careers.iter().any(|entry| entry.id == career))
    }

    fn modality_known(&self, modality: ModalityId) -> bool {
        self.modalities.iter().any(|entry| entry.id == modality)
    }

    fn next_period_id(&self) -> PeriodId {
        PeriodId(
            self.periods
                .iter()
                .map(|period| period.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        )
    }
}

impl InMemoryPeriodStore {
    pub(crate) fn from_roster(rows: &[RosterRow]) -> Self {
        let store = Self::default();
        store.replace_roster(rows);
        store
    }

    /// Swap the directory and its periods for the roster contents.
    pub(crate) fn replace_roster(&self, rows: &[RosterRow]) {
        let mut fresh = Directory::default();
        for row in rows {
            let career = fresh.career_id(&row.faculty, &row.career);
            let modality = fresh.modality_id(&row.modality);
            let id = fresh.next_period_id();
            fresh.periods.push(AccreditationPeriod {
                id,
                career,
                modality,
                process_start: row.process_start,
                process_end: row.process_end,
                approval_start: row.approval_start,
                approval_end: row.approval_end,
                accredited: row.accredited,
            });
        }

        *self.inner.lock().expect("store mutex poisoned") = fresh;
    }

    /// Small three-career directory with one label of each kind, anchored
    /// to `today` so demos stay current.
    pub(crate) fn seed_demo(today: NaiveDate) -> Self {
        let store = Self::default();
        {
            let mut directory = store.inner.lock().expect("store mutex poisoned");

            let systems = directory.career_id("Facultad de Tecnología", "Ingeniería de Sistemas");
            let industrial =
                directory.career_id("Facultad de Tecnología", "Ingeniería Industrial");
            let medicine = directory.career_id("Facultad de Medicina", "Medicina");
            let ceub = directory.modality_id("CEUB");
            let arcusur = directory.modality_id("ARCUSUR");

            let rows = [
                // Certificate in force, renewal evaluation already running.
                (systems, ceub, Some((-40, -35)), Some((-34, 38)), true),
                (systems, arcusur, Some((-2, 4)), None, false),
                // First evaluation in flight.
                (industrial, ceub, Some((-1, 5)), None, false),
                // Certificate expired beyond the grace period.
                (medicine, ceub, Some((-100, -95)), Some((-94, -34)), true),
            ];

            for (career, modality, process, approval, accredited) in rows {
                let id = directory.next_period_id();
                directory.periods.push(AccreditationPeriod {
                    id,
                    career,
                    modality,
                    process_start: process.map(|(start, _)| shift(today, start)),
                    process_end: process.map(|(_, end)| shift(today, end)),
                    approval_start: approval.map(|(start, _)| shift(today, start)),
                    approval_end: approval.map(|(_, end)| shift(today, end)),
                    accredited,
                });
            }
        }
        store
    }

    pub(crate) fn faculty_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").faculties.len()
    }

    pub(crate) fn modalities(&self) -> Vec<ModalitySnapshot> {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .modalities
            .clone()
    }
}

impl PeriodStore for InMemoryPeriodStore {
    fn faculties(&self) -> Result<Vec<FacultySnapshot>, StoreError> {
        Ok(self
            .inner
            .lock()
            .expect("store mutex poisoned")
            .faculties
            .clone())
    }

    fn career_periods(
        &self,
        career: CareerId,
        standard: Option<&str>,
    ) -> Result<Vec<AccreditationPeriod>, StoreError> {
        let directory = self.inner.lock().expect("store mutex poisoned");
        if !directory.career_known(career) {
            return Err(StoreError::NotFound);
        }

        let allowed: Option<Vec<ModalityId>> = standard.map(|needle| {
            let needle = needle.to_lowercase();
            directory
                .modalities
                .iter()
                .filter(|entry| entry.name.to_lowercase().contains(&needle))
                .map(|entry| entry.id)
                .collect()
        });

        Ok(directory
            .periods
            .iter()
            .filter(|period| period.career == career)
            .filter(|period| match &allowed {
                Some(ids) => ids.contains(&period.modality),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn pair_periods(
        &self,
        career: CareerId,
        modality: ModalityId,
    ) -> Result<Vec<AccreditationPeriod>, StoreError> {
        let directory = self.inner.lock().expect("store mutex poisoned");
        if !directory.career_known(career) || !directory.modality_known(modality) {
            return Err(StoreError::NotFound);
        }

        Ok(directory
            .periods
            .iter()
            .filter(|period| period.career == career && period.modality == modality)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: PeriodId) -> Result<Option<AccreditationPeriod>, StoreError> {
        let directory = self.inner.lock().expect("store mutex poisoned");
        Ok(directory
            .periods
            .iter()
            .find(|period| period.id == id)
            .cloned())
    }

    fn insert(&self, period: NewPeriod) -> Result<AccreditationPeriod, StoreError> {
        let mut directory = self.inner.lock().expect("store mutex poisoned");
        if !directory.career_known(period.career) || !directory.modality_known(period.modality) {
            return Err(StoreError::NotFound);
        }

        let duplicate = directory.periods.iter().any(|existing| {
            existing.career == period.career
                && existing.modality == period.modality
                && existing.process_start == Some(period.process.start())
        });
        if duplicate {
            return Err(StoreError::Conflict);
        }

        let stored = AccreditationPeriod {
            id: directory.next_period_id(),
            career: period.career,
            modality: period.modality,
            process_start: Some(period.process.start()),
            process_end: Some(period.process.end()),
            approval_start: None,
            approval_end: None,
            accredited: false,
        };
        directory.periods.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, period: AccreditationPeriod) -> Result<(), StoreError> {
        let mut directory = self.inner.lock().expect("store mutex poisoned");
        match directory
            .periods
            .iter_mut()
            .find(|existing| existing.id == period.id)
        {
            Some(existing) => {
                *existing = period;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

fn shift(today: NaiveDate, months: i32) -> NaiveDate {
    let span = Months::new(months.unsigned_abs());
    if months >= 0 {
        today.checked_add_months(span).unwrap_or(today)
    } else {
        today.checked_sub_months(span).unwrap_or(today)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use acredita::workflows::accreditation::domain::DateWindow;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn roster_row(faculty: &str, career: &str, modality: &str) -> RosterRow {
        RosterRow {
            faculty: faculty.to_string(),
            career: career.to_string(),
            modality: modality.to_string(),
            process_start: Some(date(2024, 1, 10)),
            process_end: Some(date(2024, 7, 10)),
            approval_start: None,
            approval_end: None,
            accredited: false,
        }
    }

    #[test]
    fn roster_rows_register_directory_entries_by_name() {
        let rows = vec![
            roster_row("Facultad de Tecnología", "Ingeniería de Sistemas", "CEUB"),
            roster_row("Facultad de Tecnología", "Ingeniería Industrial", "CEUB"),
            roster_row("Facultad de Medicina", "Medicina", "ARCUSUR"),
        ];

        let store = InMemoryPeriodStore::from_roster(&rows);
        let faculties = store.faculties().expect("faculties");
        assert_eq!(faculties.len(), 2);
        assert_eq!(faculties[0].careers.len(), 2);
        assert_eq!(faculties[1].careers[0].name, "Medicina");
        assert_eq!(store.modalities().len(), 2);
    }

    #[test]
    fn repeated_roster_names_reuse_the_same_ids() {
        let rows = vec![
            roster_row("Facultad de Tecnología", "Ingeniería de Sistemas", "CEUB"),
            roster_row("Facultad de Tecnología", "Ingeniería de Sistemas", "CEUB"),
        ];

        let store = InMemoryPeriodStore::from_roster(&rows);
        let faculties = store.faculties().expect("faculties");
        assert_eq!(faculties[0].careers.len(), 1);

        let career = faculties[0].careers[0].id;
        let periods = store.career_periods(career, None).expect("periods");
        assert_eq!(periods.len(), 2);
        assert_ne!(periods[0].id, periods[1].id);
    }

    #[test]
    fn replace_roster_discards_the_previous_directory() {
        let store = InMemoryPeriodStore::from_roster(&[roster_row(
            "Facultad de Tecnología",
            "Ingeniería de Sistemas",
            "CEUB",
        )]);

        store.replace_roster(&[roster_row("Facultad de Medicina", "Medicina", "ARCUSUR")]);

        let faculties = store.faculties().expect("faculties");
        assert_eq!(faculties.len(), 1);
        assert_eq!(faculties[0].name, "Facultad de Medicina");
    }

    #[test]
    fn insert_rejects_unknown_careers_and_duplicate_starts() {
        let store = InMemoryPeriodStore::from_roster(&[roster_row(
            "Facultad de Tecnología",
            "Ingeniería de Sistemas",
            "CEUB",
        )]);
        let faculties = store.faculties().expect("faculties");
        let career = faculties[0].careers[0].id;
        let modality = store.modalities()[0].id;

        let window = DateWindow::new(date(2025, 1, 10), date(2025, 7, 10)).expect("valid window");
        store
            .insert(NewPeriod {
                career,
                modality,
                process: window,
            })
            .expect("fresh window inserts");

        let duplicate = store
            .insert(NewPeriod {
                career,
                modality,
                process: window,
            })
            .expect_err("duplicate start rejected");
        assert!(matches!(duplicate, StoreError::Conflict));

        let unknown = store
            .insert(NewPeriod {
                career: CareerId(99),
                modality,
                process: window,
            })
            .expect_err("unknown career rejected");
        assert!(matches!(unknown, StoreError::NotFound));
    }

    #[test]
    fn seed_demo_builds_a_directory_around_the_reference_date() {
        let today = date(2024, 6, 1);
        let store = InMemoryPeriodStore::seed_demo(today);
        let faculties = store.faculties().expect("faculties");
        assert_eq!(faculties.len(), 2);

        let systems = faculties[0].careers[0].id;
        let periods = store.career_periods(systems, None).expect("periods");
        assert_eq!(periods.len(), 2);
        assert!(periods[0].accredited);
        assert!(periods[0].approval_end.expect("approval end") > today);
    }

    #[test]
    fn standard_filter_narrows_to_matching_modalities() {
        let mut ceub = roster_row("Facultad de Tecnología", "Ingeniería de Sistemas", "CEUB");
        ceub.accredited = true;
        let arcusur = roster_row("Facultad de Tecnología", "Ingeniería de Sistemas", "ARCUSUR");

        let store = InMemoryPeriodStore::from_roster(&[ceub, arcusur]);
        let career = store.faculties().expect("faculties")[0].careers[0].id;

        let filtered = store
            .career_periods(career, Some("arcusur"))
            .expect("filtered periods");
        assert_eq!(filtered.len(), 1);
        assert!(!filtered[0].accredited);
    }
}
