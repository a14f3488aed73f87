use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::accreditation::classifier::{ClassifierConfig, StatusClassifier};
use crate::workflows::accreditation::domain::{
    AccreditationPeriod, CareerId, CareerSnapshot, FacultyId, FacultySnapshot, ModalityId,
    ModalitySnapshot, NewPeriod, PeriodId,
};
use crate::workflows::accreditation::repository::{PeriodStore, StoreError};
use crate::workflows::accreditation::{accreditation_router, AccreditationService};

pub(super) const SYSTEMS: CareerId = CareerId(1);
pub(super) const INDUSTRIAL: CareerId = CareerId(2);
pub(super) const MEDICINE: CareerId = CareerId(3);

pub(super) const CEUB: ModalityId = ModalityId(1);
pub(super) const ARCUSUR: ModalityId = ModalityId(2);

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn classifier_config() -> ClassifierConfig {
    ClassifierConfig {
        grace_months: 24,
        default_process_months: 6,
    }
}

pub(super) fn classifier() -> StatusClassifier {
    StatusClassifier::new(classifier_config())
}

pub(super) fn bare_period(id: u64) -> AccreditationPeriod {
    AccreditationPeriod {
        id: PeriodId(id),
        career: SYSTEMS,
        modality: CEUB,
        process_start: None,
        process_end: None,
        approval_start: None,
        approval_end: None,
        accredited: false,
    }
}

/// Accredited cycle with a recorded certificate window.
pub(super) fn approved_period(id: u64, start: NaiveDate, end: NaiveDate) -> AccreditationPeriod {
    let mut period = bare_period(id);
    period.approval_start = Some(start);
    period.approval_end = Some(end);
    period.accredited = true;
    period
}

/// Cycle with only an evaluation window; `end` absent means open-ended.
pub(super) fn process_period(
    id: u64,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> AccreditationPeriod {
    let mut period = bare_period(id);
    period.process_start = Some(start);
    period.process_end = end;
    period
}

pub(super) fn build_service() -> (AccreditationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_directory());
    let service = AccreditationService::new(store.clone(), classifier_config());
    (service, store)
}

pub(super) fn accreditation_router_with_service(
    service: AccreditationService<MemoryStore>,
) -> axum::Router {
    accreditation_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 65_536)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default)]
pub(super) struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    faculties: Vec<FacultySnapshot>,
    modalities: Vec<ModalitySnapshot>,
    periods: Vec<AccreditationPeriod>,
}

impl MemoryStore {
    /// Small directory: two faculties, three careers, two modalities.
    pub(super) fn with_directory() -> Self {
        let store = Self::default();
        {
            let mut guard = store.inner.lock().expect("store mutex poisoned");
            guard.faculties = vec![
                FacultySnapshot {
                    id: FacultyId(1),
                    name: "Facultad de Tecnología".to_string(),
                    careers: vec![
                        CareerSnapshot {
                            id: SYSTEMS,
                            name: "Ingeniería de Sistemas".to_string(),
                        },
                        CareerSnapshot {
                            id: INDUSTRIAL,
                            name: "Ingeniería Industrial".to_string(),
                        },
                    ],
                },
                FacultySnapshot {
                    id: FacultyId(2),
                    name: "Facultad de Medicina".to_string(),
                    careers: vec![CareerSnapshot {
                        id: MEDICINE,
                        name: "Medicina".to_string(),
                    }],
                },
            ];
            guard.modalities = vec![
                ModalitySnapshot {
                    id: CEUB,
                    name: "CEUB".to_string(),
                },
                ModalitySnapshot {
                    id: ARCUSUR,
                    name: "ARCUSUR".to_string(),
                },
            ];
        }
        store
    }

    pub(super) fn push_period(&self, period: AccreditationPeriod) {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .periods
            .push(period);
    }

    pub(super) fn periods(&self) -> Vec<AccreditationPeriod> {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .periods
            .clone()
    }
}

impl MemoryStoreInner {
    fn career_known(&self, career: CareerId) -> bool {
        self.faculties
            .iter()
            .any(|faculty| faculty.careers.iter().any(|entry| entry.id == career))
    }

    fn modality_known(&self, modality: ModalityId) -> bool {
        self.modalities.iter().any(|entry| entry.id == modality)
    }

    fn matching_modalities(&self, standard: &str) -> Vec<ModalityId> {
        let needle = standard.to_lowercase();
        self.modalities
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .map(|entry| entry.id)
            .collect()
    }
}

impl PeriodStore for MemoryStore {
    fn faculties(&self) -> Result<Vec<FacultySnapshot>, StoreError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.faculties.clone())
    }

    fn career_periods(
        &self,
        career: CareerId,
        standard: Option<&str>,
    ) -> Result<Vec<AccreditationPeriod>, StoreError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.career_known(career) {
            return Err(StoreError::NotFound);
        }

        let modalities = standard.map(|value| guard.matching_modalities(value));
        Ok(guard
            .periods
            .iter()
            .filter(|period| period.career == career)
            .filter(|period| match &modalities {
                Some(allowed) => allowed.contains(&period.modality),
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
        let guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.career_known(career) || !guard.modality_known(modality) {
            return Err(StoreError::NotFound);
        }

        Ok(guard
            .periods
            .iter()
            .filter(|period| period.career == career && period.modality == modality)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: PeriodId) -> Result<Option<AccreditationPeriod>, StoreError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.periods.iter().find(|period| period.id == id).cloned())
    }

    fn insert(&self, period: NewPeriod) -> Result<AccreditationPeriod, StoreError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.career_known(period.career) || !guard.modality_known(period.modality) {
            return Err(StoreError::NotFound);
        }

        let duplicate = guard.periods.iter().any(|existing| {
            existing.career == period.career
                && existing.modality == period.modality
                && existing.process_start == Some(period.process.start())
        });
        if duplicate {
            return Err(StoreError::Conflict);
        }

        let next = guard
            .periods
            .iter()
            .map(|existing| existing.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let stored = AccreditationPeriod {
            id: PeriodId(next),
            career: period.career,
            modality: period.modality,
            process_start: Some(period.process.start()),
            process_end: Some(period.process.end()),
            approval_start: None,
            approval_end: None,
            accredited: false,
        };
        guard.periods.push(stored.clone());
        Ok(stored)
    }

    fn update(&self, period: AccreditationPeriod) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        match guard
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

pub(super) struct UnavailableStore;

impl PeriodStore for UnavailableStore {
    fn faculties(&self) -> Result<Vec<FacultySnapshot>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn career_periods(
        &self,
        _career: CareerId,
        _standard: Option<&str>,
    ) -> Result<Vec<AccreditationPeriod>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn pair_periods(
        &self,
        _career: CareerId,
        _modality: ModalityId,
    ) -> Result<Vec<AccreditationPeriod>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: PeriodId) -> Result<Option<AccreditationPeriod>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _period: NewPeriod) -> Result<AccreditationPeriod, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _period: AccreditationPeriod) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
