// Appointment sources
// The data-access collaborator the engine consumes, plus in-memory and JSON file implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Error as SerdeError;

use crate::models::appointment::Appointment;
use crate::models::period::DateRange;

/// Supplies appointments for a period.
///
/// The range is only a hint so implementations can avoid over-fetching; the engine performs its
/// own per-day selection and tolerates extra records.
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentSource {
    fn fetch_appointments(&self, hint: DateRange) -> Result<Vec<Appointment>>;
}

/// Appointments held in memory, filtered by the hint where dates parse
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    appointments: Vec<Appointment>,
}

impl InMemorySource {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    pub fn push(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

impl AppointmentSource for InMemorySource {
    fn fetch_appointments(&self, hint: DateRange) -> Result<Vec<Appointment>> {
        // Unparsable dates are passed through so the layout pass can report them
        Ok(self
            .appointments
            .iter()
            .filter(|appt| appt.parse_date().map_or(true, |date| hint.contains(date)))
            .cloned()
            .collect())
    }
}

/// JSON array of appointments on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every appointment in the file
    pub fn load_all(&self) -> Result<Vec<Appointment>> {
        load_appointments(&self.path)
    }
}

impl AppointmentSource for JsonFileSource {
    fn fetch_appointments(&self, hint: DateRange) -> Result<Vec<Appointment>> {
        let all = self.load_all()?;
        let total = all.len();
        let matching = InMemorySource::new(all).fetch_appointments(hint)?;
        log::debug!(
            "Loaded {} of {} appointments from {} for {} to {}",
            matching.len(),
            total,
            self.path.display(),
            hint.start,
            hint.end
        );
        Ok(matching)
    }
}

pub fn load_appointments(path: &Path) -> Result<Vec<Appointment>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read appointments from {}", path.display()))?;
    let appointments = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(appointments)
}

pub fn save_appointments(path: &Path, appointments: &[Appointment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(appointments)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write appointments to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize appointments from {}",
        path.display()
    ))
}
