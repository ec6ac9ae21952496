use serde::{Deserialize, Serialize};

/// A single job record as the backing store keeps it.
/// The `date` field holds the storage form `MM/DD/YYYY` and may be
/// empty or malformed; such jobs exist in lists but never appear in
/// date-derived views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub completed: bool,
}

impl Job {
    pub fn new<S: Into<String>>(id: S) -> Job {
        Job {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            info: String::new(),
            date: String::new(),
            price: String::new(),
            completed: false,
        }
    }
}

/// Partial update shape for [`JobStore::update_job`](crate::board::JobStore::update_job).
/// Only the set fields are written; everything else keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub info: Option<String>,
    pub date: Option<String>,
    pub price: Option<String>,
    pub completed: Option<bool>,
}

impl JobPatch {
    pub fn completed(value: bool) -> JobPatch {
        JobPatch {
            completed: Some(value),
            ..JobPatch::default()
        }
    }

    /// Applies the set fields of this patch onto a stored record.
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(v) = &self.name {
            job.name = v.clone();
        }
        if let Some(v) = &self.email {
            job.email = v.clone();
        }
        if let Some(v) = &self.phone {
            job.phone = v.clone();
        }
        if let Some(v) = &self.address {
            job.address = v.clone();
        }
        if let Some(v) = &self.info {
            job.info = v.clone();
        }
        if let Some(v) = &self.date {
            job.date = v.clone();
        }
        if let Some(v) = &self.price {
            job.price = v.clone();
        }
        if let Some(v) = self.completed {
            job.completed = v;
        }
    }
}
