//! Working copy of a record under edit, paired with the snapshot it started from.

use crate::models::metadata::{MetadataRecord, MetadataUpdate};
use crate::services::display::{
    DisplayError, join_publication, normalize_publication, parse_authors, parse_feeds,
    split_publication,
};
use serde::{Deserialize, Serialize};

/// Form fields for one record. The publication datetime is split into date and
/// time for the duration of the edit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditForm {
    pub id: i64,
    pub title: String,
    pub publication_date: String,
    pub publication_time: String,
    pub image_url: String,
    pub feeds: String,
    pub authors: String,
    pub active: String,
}

/// Fields of [`EditForm`] addressable by name from the command surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Title,
    Date,
    Time,
    ImageUrl,
    Feeds,
    Authors,
}

impl EditField {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "image" | "image-url" | "imageurl" => Some(Self::ImageUrl),
            "feeds" => Some(Self::Feeds),
            "authors" => Some(Self::Authors),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EditBuffer {
    pub form: EditForm,
    snapshot: MetadataRecord,
}

impl EditBuffer {
    /// Start editing `record`.
    pub fn begin(record: &MetadataRecord) -> Self {
        let (date, time) = split_publication(&record.publication_date);
        Self {
            form: EditForm {
                id: record.id,
                title: record.title.clone(),
                publication_date: date,
                publication_time: time,
                image_url: record.image_url.clone(),
                feeds: record.feeds.clone(),
                authors: record.authors.clone(),
                active: record.active.clone(),
            },
            snapshot: record.clone(),
        }
    }

    pub fn snapshot(&self) -> &MetadataRecord {
        &self.snapshot
    }

    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EditField::Title => self.form.title = value,
            EditField::Date => self.form.publication_date = value,
            EditField::Time => self.form.publication_time = value,
            EditField::ImageUrl => self.form.image_url = value,
            EditField::Feeds => self.form.feeds = value,
            EditField::Authors => self.form.authors = value,
        }
    }

    /// The form folded back into a single record. The form itself is left as is.
    pub fn rejoined(&self) -> MetadataRecord {
        MetadataRecord {
            id: self.form.id,
            title: self.form.title.clone(),
            publication_date: join_publication(
                &self.form.publication_date,
                &self.form.publication_time,
            ),
            image_url: self.form.image_url.clone(),
            feeds: self.form.feeds.clone(),
            authors: self.form.authors.clone(),
            active: self.form.active.clone(),
        }
    }

    /// Whether the rejoined form differs from the snapshot.
    ///
    /// The snapshot's publication date is compared at the minute precision the
    /// form can express.
    pub fn has_changes(&self) -> bool {
        let baseline = MetadataRecord {
            publication_date: normalize_publication(&self.snapshot.publication_date),
            ..self.snapshot.clone()
        };
        self.rejoined() != baseline
    }

    /// Build the update body, parsing the text-held lists.
    pub fn to_update(&self) -> Result<MetadataUpdate, DisplayError> {
        let record = self.rejoined();
        let feeds = parse_feeds(&record.feeds)?;
        let authors = parse_authors(&record.authors)?;
        Ok(MetadataUpdate {
            id: record.id,
            title: record.title,
            publication_date: record.publication_date,
            image_url: record.image_url,
            feeds,
            authors,
            active: record.active,
        })
    }
}
