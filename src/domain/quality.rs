use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct QualityScore {
    pub batch_id: String,
    pub timestamp: NaiveDateTime,
    pub score: f64,
}

/// Quality scores ordered by timestamp, oldest first.
///
/// The analyzer trusts this ordering and never re-sorts; building the series
/// in chronological order is up to whoever loads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityScoreSeries {
    pub entries: Vec<QualityScore>,
}

impl QualityScoreSeries {
    pub fn new(entries: Vec<QualityScore>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|entry| entry.score)
    }
}
