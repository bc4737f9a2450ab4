use parking_lot::Mutex;

use crate::domain::TrainingExample;

/// Append-only record of labelled examples for the life of one scorer.
#[derive(Debug, Default)]
pub struct TrainingLog {
    examples: Mutex<Vec<TrainingExample>>,
}

impl TrainingLog {
    /// Pairs `texts` with `labels`; the shorter list bounds the count.
    pub fn append(&self, texts: &[String], labels: &[String]) -> Vec<TrainingExample> {
        let added: Vec<TrainingExample> = texts
            .iter()
            .zip(labels)
            .map(|(text, label)| TrainingExample::new(text.as_str(), label.as_str()))
            .collect();
        self.examples.lock().extend(added.iter().cloned());
        added
    }

    pub fn len(&self) -> usize {
        self.examples.lock().len()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Vec<TrainingExample> {
        self.examples.lock().clone()
    }
}
