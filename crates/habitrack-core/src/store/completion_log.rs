//! Completion records keyed by `(habit_id, date)`.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::habit::Completion;

/// Insertion-ordered set of completion records.
///
/// At most one record exists per `(habit_id, date)`. Toggling an existing
/// key flips `completed` in place; records are only removed together with
/// their habit.
#[derive(Debug, Clone)]
pub struct CompletionLog {
    records: IndexMap<(i64, NaiveDate), Completion>,
    next_id: i64,
}

impl Default for CompletionLog {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl CompletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from stored records, keeping their order and ids.
    ///
    /// `next_id` is the persisted id counter; it is raised past the highest
    /// stored id if needed.
    pub fn from_records<I>(records: I, next_id: i64) -> Self
    where
        I: IntoIterator<Item = Completion>,
    {
        let mut log = Self {
            records: IndexMap::new(),
            next_id: next_id.max(1),
        };
        for record in records {
            log.next_id = log.next_id.max(record.id + 1);
            log.records.insert((record.habit_id, record.date), record);
        }
        log
    }

    /// Records matching both filters, in insertion order. `None` matches all.
    pub fn get(&self, habit_id: Option<i64>, date: Option<NaiveDate>) -> Vec<Completion> {
        self.records
            .values()
            .filter(|c| habit_id.map_or(true, |id| c.habit_id == id))
            .filter(|c| date.map_or(true, |d| c.date == d))
            .cloned()
            .collect()
    }

    pub fn find(&self, habit_id: i64, date: NaiveDate) -> Option<&Completion> {
        self.records.get(&(habit_id, date))
    }

    /// Create the record as completed, or flip an existing one.
    pub fn toggle(&mut self, habit_id: i64, date: NaiveDate) -> Completion {
        if let Some(existing) = self.records.get_mut(&(habit_id, date)) {
            existing.completed = !existing.completed;
            return existing.clone();
        }

        let completion = Completion {
            id: self.next_id,
            habit_id,
            date,
            completed: true,
        };
        self.next_id += 1;
        self.records.insert((habit_id, date), completion.clone());
        completion
    }

    /// Remove every record of `habit_id`. Returns how many were removed.
    pub fn delete_by_habit(&mut self, habit_id: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|(id, _), _| *id != habit_id);
        before - self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Completion> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next new record will receive.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn first_toggle_creates_completed_record() {
        let mut log = CompletionLog::new();
        let c = log.toggle(1, date(3));
        assert_eq!(c.id, 1);
        assert!(c.completed);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn second_toggle_flips_in_place() {
        let mut log = CompletionLog::new();
        let first = log.toggle(1, date(3));
        let second = log.toggle(1, date(3));
        assert_eq!(first.id, second.id);
        assert!(!second.completed);
        assert_eq!(log.len(), 1);

        let third = log.toggle(1, date(3));
        assert!(third.completed);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn get_filters_by_habit_and_date() {
        let mut log = CompletionLog::new();
        log.toggle(1, date(1));
        log.toggle(2, date(1));
        log.toggle(1, date(2));

        assert_eq!(log.get(None, None).len(), 3);
        assert_eq!(log.get(Some(1), None).len(), 2);
        assert_eq!(log.get(None, Some(date(1))).len(), 2);
        assert_eq!(log.get(Some(2), Some(date(2))).len(), 0);
    }

    #[test]
    fn get_keeps_insertion_order() {
        let mut log = CompletionLog::new();
        log.toggle(1, date(9));
        log.toggle(1, date(2));
        log.toggle(1, date(5));
        let dates: Vec<NaiveDate> = log.get(Some(1), None).iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(9), date(2), date(5)]);
    }

    #[test]
    fn delete_by_habit_only_touches_that_habit() {
        let mut log = CompletionLog::new();
        log.toggle(1, date(1));
        log.toggle(2, date(1));
        log.toggle(1, date(2));

        assert_eq!(log.delete_by_habit(1), 2);
        assert!(log.get(Some(1), None).is_empty());
        assert_eq!(log.get(Some(2), None).len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut log = CompletionLog::new();
        log.toggle(1, date(1));
        log.delete_by_habit(1);
        assert_eq!(log.toggle(2, date(1)).id, 2);
    }

    #[test]
    fn from_records_resumes_id_sequence() {
        let records = vec![
            Completion {
                id: 4,
                habit_id: 1,
                date: date(1),
                completed: true,
            },
            Completion {
                id: 9,
                habit_id: 1,
                date: date(2),
                completed: false,
            },
        ];
        let log = CompletionLog::from_records(records, 1);
        assert_eq!(log.next_id(), 10);
        assert_eq!(CompletionLog::from_records(Vec::new(), 15).next_id(), 15);
        assert!(!log.find(1, date(2)).unwrap().completed);
    }
}
