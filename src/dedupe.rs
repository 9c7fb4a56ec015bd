use crate::types::BusinessRecord;
use std::collections::HashSet;
use tracing::debug;

/// Case-folded, trimmed, internal whitespace collapsed.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Digits only, so formatting differences never split a business.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Accumulator for one pipeline run: the accepted records plus the
/// identity keys already seen. First-seen wins; later duplicates are
/// dropped without merging. Passed by reference through the pipeline,
/// torn down (exported) at run end.
#[derive(Debug, Default)]
pub struct RunState {
    records: Vec<BusinessRecord>,
    seen_external: HashSet<String>,
    seen_name_phone: HashSet<(String, String)>,
    targets_processed: usize,
    duplicates_dropped: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the seen-key sets from records accepted in an earlier
    /// run (resume from a checkpoint file).
    pub fn preload(records: Vec<BusinessRecord>) -> Self {
        let mut state = Self::new();
        for record in records {
            state.offer(record);
        }
        state
    }

    fn name_phone_key(record: &BusinessRecord) -> (String, String) {
        (
            normalize_name(&record.name),
            record.phone.as_deref().map(normalize_phone).unwrap_or_default(),
        )
    }

    /// True when this external id was already accepted; used to skip
    /// redundant detail lookups before a record is even built.
    pub fn has_external_id(&self, external_id: &str) -> bool {
        self.seen_external.contains(external_id)
    }

    /// Offer one candidate record. Returns true if it was accepted,
    /// false if it duplicated an earlier one.
    pub fn offer(&mut self, record: BusinessRecord) -> bool {
        if record.name.trim().is_empty() {
            return false;
        }

        if let Some(id) = &record.external_id {
            if self.seen_external.contains(id) {
                self.duplicates_dropped += 1;
                return false;
            }
        }
        let key = Self::name_phone_key(&record);
        if self.seen_name_phone.contains(&key) {
            // Remember the id anyway so later pages skip its detail lookup.
            if let Some(id) = &record.external_id {
                self.seen_external.insert(id.clone());
            }
            self.duplicates_dropped += 1;
            debug!(name = %record.name, "Dropped duplicate record");
            return false;
        }

        if let Some(id) = &record.external_id {
            self.seen_external.insert(id.clone());
        }
        self.seen_name_phone.insert(key);
        self.records.push(record);
        true
    }

    /// Mark one target as fully processed. Returns true when a
    /// checkpoint is due.
    pub fn target_done(&mut self, checkpoint_every: usize) -> bool {
        self.targets_processed += 1;
        checkpoint_every > 0 && self.targets_processed % checkpoint_every == 0
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BusinessRecord> {
        self.records
    }

    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    pub fn targets_processed(&self) -> usize {
        self.targets_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, phone: Option<&str>) -> BusinessRecord {
        BusinessRecord {
            source: "infobel".to_string(),
            name: name.to_string(),
            phone: phone.map(|p| p.to_string()),
            locality: "Vigo".to_string(),
            ..BusinessRecord::default()
        }
    }

    #[test]
    fn normalization_folds_case_and_whitespace() {
        assert_eq!(normalize_name("ACME  SL "), normalize_name("Acme SL"));
        assert_eq!(normalize_phone("981-123-456"), "981123456");
        assert_eq!(normalize_phone("981 123 456"), normalize_phone("981.123.456"));
    }

    #[test]
    fn formatting_variants_collapse_to_one_record() {
        let mut state = RunState::new();
        assert!(state.offer(record("Acme SL", Some("981-123-456"))));
        assert!(!state.offer(record("ACME  SL ", Some("981123456"))));
        assert_eq!(state.accepted(), 1);
        assert_eq!(state.duplicates_dropped(), 1);
        // first seen wins
        assert_eq!(state.records()[0].name, "Acme SL");
    }

    #[test]
    fn external_id_is_the_stronger_key() {
        let mut state = RunState::new();
        let mut a = record("Café Derby", None);
        a.external_id = Some("place-1".to_string());
        let mut b = record("Cafetería Derby", None);
        b.external_id = Some("place-1".to_string());
        assert!(state.offer(a));
        assert!(!state.offer(b));
        assert!(state.has_external_id("place-1"));
        assert_eq!(state.accepted(), 1);
    }

    #[test]
    fn same_name_without_phone_is_a_duplicate() {
        let mut state = RunState::new();
        assert!(state.offer(record("Panadería Rosalía", None)));
        assert!(!state.offer(record("panadería rosalía", None)));
    }

    #[test]
    fn nameless_records_are_never_accepted() {
        let mut state = RunState::new();
        assert!(!state.offer(record("   ", Some("981 123 456"))));
        assert_eq!(state.accepted(), 0);
    }

    #[test]
    fn replaying_a_stream_is_idempotent() {
        let stream = vec![
            record("Acme SL", Some("981 123 456")),
            record("Bar O Porto", None),
            record("ACME SL", Some("981123456")),
        ];

        let mut once = RunState::new();
        for r in stream.clone() {
            once.offer(r);
        }

        // simulate a resumed run that replays the same stream on top
        let mut twice = RunState::preload(once.records().to_vec());
        for r in stream {
            twice.offer(r);
        }

        let names_once: Vec<_> = once.records().iter().map(|r| r.name.clone()).collect();
        let names_twice: Vec<_> = twice.records().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names_once, names_twice);
    }

    #[test]
    fn identity_invariant_holds_over_a_mixed_stream() {
        let mut state = RunState::new();
        let mut with_id = record("Ferretería Braña", Some("982 111 222"));
        with_id.external_id = Some("place-9".to_string());
        state.offer(with_id.clone());
        state.offer(record("Ferretería Braña", Some("982-111-222")));
        state.offer(record("Ferretería Braña", Some("982 999 999")));

        let records = state.records();
        for (i, a) in records.iter().enumerate() {
            for b in &records[i + 1..] {
                if let (Some(ida), Some(idb)) = (&a.external_id, &b.external_id) {
                    assert_ne!(ida, idb);
                }
                let ka = RunState::name_phone_key(a);
                let kb = RunState::name_phone_key(b);
                assert_ne!(ka, kb);
            }
        }
    }

    #[test]
    fn rejected_record_still_registers_its_external_id() {
        let mut state = RunState::new();
        assert!(state.offer(record("Bar O Porto", Some("986 555 111"))));

        let mut dup = record("Bar O Porto", Some("986-555-111"));
        dup.external_id = Some("place-3".to_string());
        assert!(!state.offer(dup));

        // The id is known even though the record was dropped, so future
        // detail lookups for it are skipped.
        assert!(state.has_external_id("place-3"));
        assert_eq!(state.accepted(), 1);
    }

    #[test]
    fn checkpoint_cadence_fires_every_n_targets() {
        let mut state = RunState::new();
        let due: Vec<bool> = (0..5).map(|_| state.target_done(2)).collect();
        assert_eq!(due, vec![false, true, false, true, false]);
        assert_eq!(state.targets_processed(), 5);
    }
}
