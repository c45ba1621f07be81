/// MMLU multiple-choice records to samples.
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ClickBenchError, ClickBenchResult};
use crate::output::read_jsonl;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MmluRecord {
    pub question: String,
    pub choices: Vec<String>,
    /// Index into `choices`.
    pub answer: usize,
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceSample {
    pub id: usize,
    pub input: String,
    pub choices: Vec<String>,
    /// Letter of the correct choice, "A" for index 0.
    pub target: String,
    pub metadata: ChoiceMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMetadata {
    pub subject: String,
}

pub fn answer_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// Convert one record. The id is assigned later by `build_choice_samples`.
pub fn record_to_sample(record: MmluRecord) -> ClickBenchResult<ChoiceSample> {
    if record.answer >= record.choices.len() {
        return Err(ClickBenchError::Dataset(format!(
            "answer index {} out of range for {} choices",
            record.answer,
            record.choices.len()
        )));
    }
    let letter = answer_letter(record.answer).ok_or_else(|| {
        ClickBenchError::Dataset(format!("answer index {} has no letter", record.answer))
    })?;

    Ok(ChoiceSample {
        id: 0,
        input: record.question,
        choices: record.choices,
        target: letter.to_string(),
        metadata: ChoiceMetadata {
            subject: record.subject,
        },
    })
}

/// Read a JSON Lines file of records; blank lines are ignored.
pub fn load_records(path: &Path) -> ClickBenchResult<Vec<MmluRecord>> {
    let records: Vec<MmluRecord> = read_jsonl(path)?;
    tracing::debug!(path = %path.display(), count = records.len(), "MMLU records read");
    Ok(records)
}

/// Convert all records, shuffle when `rng` is given, then number them from 1.
pub fn build_choice_samples<R: Rng + ?Sized>(
    records: Vec<MmluRecord>,
    rng: Option<&mut R>,
) -> ClickBenchResult<Vec<ChoiceSample>> {
    let mut samples = records
        .into_iter()
        .map(record_to_sample)
        .collect::<ClickBenchResult<Vec<_>>>()?;

    if let Some(rng) = rng {
        samples.shuffle(rng);
    }
    for (idx, sample) in samples.iter_mut().enumerate() {
        sample.id = idx + 1;
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn record(q: &str, answer: usize) -> MmluRecord {
        MmluRecord {
            question: q.to_string(),
            choices: vec!["1 m/s".into(), "2 m/s".into(), "3 m/s".into(), "4 m/s".into()],
            answer,
            subject: "high_school_physics".into(),
        }
    }

    #[test]
    fn answer_index_becomes_letter() {
        let s = record_to_sample(record("How fast?", 2)).unwrap();
        assert_eq!(s.target, "C");
        assert_eq!(s.input, "How fast?");
        assert_eq!(s.choices.len(), 4);
        assert_eq!(s.metadata.subject, "high_school_physics");
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let err = record_to_sample(record("?", 4)).unwrap_err();
        assert!(matches!(err, ClickBenchError::Dataset(_)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible_and_complete() {
        let records: Vec<_> = (0..20).map(|i| record(&format!("q{i}"), i % 4)).collect();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            build_choice_samples(records.clone(), Some(&mut rng)).unwrap()
        };
        let a = run(42);
        assert_eq!(a, run(42));

        let mut questions: Vec<_> = a.iter().map(|s| s.input.clone()).collect();
        questions.sort();
        let mut expected: Vec<_> = records.iter().map(|r| r.question.clone()).collect();
        expected.sort();
        assert_eq!(questions, expected);
        assert_eq!(a.iter().map(|s| s.id).collect::<Vec<_>>(), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn unshuffled_keeps_file_order() {
        let records = vec![record("first", 0), record("second", 1)];
        let samples = build_choice_samples::<StdRng>(records, None).unwrap();
        assert_eq!(samples[0].input, "first");
        assert_eq!(samples[1].target, "B");
    }

    #[test]
    fn loads_jsonl_skipping_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.jsonl");
        std::fs::write(
            &path,
            "{\"question\":\"q\",\"choices\":[\"a\",\"b\"],\"answer\":1,\"subject\":\"s\"}\n\n",
        )
        .unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].answer, 1);
    }
}
