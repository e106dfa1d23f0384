use chrono::NaiveDate;

use crate::forms::FormErrors;
use crate::models::{AssessmentSubmission, SessionType};
use crate::scores::Instrument;

/// Raw initial-assessment form state. Answer slots hold what was actually
/// selected (`None` for unanswered questions) so a failed validation
/// re-renders the form with the selections intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentForm {
    pub contact_date: String,
    pub phq9: Vec<Option<u8>>,
    pub gad7: Vec<Option<u8>>,
    pub discuss_with_consultant: bool,
    pub psychiatric_consultant_id: String,
    pub consultant_notes: String,
    pub session_type: String,
    pub session_duration: String,
}

impl Default for AssessmentForm {
    fn default() -> Self {
        AssessmentForm {
            contact_date: String::new(),
            phq9: vec![None; Instrument::Phq9.question_count()],
            gad7: vec![None; Instrument::Gad7.question_count()],
            discuss_with_consultant: false,
            psychiatric_consultant_id: String::new(),
            consultant_notes: String::new(),
            session_type: String::new(),
            session_duration: String::new(),
        }
    }
}

fn set_answer(slots: &mut [Option<u8>], index_raw: &str, value_raw: &str) {
    if let (Ok(index), Ok(value)) = (index_raw.parse::<usize>(), value_raw.parse::<u8>()) {
        if index >= 1 && index <= slots.len() {
            slots[index - 1] = Some(value);
        }
    }
}

fn scored(instrument: Instrument, slots: &[Option<u8>]) -> Option<(Vec<u8>, u32)> {
    let answers: Option<Vec<u8>> = slots.iter().copied().collect();
    let answers = answers?;
    let score = instrument.total(&answers)?;
    Some((answers, score))
}

impl AssessmentForm {
    /// Assemble the form from decoded urlencoded pairs. Question radios
    /// are named `phq9_1`..`phq9_9` and `gad7_1`..`gad7_7`; unknown keys
    /// are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> AssessmentForm {
        let mut form = AssessmentForm::default();
        for (key, value) in pairs {
            if let Some(index) = key.strip_prefix("phq9_") {
                set_answer(&mut form.phq9, index, value);
            } else if let Some(index) = key.strip_prefix("gad7_") {
                set_answer(&mut form.gad7, index, value);
            } else {
                match key.as_str() {
                    "contact_date" => form.contact_date = value.clone(),
                    "discuss_with_consultant" => {
                        form.discuss_with_consultant =
                            matches!(value.as_str(), "on" | "true" | "1")
                    }
                    "psychiatric_consultant_id" => {
                        form.psychiatric_consultant_id = value.clone()
                    }
                    "consultant_notes" => form.consultant_notes = value.clone(),
                    "session_type" => form.session_type = value.clone(),
                    "session_duration" => form.session_duration = value.clone(),
                    _ => {}
                }
            }
        }
        form
    }

    /// Validate the form. Scores are computed server-side from the answer
    /// sets; the consultant id is carried only when the discussion flag
    /// is set.
    pub fn validate(&self) -> Result<ValidatedAssessment, FormErrors> {
        let mut errors = FormErrors::default();

        let contact_date_ok = NaiveDate::parse_from_str(&self.contact_date, "%Y-%m-%d").is_ok();
        if !contact_date_ok {
            errors.push("contact_date", "Contact Date is required");
        }

        let phq9 = scored(Instrument::Phq9, &self.phq9);
        if phq9.is_none() {
            errors.push("phq9", "All PHQ-9 questions must be answered");
        }
        let gad7 = scored(Instrument::Gad7, &self.gad7);
        if gad7.is_none() {
            errors.push("gad7", "All GAD-7 questions must be answered");
        }

        let session_type: Option<SessionType> = self.session_type.parse().ok();
        if session_type.is_none() {
            errors.push("session_type", "Session Type is required");
        }

        let session_duration: Option<u32> =
            self.session_duration.parse().ok().filter(|d| *d > 0);
        if session_duration.is_none() {
            errors.push("session_duration", "Session Duration must be a positive number");
        }

        match (phq9, gad7, session_type, session_duration) {
            (
                Some((phq9_answers, phq9_score)),
                Some((gad7_answers, gad7_score)),
                Some(session_type),
                Some(session_duration),
            ) if errors.is_empty() => Ok(ValidatedAssessment {
                contact_date: self.contact_date.clone(),
                phq9_answers,
                gad7_answers,
                phq9_score,
                gad7_score,
                discuss_with_consultant: self.discuss_with_consultant,
                psychiatric_consultant_id: if self.discuss_with_consultant {
                    self.psychiatric_consultant_id.parse().ok()
                } else {
                    None
                },
                consultant_notes: self.consultant_notes.clone(),
                session_type,
                session_duration,
            }),
            _ => Err(errors),
        }
    }
}

/// A fully validated assessment, ready to attach to its session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAssessment {
    pub contact_date: String,
    pub phq9_answers: Vec<u8>,
    pub gad7_answers: Vec<u8>,
    pub phq9_score: u32,
    pub gad7_score: u32,
    pub discuss_with_consultant: bool,
    pub psychiatric_consultant_id: Option<i64>,
    pub consultant_notes: String,
    pub session_type: SessionType,
    pub session_duration: u32,
}

impl ValidatedAssessment {
    pub fn into_submission(
        self,
        patient_id: i64,
        clinic_id: i64,
        created_by: i64,
    ) -> AssessmentSubmission {
        AssessmentSubmission {
            patient_id,
            clinic_id,
            created_by,
            contact_date: self.contact_date,
            phq9_score: self.phq9_score,
            gad7_score: self.gad7_score,
            phq9_answers: self.phq9_answers,
            gad7_answers: self.gad7_answers,
            discuss_with_consultant: self.discuss_with_consultant,
            psychiatric_consultant_id: self.psychiatric_consultant_id,
            consultant_notes: self.consultant_notes,
            session_type: self.session_type,
            session_duration: self.session_duration,
        }
    }
}
