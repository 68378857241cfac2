//! Synthetic candidate records
//!
//! Every record carries two modelled features (years of experience and a
//! technical score) plus decorative fields that only exist to make the table
//! look like real applicant data.

use crate::core::{Result, SVMError, LABEL_HIRED, LABEL_REJECTED};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Year that graduation bonuses and birth dates are measured against
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;
/// Earliest graduation year drawn by the generator
pub const FIRST_GRADUATION_YEAR: i32 = 2010;

pub const MAX_EXPERIENCE_YEARS: f64 = 10.0;
pub const MAX_TECHNICAL_SCORE: f64 = 100.0;

const FIRST_NAMES: &[&str] = &[
    "Ahmet", "Ayşe", "Mehmet", "Elif", "Mustafa", "Zeynep", "Emre", "Selin", "Burak", "Derya",
    "Can", "Ece", "Kerem", "Deniz", "Oğuz", "Melis",
];
const LAST_NAMES: &[&str] = &[
    "Yılmaz", "Kaya", "Demir", "Şahin", "Çelik", "Yıldız", "Aydın", "Öztürk", "Arslan", "Doğan",
    "Kılıç", "Koç",
];
const UNIVERSITIES: &[&str] = &[
    "Anadolu Teknik Üniversitesi",
    "Boğaziçi Bilim Üniversitesi",
    "Ege Mühendislik Üniversitesi",
    "Karadeniz Teknoloji Üniversitesi",
    "Marmara Yazılım Üniversitesi",
    "Orta Anadolu Üniversitesi",
];
const DEPARTMENTS: &[&str] = &[
    "Computer Engineering",
    "Software Engineering",
    "Electrical and Electronics Engineering",
    "Computer Science",
    "Mathematical Engineering",
];

/// Ground-truth screening rule used when generating data
///
/// A candidate is rejected when they have under two years of experience and
/// a technical score under 60.
pub fn screening_label(experience_years: f64, technical_score: f64) -> u8 {
    if experience_years < 2.0 && technical_score < 60.0 {
        LABEL_REJECTED
    } else {
        LABEL_HIRED
    }
}

/// Check that a raw feature pair lies in the valid input ranges (inclusive)
pub fn validate_features(experience_years: f64, technical_score: f64) -> Result<()> {
    if !(0.0..=MAX_EXPERIENCE_YEARS).contains(&experience_years) {
        return Err(SVMError::InvalidArgument(format!(
            "experience_years must be within [0, 10], got {experience_years}"
        )));
    }
    if !(0.0..=MAX_TECHNICAL_SCORE).contains(&technical_score) {
        return Err(SVMError::InvalidArgument(format!(
            "technical_score must be within [0, 100], got {technical_score}"
        )));
    }
    Ok(())
}

/// One synthetic applicant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    pub experience_years: f64,
    pub technical_score: f64,
    pub label: u8,
}

impl CandidateRecord {
    /// The two modelled features in training order
    pub fn features(&self) -> Vec<f64> {
        vec![self.experience_years, self.technical_score]
    }
}

/// Ordered collection of candidate records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateDataset {
    records: Vec<CandidateRecord>,
}

impl CandidateDataset {
    pub fn new(records: Vec<CandidateRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    /// Raw (unscaled) feature rows
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.records.iter().map(CandidateRecord::features).collect()
    }

    /// Dataset labels in {0, 1}
    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.label).collect()
    }
}


/// Seeded generator for synthetic candidates
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    seed: u64,
    reference_year: i32,
}

impl CandidateGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }

    /// Set the year graduation bonuses are measured against
    pub fn with_reference_year(mut self, reference_year: i32) -> Self {
        self.reference_year = reference_year;
        self
    }

    /// Generate `n` records; the same seed always yields the same dataset
    pub fn generate(&self, n: usize) -> Result<CandidateDataset> {
        if n == 0 {
            return Err(SVMError::InvalidArgument(
                "number of candidates must be positive".to_string(),
            ));
        }
        if self.reference_year < FIRST_GRADUATION_YEAR {
            return Err(SVMError::InvalidArgument(format!(
                "reference year must be at least {FIRST_GRADUATION_YEAR}, got {}",
                self.reference_year
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let records = (0..n).map(|_| self.next_record(&mut rng)).collect();
        Ok(CandidateDataset::new(records))
    }

    fn next_record(&self, rng: &mut StdRng) -> CandidateRecord {
        let full_name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
        let age = rng.gen_range(22..=45);
        let birth_date = NaiveDate::from_ymd_opt(
            self.reference_year - age,
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        );
        let university = pick(rng, UNIVERSITIES).to_string();
        let department = pick(rng, DEPARTMENTS).to_string();

        let graduation_year = rng.gen_range(FIRST_GRADUATION_YEAR..=self.reference_year);
        let experience: u32 = rng.gen_range(0..=10);
        let base_score: i32 = rng.gen_range(30..=90);

        let experience_bonus = 2 * experience as i32;
        let graduation_bonus = self.reference_year - graduation_year;
        let technical_score = (base_score + experience_bonus + graduation_bonus).min(100);

        let experience_years = f64::from(experience);
        let technical_score = f64::from(technical_score);

        CandidateRecord {
            full_name,
            birth_date,
            university,
            department,
            graduation_year: Some(graduation_year),
            experience_years,
            technical_score,
            label: screening_label(experience_years, technical_score),
        }
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Generate `n` candidates with the default reference year
pub fn generate(n: usize, seed: u64) -> Result<CandidateDataset> {
    CandidateGenerator::new(seed).generate(n)
}
