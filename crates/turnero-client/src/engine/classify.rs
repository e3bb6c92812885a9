use dashmap::DashMap;

use crate::engine::normalize::{normalize_procedure_name, tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExamType {
    Rx,
    Tac,
    Other,
}

impl ExamType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rx => "RX",
            Self::Tac => "TAC",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Head,
    Neck,
    Chest,
    Abdomen,
    Pelvis,
    AbdomenPelvis,
    Spine,
    Limb,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Head,
        Region::Neck,
        Region::Chest,
        Region::Abdomen,
        Region::Pelvis,
        Region::AbdomenPelvis,
        Region::Spine,
        Region::Limb,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Neck => "neck",
            Self::Chest => "chest",
            Self::Abdomen => "abdomen",
            Self::Pelvis => "pelvis",
            Self::AbdomenPelvis => "abdomen_pelvis",
            Self::Spine => "spine",
            Self::Limb => "limb",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Head => 1,
            Self::Neck => 1 << 1,
            Self::Chest => 1 << 2,
            Self::Abdomen => 1 << 3,
            Self::Pelvis => 1 << 4,
            Self::AbdomenPelvis => 1 << 5,
            Self::Spine => 1 << 6,
            Self::Limb => 1 << 7,
        }
    }
}

/// Set of matched anatomical regions; inserting a region twice is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegionSet(u8);

impl RegionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, region: Region) {
        self.0 |= region.bit();
    }

    pub const fn contains(self, region: Region) -> bool {
        self.0 & region.bit() != 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Region> {
        Region::ALL
            .into_iter()
            .filter(move |region| self.contains(*region))
    }
}

/// Result of classifying one procedure name.
///
/// The double/triple flags are always derived from the region count here, so
/// no caller can produce a record that is both, or a triple with fewer than
/// three regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    exam_type: ExamType,
    regions: RegionSet,
    is_double: bool,
    is_triple: bool,
}

impl Classification {
    pub fn new(exam_type: ExamType, regions: RegionSet) -> Self {
        let regions = if exam_type == ExamType::Tac {
            regions
        } else {
            RegionSet::empty()
        };
        let region_count = regions.len();
        let is_triple = region_count >= 3;
        let is_double = region_count == 2 && !is_triple;
        Self {
            exam_type,
            regions,
            is_double,
            is_triple,
        }
    }

    pub fn other() -> Self {
        Self::new(ExamType::Other, RegionSet::empty())
    }

    pub const fn exam_type(&self) -> ExamType {
        self.exam_type
    }

    pub const fn regions(&self) -> RegionSet {
        self.regions
    }

    pub const fn region_count(&self) -> u32 {
        self.regions.len()
    }

    pub const fn is_double(&self) -> bool {
        self.is_double
    }

    pub const fn is_triple(&self) -> bool {
        self.is_triple
    }

    pub fn billing_category(&self) -> BillingCategory {
        BillingCategory::of(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BillingCategory {
    Rx,
    TacSimple,
    TacDouble,
    TacTriple,
    Unbilled,
}

impl BillingCategory {
    pub fn of(classification: &Classification) -> Self {
        match classification.exam_type() {
            ExamType::Rx => Self::Rx,
            ExamType::Other => Self::Unbilled,
            ExamType::Tac => {
                if classification.is_triple() {
                    Self::TacTriple
                } else if classification.is_double() {
                    Self::TacDouble
                } else {
                    Self::TacSimple
                }
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rx => "rx",
            Self::TacSimple => "tac_simple",
            Self::TacDouble => "tac_double",
            Self::TacTriple => "tac_triple",
            Self::Unbilled => "unbilled",
        }
    }
}

const ABDOMEN_PELVIS_SENTINEL: &str = "\u{1}ABDPELVIS\u{1}";

const ABDOMEN_PELVIS_PHRASES: [&str; 8] = [
    "ABDOMINAL Y PELVICO",
    "ABDOMEN Y PELVIS",
    "ABDOMEN-PELVIS",
    "ABDOMEN PELVIS",
    "ABDOMINOPELVICO",
    "ABDOMINOPELVIS",
    "ABD/PEL",
    "ABD/PLV",
];

const REGION_KEYWORDS: [(Region, &[&str]); 7] = [
    (Region::Head, &["CABEZA", "CRANEO", "CEREBRO", "ENCEFALICO"]),
    (Region::Neck, &["CUELLO", "CERVICAL"]),
    (
        Region::Chest,
        &["TORAX", "TORACICO", "TX", "PULMON", "CARDIACO", "PECHO"],
    ),
    (
        Region::Abdomen,
        &["ABDOMEN", "ABDOMINAL", "ABD", "HEPATICO", "RENAL"],
    ),
    (
        Region::Pelvis,
        &["PELVIS", "PELVICO", "PLV", "PEL", "PROSTATA", "UTERO"],
    ),
    (Region::Spine, &["COLUMNA", "VERTEBRAL", "LUMBAR", "DORSAL"]),
    (
        Region::Limb,
        &["EXTREMIDAD", "BRAZO", "PIERNA", "MANO", "PIE"],
    ),
];

/// Keywords this short are abbreviations and only match whole tokens.
const SHORT_KEYWORD_MAX_LEN: usize = 3;

/// Classifies a procedure name without touching any cache.
pub fn classify_procedure(name: &str) -> Classification {
    classify_normalized(&normalize_procedure_name(name))
}

fn classify_normalized(normalized: &str) -> Classification {
    match detect_exam_type(normalized) {
        ExamType::Tac => Classification::new(ExamType::Tac, scan_regions(normalized)),
        other => Classification::new(other, RegionSet::empty()),
    }
}

fn detect_exam_type(normalized: &str) -> ExamType {
    if tokens(normalized).any(is_tomography_token) {
        return ExamType::Tac;
    }
    if tokens(normalized).any(is_radiograph_token) {
        return ExamType::Rx;
    }
    ExamType::Other
}

fn is_tomography_token(token: &str) -> bool {
    token == "TAC" || token.ends_with("TAC") || token.starts_with("TOMOGRAF") || token == "SCANNER"
}

fn is_radiograph_token(token: &str) -> bool {
    token == "RX" || token.starts_with("RADIOGRAF") || token == "RAYOS"
}

fn scan_regions(normalized: &str) -> RegionSet {
    let mut text = normalized.to_string();
    for phrase in ABDOMEN_PELVIS_PHRASES {
        if text.contains(phrase) {
            text = text.replace(phrase, ABDOMEN_PELVIS_SENTINEL);
        }
    }

    let mut regions = RegionSet::empty();
    let merged_abdomen_pelvis = text.contains(ABDOMEN_PELVIS_SENTINEL);
    if merged_abdomen_pelvis {
        regions.insert(Region::AbdomenPelvis);
        text = text.replace(ABDOMEN_PELVIS_SENTINEL, " ");
    }

    for (region, keywords) in REGION_KEYWORDS {
        if merged_abdomen_pelvis && matches!(region, Region::Abdomen | Region::Pelvis) {
            continue;
        }
        if keywords.iter().any(|word| keyword_matches(&text, word)) {
            regions.insert(region);
        }
    }

    regions
}

fn keyword_matches(text: &str, keyword: &str) -> bool {
    if keyword.len() <= SHORT_KEYWORD_MAX_LEN {
        return tokens(text).any(|token| token == keyword);
    }
    text.contains(keyword)
}

/// Memoizing classifier, safe to share across worker threads.
#[derive(Debug, Default)]
pub struct ExamClassifier {
    cache: DashMap<String, Classification>,
}

impl ExamClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, name: &str) -> Classification {
        let normalized = normalize_procedure_name(name);
        if let Some(cached) = self.cache.get(&normalized) {
            return *cached;
        }
        let classification = classify_normalized(&normalized);
        self.cache.insert(normalized, classification);
        classification
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
