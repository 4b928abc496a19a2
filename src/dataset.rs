//! Tabular datasets for training and evaluation
//!
//! Datasets are read from CSV with every cell kept as a string. Column roles
//! (text, label, ground-truth spans) are resolved separately, either from
//! explicit names or by [`detect_columns`].

use crate::error::{Result, SpanflagError};
use crate::lexicon::Lexicon;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Minimum rows for a discovered training file to be used
pub const MIN_TRAINING_ROWS: usize = 10;

const TEXT_CANDIDATES: &[&str] = &[
    "text", "content", "comment", "message", "review", "sentence",
];
const LABEL_CANDIDATES: &[&str] = &[
    "label",
    "target",
    "offensive",
    "toxic",
    "is_offensive",
    "is_toxic",
    "y",
];

/// Rows of string cells under named columns
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build from named columns of equal length
    pub fn from_columns(columns: Vec<(&str, Vec<String>)>) -> Self {
        let n_rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let headers = columns.iter().map(|(h, _)| h.to_string()).collect();
        let rows = (0..n_rows)
            .map(|i| {
                columns
                    .iter()
                    .map(|(_, v)| v.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect::<Vec<_>>();

        // Invalid UTF-8 in a cell is replaced, never rejected
        let mut rows = Vec::new();
        for record in csv_reader.byte_records() {
            let record = record?;
            let mut row: Vec<String> = record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect();
            if row.iter().any(|cell| cell.contains(char::REPLACEMENT_CHARACTER)) {
                debug!("Row {} has invalid UTF-8, decoded lossily", rows.len() + 1);
            }
            row.resize(headers.len(), String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Cells of one column, or a missing-column error
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SpanflagError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Column names with inferred kinds
    pub fn schema(&self) -> Schema {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut values = self.rows.iter().map(|r| r[i].trim()).filter(|v| !v.is_empty());
                let numeric = values.all(|v| v.parse::<f64>().is_ok());
                ColumnInfo {
                    name: name.clone(),
                    kind: if numeric { ColumnKind::Numeric } else { ColumnKind::Text },
                }
            })
            .collect();
        Schema { columns }
    }
}

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
}

/// Ordered column list of a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnInfo>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self { columns }
    }
}

/// Resolved column roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedColumns {
    pub text: String,
    pub label: Option<String>,
}

/// Guess the text and label columns from their names.
///
/// Text falls back to the first non-numeric column; a missing label column is
/// not an error (callers fall back to weak labels).
pub fn detect_columns(schema: &Schema) -> Result<DetectedColumns> {
    let find = |candidates: &[&str]| {
        candidates.iter().find_map(|cand| {
            schema
                .columns
                .iter()
                .find(|c| c.name.to_lowercase() == *cand)
                .map(|c| c.name.clone())
        })
    };

    let text = find(TEXT_CANDIDATES)
        .or_else(|| {
            schema
                .columns
                .iter()
                .find(|c| c.kind == ColumnKind::Text)
                .map(|c| c.name.clone())
        })
        .ok_or_else(|| {
            SpanflagError::Configuration(
                "no text column found; add a 'text' column or pass --text-col".into(),
            )
        })?;

    Ok(DetectedColumns {
        text,
        label: find(LABEL_CANDIDATES),
    })
}

/// Parse a label cell; any non-zero number is the positive class
pub fn parse_label(cell: &str) -> Option<u8> {
    let v = cell.trim();
    match v.to_lowercase().as_str() {
        "true" => return Some(1),
        "false" => return Some(0),
        _ => {}
    }
    v.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| u8::from(f != 0.0))
}

/// Texts with 0/1 labels and optional ground-truth span strings
#[derive(Debug, Clone, Default)]
pub struct LabeledData {
    pub texts: Vec<String>,
    pub labels: Vec<u8>,
    pub spans: Option<Vec<String>>,
}

impl LabeledData {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Rows at `indices`, in that order
    pub fn subset(&self, indices: &[usize]) -> LabeledData {
        LabeledData {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            spans: self
                .spans
                .as_ref()
                .map(|s| indices.iter().map(|&i| s[i].clone()).collect()),
        }
    }
}

/// Requested column names; `None` means "detect"
#[derive(Debug, Clone, Default)]
pub struct ColumnSelection {
    pub text: Option<String>,
    pub label: Option<String>,
    pub spans: Option<String>,
}

/// Extract labeled rows.
///
/// Requested columns that do not exist fall back to detection. Without any
/// label column, labels come from lexicon matches on the raw text.
pub fn labeled_data(
    dataset: &Dataset,
    selection: &ColumnSelection,
    lexicon: &Lexicon,
) -> Result<LabeledData> {
    let schema = dataset.schema();

    let text_col = match &selection.text {
        Some(name) if dataset.has_column(name) => name.clone(),
        requested => {
            let fallback = detect_columns(&schema)?.text;
            if let Some(name) = requested {
                warn!("Text column '{}' not found, using '{}'", name, fallback);
            }
            fallback
        }
    };
    let label_col = match &selection.label {
        Some(name) if dataset.has_column(name) => Some(name.clone()),
        _ => detect_columns(&schema).ok().and_then(|d| d.label),
    };

    let texts: Vec<String> = dataset
        .column(&text_col)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let labels = match label_col {
        Some(col) => {
            debug!("Using label column '{}'", col);
            dataset
                .column(&col)?
                .into_iter()
                .enumerate()
                .map(|(row, cell)| {
                    parse_label(cell).ok_or_else(|| {
                        SpanflagError::Configuration(format!(
                            "row {}: label {:?} in column '{}' is not a number",
                            row + 1,
                            cell,
                            col
                        ))
                    })
                })
                .collect::<Result<Vec<u8>>>()?
        }
        None => {
            warn!("No label column; deriving weak labels from the lexicon");
            weak_labels(&texts, lexicon)
        }
    };

    let spans = match &selection.spans {
        Some(name) if dataset.has_column(name) => Some(
            dataset
                .column(name)?
                .into_iter()
                .map(str::to_string)
                .collect(),
        ),
        Some(name) => {
            warn!("Spans column '{}' not found; skipping span scoring", name);
            None
        }
        None => None,
    };

    Ok(LabeledData {
        texts,
        labels,
        spans,
    })
}

/// Rule-based labels: 1 when any lexicon term occurs in the text
pub fn weak_labels(texts: &[String], lexicon: &Lexicon) -> Vec<u8> {
    texts
        .iter()
        .map(|t| u8::from(lexicon.matches_any(t)))
        .collect()
}

/// Built-in seed corpus: ten offensive and ten constructive comments
pub fn seed_dataset() -> Dataset {
    const POSITIVE: &[&str] = &[
        "mày ngu quá",
        "đúng là đồ dốt",
        "cút đi",
        "đồ rác rưởi",
        "thằng này vô học",
        "đồ điên",
        "đ.m thằng kia",
        "vcl dở tệ",
        "thối lợm thật sự",
        "đáng khinh",
    ];
    const NEGATIVE: &[&str] = &[
        "bạn nên cố gắng hơn",
        "mình góp ý nhẹ nhàng",
        "bài làm còn thiếu ý",
        "nên bổ sung ví dụ minh họa",
        "cần cải thiện cách trình bày",
        "phản hồi mang tính xây dựng",
        "nội dung ổn nhưng cần chi tiết hơn",
        "thầy cô sẽ hỗ trợ thêm",
        "cả lớp làm khá tốt",
        "chúc mừng bạn tiến bộ",
    ];

    let texts = POSITIVE.iter().chain(NEGATIVE).map(|s| s.to_string()).collect();
    let labels = POSITIVE
        .iter()
        .map(|_| "1")
        .chain(NEGATIVE.iter().map(|_| "0"))
        .map(String::from)
        .collect();
    Dataset::from_columns(vec![("text", texts), ("label", labels)])
}

/// First readable CSV among `candidates` with enough rows
pub fn discover_training_data(candidates: &[PathBuf]) -> Option<(PathBuf, Dataset)> {
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match Dataset::from_csv_path(path) {
            Ok(ds) if ds.len() >= MIN_TRAINING_ROWS => return Some((path.clone(), ds)),
            Ok(ds) => debug!(
                "Ignoring {}: {} rows (< {})",
                path.display(),
                ds.len(),
                MIN_TRAINING_ROWS
            ),
            Err(e) => warn!("Failed to read {}: {}", path.display(), e),
        }
    }
    None
}
