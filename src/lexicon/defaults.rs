//! Built-in Vietnamese tables
//!
//! Used when `spanflag.toml` does not override them. Abbreviation order
//! matters: normalization substitutes entries in table order.

/// Offensive terms. `*` is the wildcard for masked letters.
pub const DEFAULT_TERMS: &[&str] = &[
    "thối lợm",
    "ngu",
    "ngu ngốc",
    "đần",
    "dốt",
    "vô học",
    "cút đi",
    "cút",
    "đồ rác rưởi",
    "rác rưởi",
    "khốn nạn",
    "đáng khinh",
    "đ*m",
    "đ.m",
    "dm",
    "đm",
    "dcm",
    "vcl",
    "v*l",
    "cl",
    "đồ điên",
    "đồ ngu",
    "địt",
    "lồn",
];

/// Chat abbreviations and their expansions
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("dm", "địt mẹ"),
    ("đm", "địt mẹ"),
    ("dcm", "địt con mẹ"),
    ("cl", "cái lồn"),
    ("vcl", "vãi cả lồn"),
    ("v*l", "vãi lồn"),
];
