//! Turning agent output into display-ready answers

pub mod citations;
pub mod markdown;
pub mod normalizer;
pub mod suggestions;

pub use citations::{Citation, extract_citations, split_citations, strip_citations};
pub use markdown::normalize_markdown;
pub use normalizer::{
    DECODE_PRIORITY, DecodeStrategy, NormalizedResponse, STRUCTURED_OUTPUT_KEYS, normalize,
};
pub use suggestions::{extract_inline_suggestions, extract_listed_questions, resolve_suggestions};
