//! Delimiter detection for delimited text.

/// Candidate delimiters, in tie-breaking order.
const CANDIDATES: [char; 4] = [',', ';', '\t', '|'];

/// Number of bytes sampled from the start of the text. Detection accuracy
/// does not improve past the first couple of kilobytes.
const SAMPLE_BYTES: usize = 2048;

/// Maximum lines inspected by the consistency heuristic.
const SAMPLE_LINES: usize = 32;

/// Guesses the field delimiter of delimited text.
///
/// The primary heuristic splits the sampled lines under each candidate and
/// accepts the candidate that yields the same multi-field count on every
/// line, preferring the widest split. When no candidate is consistent, the
/// most frequent candidate character wins; when the sample contains none
/// of them, the default is a comma. Never fails.
pub fn detect_delimiter(text: &str) -> char {
    let sample = head_sample(text, SAMPLE_BYTES);

    if let Some(delimiter) = sniff_consistent(sample) {
        return delimiter;
    }

    tracing::debug!("delimiter sniffing inconclusive, falling back to frequency count");
    let best = CANDIDATES
        .iter()
        .map(|&candidate| (candidate, sample.matches(candidate).count()))
        .max_by_key(|&(_, count)| count);
    match best {
        Some((delimiter, count)) if count > 0 => delimiter,
        _ => ',',
    }
}

/// Returns the leading `max_bytes` of `text`, backed off to a char
/// boundary.
fn head_sample(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Accepts a candidate whose per-line field counts agree across the
/// sample. Requires at least two lines and more than one field per line,
/// so a single column of text never "detects" a delimiter.
fn sniff_consistent(sample: &str) -> Option<char> {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let mut best: Option<(char, usize)> = None;
    for &candidate in &CANDIDATES {
        let mut counts = lines.iter().map(|line| line.split(candidate).count());
        let Some(first) = counts.next() else {
            continue;
        };
        if first > 1 && counts.all(|count| count == first) {
            match best {
                Some((_, width)) if width >= first => {}
                _ => best = Some((candidate, first)),
            }
        }
    }
    best.map(|(delimiter, _)| delimiter)
}
