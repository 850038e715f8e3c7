// libjieba/src/extractor.rs
//
// Forward pass turning scored routes into word spans.
//
// Runes the scorer left unmatched are emitted one by one, except ASCII
// letters and digits: consecutive unmatched alphanumerics are held back and
// emitted as a single word ("abc123"), flushed by the next matched word,
// the next non-alphanumeric rune, or the end of the range.

use libjieba_core::rune::{byte_range, Rune};

use crate::scorer::Route;

/// An inclusive run of runes chosen as one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start: Rune,
    pub end: Rune,
}

impl WordSpan {
    pub fn new(start: Rune, end: Rune) -> Self {
        Self { start, end }
    }

    /// The word's text within the sentence the runes were decoded from.
    pub fn as_str<'t>(&self, sentence: &'t str) -> &'t str {
        &sentence[byte_range(&self.start, &self.end)]
    }

    /// Number of runes covered.
    pub fn rune_len(&self) -> usize {
        self.end.char_index - self.start.char_index + 1
    }
}

/// Where the extractor stands between two runes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractState {
    Idle,
    /// Unmatched alphanumerics pending since rune index `start`.
    BufferingAlnum { start: usize },
}

/// Span builder driven one rune decision at a time.
///
/// Indices passed to the transition methods are local to `runes`.
#[derive(Debug)]
pub struct SpanExtractor<'r> {
    runes: &'r [Rune],
    state: ExtractState,
    spans: Vec<WordSpan>,
}

impl<'r> SpanExtractor<'r> {
    pub fn new(runes: &'r [Rune]) -> Self {
        Self {
            runes,
            state: ExtractState::Idle,
            spans: Vec::new(),
        }
    }

    pub fn state(&self) -> ExtractState {
        self.state
    }

    /// A dictionary word of `len` runes starts at `at`.
    pub fn on_match(&mut self, at: usize, len: usize) {
        assert!(len > 0, "matched dictionary word at {} is empty", at);
        assert!(
            at + len <= self.runes.len(),
            "matched word {}..{} overruns range of {} runes",
            at,
            at + len,
            self.runes.len()
        );
        self.flush(at);
        self.emit(at, at + len - 1);
    }

    /// Unmatched ASCII letter or digit at `at`.
    pub fn on_alnum(&mut self, at: usize) {
        if self.state == ExtractState::Idle {
            self.state = ExtractState::BufferingAlnum { start: at };
        }
    }

    /// Any other unmatched rune at `at`.
    pub fn on_other(&mut self, at: usize) {
        self.flush(at);
        self.emit(at, at);
    }

    /// End of range: flush whatever is pending and hand back the spans.
    pub fn finish(mut self) -> Vec<WordSpan> {
        self.flush(self.runes.len());
        self.spans
    }

    fn flush(&mut self, at: usize) {
        if let ExtractState::BufferingAlnum { start } = self.state {
            self.emit(start, at - 1);
            self.state = ExtractState::Idle;
        }
    }

    fn emit(&mut self, first: usize, last: usize) {
        self.spans.push(WordSpan::new(self.runes[first], self.runes[last]));
    }
}

/// Walk `routes` from the first rune and collect the chosen words.
///
/// `runes` must be the runes the routes were scored for.
pub fn extract(runes: &[Rune], routes: &[Route<'_>]) -> Vec<WordSpan> {
    assert_eq!(runes.len(), routes.len(), "routes do not match the rune range");
    let mut extractor = SpanExtractor::new(runes);
    let mut i = 0;
    while i < routes.len() {
        match routes[i].unit {
            Some(unit) => {
                extractor.on_match(i, unit.len());
                i += unit.len();
            }
            None if runes[i].is_ascii_alnum() => {
                extractor.on_alnum(i);
                i += 1;
            }
            None => {
                extractor.on_other(i);
                i += 1;
            }
        }
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use libjieba_core::{decode_runes, DictUnit};

    fn texts(text: &str, spans: &[WordSpan]) -> Vec<String> {
        spans.iter().map(|s| s.as_str(text).to_string()).collect()
    }

    fn unmatched<'d>(n: usize) -> Vec<Route<'d>> {
        (0..n)
            .map(|i| Route {
                score: 0.0,
                unit: None,
                next: i,
            })
            .collect()
    }

    #[test]
    fn state_machine_transitions() {
        let text = "ab中c";
        let runes = decode_runes(text);
        let mut ex = SpanExtractor::new(&runes);
        assert_eq!(ex.state(), ExtractState::Idle);
        ex.on_alnum(0);
        assert_eq!(ex.state(), ExtractState::BufferingAlnum { start: 0 });
        ex.on_alnum(1);
        assert_eq!(ex.state(), ExtractState::BufferingAlnum { start: 0 });
        ex.on_other(2);
        assert_eq!(ex.state(), ExtractState::Idle);
        ex.on_alnum(3);
        let spans = ex.finish();
        assert_eq!(texts(text, &spans), vec!["ab", "中", "c"]);
    }

    #[test]
    fn match_flushes_pending_run_first() {
        let text = "x1你好";
        let runes = decode_runes(text);
        let mut ex = SpanExtractor::new(&runes);
        ex.on_alnum(0);
        ex.on_alnum(1);
        ex.on_match(2, 2);
        assert_eq!(ex.state(), ExtractState::Idle);
        assert_eq!(texts(text, &ex.finish()), vec!["x1", "你好"]);
    }

    #[test]
    fn unmatched_alnum_runs_merge() {
        let text = "abc123";
        let runes = decode_runes(text);
        let spans = extract(&runes, &unmatched(runes.len()));
        assert_eq!(texts(text, &spans), vec!["abc123"]);
        assert_eq!(spans[0].rune_len(), 6);
    }

    #[test]
    fn unmatched_symbols_stay_single() {
        let text = "a!b？？";
        let runes = decode_runes(text);
        let spans = extract(&runes, &unmatched(runes.len()));
        assert_eq!(texts(text, &spans), vec!["a", "!", "b", "？", "？"]);
    }

    #[test]
    fn non_ascii_digits_are_not_merged() {
        let text = "１２";
        let runes = decode_runes(text);
        let spans = extract(&runes, &unmatched(runes.len()));
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn matched_units_jump_ahead() {
        let text = "ok你好吗";
        let runes = decode_runes(text);
        let nh = DictUnit::new("你好", -1.0, "l");
        let mut routes = unmatched(runes.len());
        routes[2] = Route {
            score: -1.0,
            unit: Some(&nh),
            next: 3,
        };
        // route at 3 is never visited
        routes[3].unit = Some(&nh);
        let spans = extract(&runes, &routes);
        assert_eq!(texts(text, &spans), vec!["ok", "你好", "吗"]);
    }

    #[test]
    fn empty_range_yields_nothing() {
        assert!(extract(&[], &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "overruns")]
    fn overrunning_match_is_fatal() {
        let runes = decode_runes("你");
        let mut ex = SpanExtractor::new(&runes);
        ex.on_match(0, 2);
    }
}
