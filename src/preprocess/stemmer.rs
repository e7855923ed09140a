//! Porter stemming algorithm.
//!
//! Follows Martin Porter's reference C implementation of the 1980 algorithm,
//! including its two published departures from the paper
//! (`-bli` → `-ble` in place of `-abli` → `-able`, and the extra `-logi` → `-log` rule).
//! Output must stay identical to the stems the trainer produced.
//!
//! The algorithm is defined on lowercase ASCII. Tokens produced by
//! [`TextPreprocessor`](super::TextPreprocessor) are always in that alphabet;
//! anything else is returned untouched.
//!
//! # Examples
//! ```
//! use fake_news_tfidf::preprocess::stemmer::{PorterStemmer, Stemmer};
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("generalizations"), "gener");
//! ```

/// Reduces a word to its stem.
pub trait Stemmer {
    fn stem(&self, word: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() <= 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return word.to_string();
        }
        let mut w = Word::new(word);
        w.step1ab();
        if w.b.len() > 1 {
            w.step1c();
            w.step2();
            w.step3();
            w.step4();
            w.step5();
        }
        // only ASCII bytes were ever written
        String::from_utf8(w.b).unwrap_or_default()
    }
}

/// Working buffer.
/// `b` is the current word, `j` the length of the stem in front of the
/// suffix matched by the last successful [`Word::ends`].
struct Word {
    b: Vec<u8>,
    j: usize,
}

impl Word {
    fn new(word: &str) -> Self {
        Self {
            b: word.as_bytes().to_vec(),
            j: 0,
        }
    }

    /// `b[i]` is a consonant. `y` is a consonant at the start or after a vowel.
    fn cons(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of vowel→consonant sequences in `b[..j]`.
    fn m(&self) -> usize {
        let mut n = 0;
        let mut prev_vowel = false;
        for i in 0..self.j {
            let c = self.cons(i);
            if c && prev_vowel {
                n += 1;
            }
            prev_vowel = !c;
        }
        n
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.cons(i))
    }

    /// `b[i-1..=i]` is a double consonant.
    fn double_c(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.cons(i)
    }

    /// `b[i-2..=i]` is consonant-vowel-consonant and `b[i]` is not w, x or y.
    fn cvc(&self, i: usize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn last(&self) -> usize {
        self.b.len() - 1
    }

    /// On a match, moves `j` in front of the suffix.
    fn ends(&mut self, suffix: &str) -> bool {
        let s = suffix.as_bytes();
        if s.len() > self.b.len() || !self.b.ends_with(s) {
            return false;
        }
        self.j = self.b.len() - s.len();
        true
    }

    fn set_to(&mut self, s: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(s.as_bytes());
    }

    fn replace(&mut self, s: &str) {
        if self.m() > 0 {
            self.set_to(s);
        }
    }

    /// Tries each `(suffix, replacement)` in order; the first suffix that
    /// matches ends the search whether or not the replacement applies.
    fn replace_first(&mut self, rules: &[(&str, &str)]) {
        for (suffix, replacement) in rules {
            if self.ends(suffix) {
                self.replace(replacement);
                return;
            }
        }
    }

    /// Plurals, `-ed` and `-ing`.
    fn step1ab(&mut self) {
        if self.b[self.last()] == b's' {
            if self.ends("sses") {
                self.b.truncate(self.b.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.b[self.last() - 1] != b's' {
                self.b.pop();
            }
        }
        if self.ends("eed") {
            if self.m() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_c(self.last()) {
                if !matches!(self.b[self.last()], b'l' | b's' | b'z') {
                    self.b.pop();
                }
            } else if self.m() == 1 && self.cvc(self.last()) {
                self.set_to("e");
            }
        }
    }

    /// Terminal `y` → `i` when the stem has a vowel.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let last = self.last();
            self.b[last] = b'i';
        }
    }

    /// Double suffixes to single ones, keyed on the penultimate letter.
    fn step2(&mut self) {
        let rules: &[(&str, &str)] = match self.b[self.last() - 1] {
            b'a' => &[("ational", "ate"), ("tional", "tion")],
            b'c' => &[("enci", "ence"), ("anci", "ance")],
            b'e' => &[("izer", "ize")],
            b'l' => &[
                ("bli", "ble"),
                ("alli", "al"),
                ("entli", "ent"),
                ("eli", "e"),
                ("ousli", "ous"),
            ],
            b'o' => &[("ization", "ize"), ("ation", "ate"), ("ator", "ate")],
            b's' => &[
                ("alism", "al"),
                ("iveness", "ive"),
                ("fulness", "ful"),
                ("ousness", "ous"),
            ],
            b't' => &[("aliti", "al"), ("iviti", "ive"), ("biliti", "ble")],
            b'g' => &[("logi", "log")],
            _ => return,
        };
        self.replace_first(rules);
    }

    /// `-ic-`, `-full`, `-ness` etc., keyed on the last letter.
    fn step3(&mut self) {
        let rules: &[(&str, &str)] = match self.b[self.last()] {
            b'e' => &[("icate", "ic"), ("ative", ""), ("alize", "al")],
            b'i' => &[("iciti", "ic")],
            b'l' => &[("ical", "ic"), ("ful", "")],
            b's' => &[("ness", "")],
            _ => return,
        };
        self.replace_first(rules);
    }

    /// Drops `-ant`, `-ence` etc. when the remaining stem has m > 1.
    fn step4(&mut self) {
        let suffixes: &[&str] = match self.b[self.last() - 1] {
            b'a' => &["al"],
            b'c' => &["ance", "ence"],
            b'e' => &["er"],
            b'i' => &["ic"],
            b'l' => &["able", "ible"],
            b'n' => &["ant", "ement", "ment", "ent"],
            b'o' => {
                if self.ends("ion") && self.j >= 1 && matches!(self.b[self.j - 1], b's' | b't') {
                    self.drop_suffix_if_long_stem();
                } else if self.ends("ou") {
                    self.drop_suffix_if_long_stem();
                }
                return;
            }
            b's' => &["ism"],
            b't' => &["ate", "iti"],
            b'u' => &["ous"],
            b'v' => &["ive"],
            b'z' => &["ize"],
            _ => return,
        };
        if suffixes.iter().any(|s| self.ends(s)) {
            self.drop_suffix_if_long_stem();
        }
    }

    fn drop_suffix_if_long_stem(&mut self) {
        if self.m() > 1 {
            self.b.truncate(self.j);
        }
    }

    /// Final `-e` and `-ll`. Measures are taken over the whole word as it
    /// stood on entry.
    fn step5(&mut self) {
        self.j = self.b.len();
        let a = self.m();
        if self.b[self.last()] == b'e' && (a > 1 || (a == 1 && !self.cvc(self.last() - 1))) {
            self.b.pop();
        }
        if self.b[self.last()] == b'l' && self.double_c(self.last()) && a > 1 {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem(word: &str) -> String {
        PorterStemmer::new().stem(word)
    }

    #[test]
    fn step1_plurals_and_participles() {
        let cases = [
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
            ("happy", "happi"),
            ("sky", "sky"),
        ];
        for (word, expected) in cases {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn later_steps() {
        let cases = [
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("digitizer", "digit"),
            ("operator", "oper"),
            ("feudalism", "feudal"),
            ("hopefulness", "hope"),
            ("goodness", "good"),
            ("electrical", "electr"),
            ("adjustment", "adjust"),
            ("adoption", "adopt"),
            ("generalizations", "gener"),
        ];
        for (word, expected) in cases {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn step5_final_e_and_double_l() {
        let cases = [
            ("rate", "rate"),
            ("cease", "ceas"),
            ("roll", "roll"),
            ("controll", "control"),
            ("controlling", "control"),
            ("belle", "bell"),
            ("michelle", "michel"),
            ("gazelle", "gazel"),
            ("danielle", "daniel"),
            ("rochelle", "rochel"),
        ];
        for (word, expected) in cases {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn short_and_foreign_words_pass_through() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("a"), "a");
        assert_eq!(stem(""), "");
        assert_eq!(stem("café"), "café");
        assert_eq!(stem("News"), "News");
    }

    #[test]
    fn newsroom_vocabulary() {
        assert_eq!(stem("news"), "new");
        assert_eq!(stem("reports"), "report");
        assert_eq!(stem("running"), "run");
        assert_eq!(stem("fake"), "fake");
    }
}
