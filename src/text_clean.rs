//! Text normalization module
//!
//! Cleans user-supplied text before it is recorded into a report:
//! trims edge punctuation and alternates the Ukrainian conjunctions
//! "і" / "та" so the same one is never repeated back-to-back.

/// Characters trimmed from both ends of a cleaned block
pub const EDGE_TRIM_CHARS: &[char] = &[' ', '-', '–', '.'];

/// The conjunction pair used for alternation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conjunction {
    /// "і"
    I,
    /// "та"
    #[default]
    Ta,
}

impl Conjunction {
    /// The word as written in text
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::I => "і",
            Conjunction::Ta => "та",
        }
    }

    /// The other member of the pair
    pub fn other(&self) -> Self {
        match self {
            Conjunction::I => Conjunction::Ta,
            Conjunction::Ta => Conjunction::I,
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "і" => Some(Conjunction::I),
            "та" => Some(Conjunction::Ta),
            _ => None,
        }
    }
}

/// Stateful text cleaner
///
/// The last emitted conjunction is carried across calls, so the output of
/// `clean` depends on everything cleaned before it by the same instance.
/// Each report session owns its own cleaner.
#[derive(Debug, Clone, Default)]
pub struct TextCleaner {
    last: Conjunction,
}

impl TextCleaner {
    /// Create a cleaner seeded with a known last conjunction
    pub fn with_last(last: Conjunction) -> Self {
        Self { last }
    }

    /// Last conjunction emitted so far
    pub fn last_conjunction(&self) -> Conjunction {
        self.last
    }

    /// Clean a block of text
    pub fn clean(&mut self, text: &str) -> String {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| self.alternate_conjunctions(line))
            .collect();

        lines.join("\n").trim().trim_matches(EDGE_TRIM_CHARS).to_string()
    }

    /// List item text is passed through untouched
    pub fn clean_items<'a>(&self, items: &'a str) -> &'a str {
        items
    }

    /// Alternate "і" / "та" within a single line
    ///
    /// Words are re-joined with single spaces.
    pub fn alternate_conjunctions(&mut self, line: &str) -> String {
        let mut words = Vec::new();

        for word in line.split_whitespace() {
            match Conjunction::from_word(word) {
                Some(conj) if conj == self.last => {
                    let swapped = conj.other();
                    words.push(swapped.as_str());
                    self.last = swapped;
                }
                Some(conj) => {
                    words.push(word);
                    self.last = conj;
                }
                None => words.push(word),
            }
        }

        words.join(" ")
    }
}
