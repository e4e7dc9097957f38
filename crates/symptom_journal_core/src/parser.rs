//! crates/symptom_journal_core/src/parser.rs
//!
//! Segments a pasted model reply into the numbered sections requested by the
//! prompt template. The reply is untrusted free text, so parsing is a single
//! tolerant pass over lines rather than a grammar:
//!
//! - a line like `3) text` opens section 3 and contributes `text`;
//! - any other line continues the open section verbatim;
//! - lines before the first header belong to no section and are dropped;
//! - a repeated header keeps appending to the same section.
//!
//! Parsing never fails. A reply with no recognizable header yields empty fields.

/// One of the six numbered parts of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary = 1,
    Patterns = 2,
    WorseningConditions = 3,
    WatchSigns = 4,
    NextStep = 5,
    Rewrite = 6,
}

impl Section {
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Section::Summary),
            '2' => Some(Section::Patterns),
            '3' => Some(Section::WorseningConditions),
            '4' => Some(Section::WatchSigns),
            '5' => Some(Section::NextStep),
            '6' => Some(Section::Rewrite),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        self as usize - 1
    }
}

/// The five fields stored on an output record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    pub summary_text: String,
    pub patterns_text: String,
    /// Sections 3 and 4 combined.
    pub cautions_text: String,
    pub one_step_text: String,
    pub rewrite_text: String,
}

impl ParsedReply {
    /// True when no section was recovered, i.e. the reply failed to parse.
    pub fn is_empty(&self) -> bool {
        self.summary_text.is_empty()
            && self.patterns_text.is_empty()
            && self.cautions_text.is_empty()
            && self.one_step_text.is_empty()
            && self.rewrite_text.is_empty()
    }
}

/// Recognizes a section header: optional leading whitespace, one digit 1-6,
/// `)`, optional whitespace. Returns the section and the rest of the line.
/// A byte order mark counts as whitespace, as pasted replies sometimes start with one.
pub fn match_header(line: &str) -> Option<(Section, &str)> {
    let rest = line.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let digit = rest.chars().next()?;
    let section = Section::from_digit(digit)?;
    let body = rest[digit.len_utf8()..].strip_prefix(')')?;
    Some((section, body.trim_start()))
}

/// Splits on `\n`, dropping the `\r` of a `\r\n` pair.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Line-at-a-time section accumulator.
#[derive(Debug, Default)]
pub struct SectionParser<'a> {
    current: Option<Section>,
    buffers: [Vec<&'a str>; 6],
}

impl<'a> SectionParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &'a str) {
        if let Some((section, body)) = match_header(line) {
            self.current = Some(section);
            self.buffers[section.slot()].push(body);
        } else if let Some(section) = self.current {
            self.buffers[section.slot()].push(line);
        }
    }

    /// The trimmed, newline-joined content of one section.
    pub fn section_text(&self, section: Section) -> String {
        self.buffers[section.slot()].join("\n").trim().to_string()
    }

    pub fn finish(self) -> ParsedReply {
        let cautions = [Section::WorseningConditions, Section::WatchSigns]
            .into_iter()
            .map(|section| self.section_text(section))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        ParsedReply {
            summary_text: self.section_text(Section::Summary),
            patterns_text: self.section_text(Section::Patterns),
            cautions_text: cautions,
            one_step_text: self.section_text(Section::NextStep),
            rewrite_text: self.section_text(Section::Rewrite),
        }
    }
}

/// Parses a whole reply.
pub fn parse_reply(text: &str) -> ParsedReply {
    let mut parser = SectionParser::new();
    for line in split_lines(text) {
        parser.feed(line);
    }
    parser.finish()
}
