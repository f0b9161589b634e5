use tracing::debug;

use crate::document::Document;

/// Blank lines after a title that open the body.
const BODY_BLANK_RUN: usize = 2;
/// Blank lines that close a document.
const DOCUMENT_BLANK_RUN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    SeekingTitle,
    InBody,
}

/// Line-driven state machine that splits the anthology body into documents.
///
/// `blank_run` counts blanks seen outside the body; `blank_run_in_body`
/// counts consecutive blanks inside it and resets on any text line. Three
/// blanks inside the body escalate `blank_run` to the document terminator.
#[derive(Debug, Default)]
pub struct Segmenter {
    mode: Mode,
    pending_title: Option<String>,
    text: String,
    blank_run: usize,
    blank_run_in_body: usize,
    next_id: u64,
    documents: Vec<Document>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        let blank = line.is_empty();

        if blank && self.mode == Mode::SeekingTitle {
            self.blank_run += 1;
            return;
        }

        if self.blank_run == BODY_BLANK_RUN {
            self.mode = Mode::InBody;
            if blank {
                self.blank_run_in_body += 1;
            } else {
                self.text.push_str(line);
                self.text.push(' ');
                self.blank_run_in_body = 0;
            }
        }

        if self.blank_run_in_body == DOCUMENT_BLANK_RUN {
            self.blank_run = DOCUMENT_BLANK_RUN;
        }

        // The line that trips the terminator is consumed by it.
        if self.blank_run == DOCUMENT_BLANK_RUN {
            self.close_document();
            return;
        }

        if !blank && self.mode == Mode::SeekingTitle {
            self.pending_title = Some(line.to_string());
        }
    }

    /// Flush a trailing document that never saw its terminator and return the
    /// collection.
    pub fn finish(mut self) -> Vec<Document> {
        if !self.text.is_empty() || self.pending_title.is_some() {
            self.close_document();
        }
        self.documents
    }

    fn close_document(&mut self) {
        let doc = Document::from_body(self.next_id, self.pending_title.take(), &self.text);
        debug!(
            document_id = doc.document_id,
            title = ?doc.title,
            terms = doc.term_count(),
            "closed document"
        );
        self.documents.push(doc);
        self.next_id += 1;

        self.text.clear();
        self.blank_run = 0;
        self.blank_run_in_body = 0;
        self.mode = Mode::SeekingTitle;
    }
}

/// Run the segmenter over already-skipped body lines.
pub fn segment_lines<I, S>(lines: I) -> Vec<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new();
    for line in lines {
        segmenter.feed(line.as_ref());
    }
    segmenter.finish()
}
