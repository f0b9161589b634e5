use crate::document::Document;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionStats {
    pub documents: usize,
    pub untitled: usize,
    pub empty: usize,
    pub total_terms: usize,
    pub min_terms: usize,
    pub max_terms: usize,
}

impl CollectionStats {
    pub fn from_documents(docs: &[Document]) -> Self {
        let counts: Vec<usize> = docs.iter().map(Document::term_count).collect();
        CollectionStats {
            documents: docs.len(),
            untitled: docs.iter().filter(|d| d.title.is_none()).count(),
            empty: counts.iter().filter(|&&n| n == 0).count(),
            total_terms: counts.iter().sum(),
            min_terms: counts.iter().copied().min().unwrap_or(0),
            max_terms: counts.iter().copied().max().unwrap_or(0),
        }
    }

    pub fn mean_terms(&self) -> f64 {
        if self.documents == 0 {
            0.0
        } else {
            self.total_terms as f64 / self.documents as f64
        }
    }

    pub fn print(&self) {
        println!("Documents:   {}", self.documents);
        println!("Untitled:    {}", self.untitled);
        println!("Empty:       {}", self.empty);
        println!("Terms:       {}", self.total_terms);
        println!(
            "Per doc:     min {} / max {} / mean {:.1}",
            self.min_terms,
            self.max_terms,
            self.mean_terms()
        );
    }
}
