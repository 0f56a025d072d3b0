use crate::contact::CandidateDetails;
use crate::ranker::Ranking;
use serde::Serialize;

/// Candidate indices ordered by descending score. Ties keep input order.
pub fn rank_order(scores: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// 1-based position after sorting.
    pub rank: usize,
    /// Position in the caller's input.
    pub index: usize,
    pub name: String,
    pub score: f32,
    pub matched_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CandidateDetails>,
}

/// A ranking joined back to file names, sorted for display.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub query: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// `names` and `texts` are in candidate order; details are extracted from `texts` when requested.
    pub fn build(query: &str, names: &[String], texts: &[String], ranking: &Ranking, with_details: bool) -> Self {
        let scores = ranking.values();
        let rows = rank_order(&scores)
            .into_iter()
            .enumerate()
            .map(|(pos, index)| ReportRow {
                rank: pos + 1,
                index,
                name: names.get(index).cloned().unwrap_or_else(|| format!("candidate-{}", index + 1)),
                score: scores[index],
                matched_terms: ranking.matched_terms(index).into_iter().map(str::to_string).collect(),
                details: if with_details { texts.get(index).map(|t| CandidateDetails::extract(t)) } else { None },
            })
            .collect();
        Self { query: query.to_string(), rows }
    }

    pub fn truncate(&mut self, top: usize) {
        self.rows.truncate(top);
    }

    pub fn top(&self) -> Option<&ReportRow> { self.rows.first() }

    pub fn to_markdown(&self) -> String {
        let detailed = self.rows.iter().any(|r| r.details.is_some());
        let mut out = if detailed {
            String::from("| Rank | Resume Name | Candidate | Email | Phone | Score |\n|------|--------------|-----------|-------|-------|-------|\n")
        } else {
            String::from("| Rank | Resume Name | Score |\n|------|--------------|-------|\n")
        };
        for row in &self.rows {
            match &row.details {
                Some(d) if detailed => out.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {:.2} |\n",
                    row.rank, cell(&row.name), cell(&d.name), cell(&d.email), cell(&d.phone), row.score
                )),
                _ if detailed => out.push_str(&format!("| {} | {} | | | | {:.2} |\n", row.rank, cell(&row.name), row.score)),
                _ => out.push_str(&format!("| {} | {} | {:.2} |\n", row.rank, cell(&row.name), row.score)),
            }
        }
        out
    }
}

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
