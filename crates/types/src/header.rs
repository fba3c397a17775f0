use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The title block printed at the top of every report page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportHeader {
    pub company_name: String,
    pub document_title: String,
    pub project_number: String,
    pub issue_date: Option<NaiveDate>,
}

impl ReportHeader {
    /// Starts an edit cycle. The header only changes when the draft is saved.
    pub fn edit(&self) -> HeaderDraft {
        HeaderDraft {
            fields: self.clone(),
        }
    }

    pub fn formatted_issue_date(&self) -> String {
        self.issue_date
            .map(|d| d.format("%-d %B %Y").to_string())
            .unwrap_or_default()
    }
}

/// A pending edit of a [`ReportHeader`].
#[derive(Debug, Clone)]
pub struct HeaderDraft {
    pub fields: ReportHeader,
}

impl HeaderDraft {
    /// Replaces `target` with the draft as a whole.
    pub fn save(self, target: &mut ReportHeader) {
        *target = self.fields;
    }

    pub fn cancel(self) {}
}
