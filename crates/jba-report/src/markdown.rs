use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use jba_reconcile::{ProjectUnderpayments, UnderpaymentLedger};

/// Base URLs for deep links in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLinks {
    /// Project page; the project id is appended.
    pub project_base: String,
    /// Block explorer tx page; the tx hash is appended.
    pub tx_base: String,
}

impl Default for ReportLinks {
    fn default() -> Self {
        Self {
            project_base: "https://juicebox.money/v2/p/".to_string(),
            tx_base: "https://etherscan.io/tx/".to_string(),
        }
    }
}

impl ReportLinks {
    fn project_url(&self, project_id: u64) -> String {
        format!("{}{}", self.project_base, project_id)
    }

    fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}{}", self.tx_base, tx_hash)
    }
}

/// Render the underpayment ledger as Markdown.
///
/// Projects without discrepancies never appear in the ledger, so they never
/// get a section. An empty ledger renders as an empty string.
pub fn render_underpayment_report(ledger: &UnderpaymentLedger, links: &ReportLinks) -> String {
    let mut out = String::new();
    for project in ledger.iter() {
        render_section(&mut out, project, links);
    }
    out
}

fn render_section(out: &mut String, project: &ProjectUnderpayments, links: &ReportLinks) {
    let id = project.project_id;
    out.push_str(&format!(
        "## Project #{id}\n\n[Link to project]({}).\n\n",
        links.project_url(id)
    ));
    out.push_str(&format!(
        "Underpaid by {}. Breakdown:\n\n",
        project.total.to_eth_string()
    ));
    out.push_str("| Underpaid by | Expected | Received | Tx Hash |\n| --- | --- | --- | --- |\n");
    for d in &project.discrepancies {
        out.push_str(&format!(
            "| {} | {} | {} | [`{}`]({}) |\n",
            d.difference.to_eth_string(),
            d.expected.to_eth_string(),
            d.received.to_eth_string(),
            d.tx_hash,
            links.tx_url(&d.tx_hash),
        ));
    }
    out.push_str("\n\n");
}

/// Render and write the report, truncating an existing file.
///
/// The file handle is scoped to this call and closed on every return path.
pub fn write_report_file(
    path: &Path,
    ledger: &UnderpaymentLedger,
    links: &ReportLinks,
) -> Result<()> {
    let body = render_underpayment_report(ledger, links);

    let file = File::create(path)
        .with_context(|| format!("create report file failed: {}", path.display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(body.as_bytes())
        .with_context(|| format!("write report file failed: {}", path.display()))?;
    w.flush()
        .with_context(|| format!("flush report file failed: {}", path.display()))?;
    Ok(())
}
