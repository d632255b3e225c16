use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::scores::{ReliabilityScores, SubjectSummary};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{SummaryData, format_f64_6};

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub labels: &'a [String],
    pub scores: &'a ReliabilityScores,
    pub subjects: &'a [SubjectSummary],
    pub summary: &'a SummaryData,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_rdf_tsv(input, &out_dir.join("rdf.tsv"))?;
    write_subjects_tsv(input.subjects, &out_dir.join("subjects.tsv"))?;

    let json = render_summary_json(input.summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(input.summary, input.subjects);
    write_text(&out_dir.join("report.txt"), &report)?;

    crate::info!("reports written to {}", out_dir.display());
    Ok(())
}

fn write_rdf_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "scan\tsubject\tpartner\tscore")?;
    for entry in input.scores.iter() {
        let subject = input
            .labels
            .get(entry.scan)
            .map(String::as_str)
            .unwrap_or_default();
        let partner = entry.partner.map(|p| p.to_string()).unwrap_or_default();
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            entry.scan,
            subject,
            partner,
            format_f64_6(entry.score)
        )?;
    }
    w.flush()
}

fn write_subjects_tsv(subjects: &[SubjectSummary], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "subject\tn_scans\tn_pairs\tmean_rdf")?;
    for s in subjects {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            s.subject,
            s.n_scans,
            s.n_pairs,
            format_f64_6(s.mean_rdf)
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
