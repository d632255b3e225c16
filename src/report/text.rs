use crate::model::scores::SubjectSummary;
use crate::report::{SummaryData, format_f64_6};

const LOWEST_SUBJECTS: usize = 5;

pub fn render_report_text(data: &SummaryData, subjects: &[SubjectSummary]) -> String {
    let mut out = String::new();

    out.push_str("Discriminability Report\n");
    out.push_str("=======================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Source: {} ({})\n", data.input.source, data.input.path));
    if let Some(metric) = &data.input.metric {
        out.push_str(&format!("Distance metric: {}\n", metric));
    }
    out.push_str(&format!(
        "Scans: {}\nSubjects: {} ({} with repeated scans)\n\n",
        data.input.n_scans, data.input.n_subjects, data.input.n_repeated_subjects
    ));

    out.push_str("2. Discriminability\n");
    out.push_str(&format!(
        "Discriminability: {}\n",
        format_f64_6(data.discriminability.score)
    ));
    out.push_str(&format!(
        "Scores used: {}\nOutliers removed: {}\nUnique-id scans: {}\n",
        data.discriminability.n_used,
        data.discriminability.n_outliers,
        data.discriminability.n_unique
    ));
    out.push_str(&format!(
        "Outlier removal: {} (threshold {})\n",
        if data.options.remove_outliers {
            "on"
        } else {
            "off"
        },
        format_f64_6(data.options.threshold)
    ));
    out.push_str(&format!(
        "{}\n\n",
        discriminability_statement(data.discriminability.score)
    ));

    out.push_str("3. Reliability density\n");
    out.push_str(&format!(
        "Pairs: {} (undefined: {})\nmin={}, p10={}, median={}, p90={}, max={}\n",
        data.rdf.n_pairs,
        data.rdf.n_undefined,
        format_f64_6(data.rdf.min),
        format_f64_6(data.rdf.p10),
        format_f64_6(data.rdf.median),
        format_f64_6(data.rdf.p90),
        format_f64_6(data.rdf.max)
    ));
    let lowest = lowest_subjects(subjects);
    if !lowest.is_empty() {
        out.push_str(&format!("Least reliable subjects: {}\n", lowest));
    }
    out.push('\n');

    if let Some(perm) = &data.permutation {
        out.push_str("4. Permutation test\n");
        out.push_str(&format!(
            "Permutations: {} (seed {})\nNull mean: {}\np-value: {}\n",
            perm.n_permutations,
            perm.seed,
            format_f64_6(perm.null_mean),
            format_f64_6(perm.p_value)
        ));
        if perm.n_null_nan > 0 {
            out.push_str(&format!("Undefined null draws: {}\n", perm.n_null_nan));
        }
    }

    out
}

fn discriminability_statement(score: f64) -> &'static str {
    if score.is_nan() {
        "No repeated measurements with inter-subject comparisons; discriminability is undefined."
    } else if score >= 0.9 {
        "Repeated scans are almost always closer to each other than to other subjects."
    } else if score >= 0.7 {
        "Repeated scans are usually closer to each other than to other subjects."
    } else if score > 0.5 {
        "Repeated scans are only weakly distinguishable from other subjects."
    } else {
        "Repeated scans are no closer to each other than to other subjects."
    }
}

fn lowest_subjects(subjects: &[SubjectSummary]) -> String {
    let mut scored: Vec<&SubjectSummary> =
        subjects.iter().filter(|s| !s.mean_rdf.is_nan()).collect();
    scored.sort_by(|a, b| {
        a.mean_rdf
            .total_cmp(&b.mean_rdf)
            .then_with(|| a.subject.cmp(&b.subject))
    });
    scored
        .iter()
        .take(LOWEST_SUBJECTS)
        .map(|s| format!("{} ({})", s.subject, format_f64_6(s.mean_rdf)))
        .collect::<Vec<_>>()
        .join(", ")
}
